// Ent Framework - entity schema model consumed by the code generators

pub mod builder;
pub mod column_type;
pub mod ent_schema;
pub mod resolver;

// Re-export all ent framework types for convenience
pub use builder::{AttributeBuilder, EntityBuilder, EntitySetBuilder};
pub use column_type::{BasicType, ColumnType, IdKind, ScalarType, VersionKind};
pub use ent_schema::{Attribute, Constraint, Entity, EntitySet};
pub use resolver::{resolve_entity, resolve_target, ResolvedTarget};
