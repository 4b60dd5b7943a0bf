// Entity Codegen - persistence-layer source generation from declarative entity models

// Ent Framework - entity model, column type taxonomy and relationship resolution
pub mod ent_framework;

// Code generation - one generator per artifact kind plus the run orchestrator
pub mod codegen;

// Schema Definitions - bundled sample entity model
pub mod schemas;

// Common utilities
pub mod config;
pub mod error;

// Re-exports for convenience
pub use codegen::{ArtifactKind, CodeGenerator, GeneratedFile};
pub use config::{Config, GenerationOptions};
pub use ent_framework::{EntitySet, EntitySetBuilder};
pub use error::{CodegenError, CodegenResult};
