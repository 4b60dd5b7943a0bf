// Scoped builders for entity sets
//
// Each closure only sees the builder of its own level. An `AttributeBuilder`
// mutably borrows its entity builder, so entity-level calls cannot be made
// while an attribute is being configured.

use super::column_type::ColumnType;
use super::ent_schema::{Attribute, Constraint, Entity, EntitySet};
use crate::error::CodegenResult;

/// Collects entity declarations in order and produces an `EntitySet`.
#[derive(Debug, Default)]
pub struct EntitySetBuilder {
    entities: Vec<Entity>,
}

impl EntitySetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an entity and configure it inside `block`.
    pub fn entity<F>(mut self, name: &str, package_name: &str, block: F) -> Self
    where
        F: FnOnce(&mut EntityBuilder),
    {
        let mut builder = EntityBuilder {
            entity: Entity::new(name, package_name),
        };
        block(&mut builder);
        self.entities.push(builder.entity);
        self
    }

    /// Finish the set. Duplicate entity or attribute names are rejected here.
    pub fn build(self) -> CodegenResult<EntitySet> {
        EntitySet::from_entities(self.entities)
    }
}

#[derive(Debug)]
pub struct EntityBuilder {
    entity: Entity,
}

impl EntityBuilder {
    /// Override the persisted entity name
    pub fn entity_name(&mut self, entity_name: &str) -> &mut Self {
        self.entity.entity_name = Some(entity_name.to_string());
        self
    }

    pub fn table_name(&mut self, table_name: &str) -> &mut Self {
        self.entity.table_name = Some(table_name.to_string());
        self
    }

    pub fn table_schema(&mut self, table_schema: &str) -> &mut Self {
        self.entity.table_schema = Some(table_schema.to_string());
        self
    }

    /// Append an attribute with the given column type.
    pub fn attribute(&mut self, name: &str, column_type: ColumnType) -> AttributeBuilder<'_> {
        self.push(Attribute::new(name, Some(column_type)))
    }

    /// Append an attribute whose column type is left undeclared. Generation
    /// fails as soon as any generator reads it.
    pub fn untyped_attribute(&mut self, name: &str) -> AttributeBuilder<'_> {
        self.push(Attribute::new(name, None))
    }

    fn push(&mut self, attribute: Attribute) -> AttributeBuilder<'_> {
        self.entity.attributes.push(attribute);
        let index = self.entity.attributes.len() - 1;
        AttributeBuilder {
            attribute: &mut self.entity.attributes[index],
        }
    }
}

/// Fluent configuration of a single attribute.
#[derive(Debug)]
pub struct AttributeBuilder<'a> {
    attribute: &'a mut Attribute,
}

impl AttributeBuilder<'_> {
    pub fn column_type(self, column_type: ColumnType) -> Self {
        self.attribute.column_type = Some(column_type);
        self
    }

    pub fn column_name(self, column_name: &str) -> Self {
        self.attribute.column_name = Some(column_name.to_string());
        self
    }

    pub fn unique(self, unique: bool) -> Self {
        self.attribute.column_unique = Some(unique);
        self
    }

    pub fn nullable(self, nullable: bool) -> Self {
        self.attribute.column_nullable = Some(nullable);
        self
    }

    pub fn insertable(self, insertable: bool) -> Self {
        self.attribute.column_insertable = Some(insertable);
        self
    }

    pub fn updatable(self, updatable: bool) -> Self {
        self.attribute.column_updatable = Some(updatable);
        self
    }

    pub fn not_null(self) -> Self {
        self.constraint(Constraint::NotNull)
    }

    pub fn not_blank(self) -> Self {
        self.constraint(Constraint::NotBlank)
    }

    pub fn not_empty(self) -> Self {
        self.constraint(Constraint::NotEmpty)
    }

    pub fn constraint(self, constraint: Constraint) -> Self {
        self.attribute.constraints.push(constraint);
        self
    }
}
