// Persisted entity generator - <Entity>Entity.kt with mapping annotations
use std::collections::BTreeSet;

use super::utils::{self, Language};
use crate::ent_framework::{resolve_entity, Attribute, BasicType, ColumnType, Entity, EntitySet, IdKind};
use crate::error::CodegenResult;

pub struct EntityGenerator<'a> {
    entities: &'a EntitySet,
}

impl<'a> EntityGenerator<'a> {
    pub fn new(entities: &'a EntitySet) -> Self {
        Self { entities }
    }

    pub fn generate(&self, entity: &Entity) -> CodegenResult<String> {
        let mut imports = BTreeSet::new();
        imports.insert(Language::Kotlin.import("jakarta.persistence.*"));
        utils::add_type_imports(&mut imports, self.entities, entity, Language::Kotlin)?;

        let mut content = utils::file_prelude(&entity.package_name, &imports, Language::Kotlin);
        content.push_str(&self.generate_entity_annotation(entity));
        content.push_str(&self.generate_table_annotation(entity));
        content.push_str(&format!("open class {} {{\n\n", utils::entity_type_name(entity)));

        for attribute in &entity.attributes {
            content.push_str(&self.generate_property(entity, attribute)?);
            content.push('\n');
        }

        content.push_str("}\n");
        Ok(content)
    }

    fn generate_property(&self, entity: &Entity, attribute: &Attribute) -> CodegenResult<String> {
        let name = utils::decapitalized(&attribute.name);
        let mut property = String::new();

        let value_type = match attribute.column_type(entity)? {
            ColumnType::Id { id_type, auto_generated } => {
                property.push_str("    @get:Id\n");
                if *auto_generated {
                    let strategy = match id_type {
                        IdKind::Integer | IdKind::Long => "IDENTITY",
                        IdKind::Uuid => "UUID",
                    };
                    property.push_str(&format!(
                        "    @get:GeneratedValue(strategy = GenerationType.{strategy})\n"
                    ));
                }
                property.push_str(&format!("    @get:Column{}\n", column_params(attribute, None)));
                id_type.scalar().kotlin_name().to_string()
            }
            ColumnType::Version { version_type } => {
                property.push_str("    @get:Version\n");
                property.push_str(&format!("    @get:Column{}\n", column_params(attribute, None)));
                version_type.scalar().kotlin_name().to_string()
            }
            ColumnType::Basic(basic) => {
                property.push_str(&format!("    @get:Column{}\n", column_params(attribute, Some(basic))));
                basic.scalar().kotlin_name().to_string()
            }
            ColumnType::ManyToOne { target } => {
                let target = resolve_entity(self.entities, entity, attribute, target)?;
                property.push_str("    @get:ManyToOne\n");
                property.push_str(&format!("    @get:JoinColumn{}\n", column_params(attribute, None)));
                utils::entity_type_name(target)
            }
        };

        property.push_str(&format!("    open var {name}: {value_type}? = null\n"));
        Ok(property)
    }

    fn generate_entity_annotation(&self, entity: &Entity) -> String {
        let mut params = Vec::new();
        if let Some(entity_name) = non_blank(&entity.entity_name) {
            params.push(format!("name = \"{entity_name}\""));
        }
        format!("@Entity{}\n", join_params(&params))
    }

    fn generate_table_annotation(&self, entity: &Entity) -> String {
        let mut params = Vec::new();
        if let Some(table_name) = non_blank(&entity.table_name) {
            params.push(format!("name = \"{table_name}\""));
        }
        if let Some(table_schema) = non_blank(&entity.table_schema) {
            params.push(format!("schema = \"{table_schema}\""));
        }
        format!("@Table{}\n", join_params(&params))
    }
}

/// Parameter list of a column or join column annotation, including the
/// surrounding parentheses, or empty when nothing is set.
fn column_params(attribute: &Attribute, basic: Option<&BasicType>) -> String {
    let mut params = Vec::new();
    if let Some(column_name) = non_blank(&attribute.column_name) {
        params.push(format!("name = \"{column_name}\""));
    }
    let flags = [
        ("unique", attribute.column_unique),
        ("nullable", attribute.column_nullable),
        ("insertable", attribute.column_insertable),
        ("updatable", attribute.column_updatable),
    ];
    for (key, value) in flags {
        if let Some(value) = value {
            params.push(format!("{key} = {value}"));
        }
    }
    match basic {
        Some(BasicType::String { length: Some(length) }) => {
            params.push(format!("length = {length}"));
        }
        Some(BasicType::BigDecimal { precision, scale }) => {
            if let Some(precision) = precision {
                params.push(format!("precision = {precision}"));
            }
            if let Some(scale) = scale {
                params.push(format!("scale = {scale}"));
            }
        }
        _ => {}
    }
    join_params(&params)
}

fn join_params(params: &[String]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!("({})", params.join(", "))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ent_framework::EntitySetBuilder;

    fn entities() -> EntitySet {
        EntitySetBuilder::new()
            .entity("user", "com.example", |e| {
                e.attribute("id", ColumnType::id_long(true));
                e.attribute("version", ColumnType::version_integer());
                e.attribute("name", ColumnType::string(Some(50))).not_null();
            })
            .entity("ledger", "com.example.books", |e| {
                e.entity_name("Book").table_name("ledgers").table_schema("acct");
                e.attribute("key", ColumnType::id_uuid(true)).column_name("ledger_key");
                e.attribute("amount", ColumnType::big_decimal(Some(12), Some(2)))
                    .nullable(false)
                    .unique(true);
                e.attribute("note", ColumnType::string(None)).column_name("  ");
                e.attribute("owner", ColumnType::many_to_one("user"))
                    .column_name("owner_id")
                    .insertable(false)
                    .updatable(false);
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_user_entity() {
        let set = entities();
        let text = EntityGenerator::new(&set).generate(set.get("user").unwrap()).unwrap();

        assert_eq!(
            text,
            "package com.example\n\
             \n\
             import jakarta.persistence.*\n\
             \n\
             @Entity\n\
             @Table\n\
             open class UserEntity {\n\
             \n\
             \x20   @get:Id\n\
             \x20   @get:GeneratedValue(strategy = GenerationType.IDENTITY)\n\
             \x20   @get:Column\n\
             \x20   open var id: Long? = null\n\
             \n\
             \x20   @get:Version\n\
             \x20   @get:Column\n\
             \x20   open var version: Int? = null\n\
             \n\
             \x20   @get:Column(length = 50)\n\
             \x20   open var name: String? = null\n\
             \n\
             }\n"
        );
    }

    #[test]
    fn test_annotation_parameters() {
        let set = entities();
        let text = EntityGenerator::new(&set).generate(set.get("ledger").unwrap()).unwrap();

        assert!(text.contains("import com.example.UserEntity\n"));
        assert!(text.contains("import java.math.BigDecimal\n"));
        assert!(text.contains("import java.util.UUID\n"));
        assert!(text.contains("@Entity(name = \"Book\")\n@Table(name = \"ledgers\", schema = \"acct\")\n"));
        assert!(text.contains(
            "    @get:Id\n    @get:GeneratedValue(strategy = GenerationType.UUID)\n    @get:Column(name = \"ledger_key\")\n    open var key: UUID? = null\n"
        ));
        assert!(text.contains(
            "    @get:Column(unique = true, nullable = false, precision = 12, scale = 2)\n    open var amount: BigDecimal? = null\n"
        ));
        assert!(text.contains("    @get:Column\n    open var note: String? = null\n"));
        assert!(text.contains(
            "    @get:ManyToOne\n    @get:JoinColumn(name = \"owner_id\", insertable = false, updatable = false)\n    open var owner: UserEntity? = null\n"
        ));
    }

    #[test]
    fn test_missing_column_type_aborts() {
        let set = EntitySetBuilder::new()
            .entity("user", "", |e| {
                e.untyped_attribute("name");
            })
            .build()
            .unwrap();
        let err = EntityGenerator::new(&set).generate(set.get("user").unwrap()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'columnType' of attribute 'name' in entity 'user' is not declared"
        );
    }
}
