// Static metamodel generator - <Entity>Entity_.java
use std::collections::BTreeSet;

use super::utils::{self, Language};
use crate::ent_framework::{resolve_entity, ColumnType, Entity, EntitySet};
use crate::error::CodegenResult;

pub struct MetamodelGenerator<'a> {
    entities: &'a EntitySet,
}

impl<'a> MetamodelGenerator<'a> {
    pub fn new(entities: &'a EntitySet) -> Self {
        Self { entities }
    }

    /// One attribute handle per attribute. Relationships keep the target
    /// entity type here instead of the flattened identifier.
    pub fn generate(&self, entity: &Entity) -> CodegenResult<String> {
        let owner = utils::entity_type_name(entity);

        let mut imports = BTreeSet::new();
        imports.insert(Language::Java.import("jakarta.persistence.metamodel.*"));
        utils::add_type_imports(&mut imports, self.entities, entity, Language::Java)?;

        let mut content = utils::file_prelude(&entity.package_name, &imports, Language::Java);
        content.push_str(&format!("@StaticMetamodel({owner}.class)\n"));
        content.push_str(&format!("public class {owner}_ {{\n\n"));

        for attribute in &entity.attributes {
            let value_type = match attribute.column_type(entity)? {
                ColumnType::ManyToOne { target } => {
                    let target = resolve_entity(self.entities, entity, attribute, target)?;
                    utils::entity_type_name(target)
                }
                ColumnType::Id { id_type, .. } => id_type.scalar().java_name().to_string(),
                ColumnType::Version { version_type } => version_type.scalar().java_name().to_string(),
                ColumnType::Basic(basic) => basic.scalar().java_name().to_string(),
            };
            content.push_str(&format!(
                "    public static volatile SingularAttribute<{}, {}> {};\n",
                owner,
                value_type,
                utils::decapitalized(&attribute.name)
            ));
            content.push('\n');
        }

        content.push_str("}\n");
        Ok(content)
    }
}
