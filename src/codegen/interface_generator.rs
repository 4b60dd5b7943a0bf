// Contract interface generator - I<Entity>.kt
use std::collections::BTreeSet;

use super::utils::{self, Language};
use crate::config::GenerationOptions;
use crate::ent_framework::{Entity, EntitySet};
use crate::error::CodegenResult;

pub struct InterfaceGenerator<'a> {
    entities: &'a EntitySet,
    options: &'a GenerationOptions,
}

impl<'a> InterfaceGenerator<'a> {
    pub fn new(entities: &'a EntitySet, options: &'a GenerationOptions) -> Self {
        Self { entities, options }
    }

    /// Generate the client-facing contract. Relationships are flattened to the
    /// target identifier.
    pub fn generate(&self, entity: &Entity) -> CodegenResult<String> {
        let constrained = self.options.generate_constrained_data;

        let mut imports = BTreeSet::new();
        if constrained {
            imports.insert(Language::Kotlin.import("jakarta.validation.constraints.*"));
        }
        utils::add_type_imports(&mut imports, self.entities, entity, Language::Kotlin)?;

        let mut content = utils::file_prelude(&entity.package_name, &imports, Language::Kotlin);
        content.push_str(&format!("interface I{} {{\n\n", utils::capitalized(&entity.name)));

        for attribute in &entity.attributes {
            let property = utils::flattened_property(self.entities, entity, attribute)?;
            if constrained {
                for constraint in &attribute.constraints {
                    content.push_str(&format!("    @get:{}\n", constraint.annotation_name()));
                }
            }
            content.push_str(&format!(
                "    var {}: {}?\n",
                property.name,
                property.scalar.kotlin_name()
            ));
            content.push('\n');
        }

        content.push_str("}\n");
        Ok(content)
    }
}
