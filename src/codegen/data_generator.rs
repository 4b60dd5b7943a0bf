// Data holder generator - <Entity>Data.kt implementing I<Entity>
use std::collections::BTreeSet;

use super::utils::{self, Language};
use crate::config::GenerationOptions;
use crate::ent_framework::{Entity, EntitySet};
use crate::error::CodegenResult;

const COMPOSE_IMPORTS: [&str; 3] = [
    "androidx.compose.runtime.getValue",
    "androidx.compose.runtime.mutableStateOf",
    "androidx.compose.runtime.setValue",
];

pub struct DataGenerator<'a> {
    entities: &'a EntitySet,
    options: &'a GenerationOptions,
}

impl<'a> DataGenerator<'a> {
    pub fn new(entities: &'a EntitySet, options: &'a GenerationOptions) -> Self {
        Self { entities, options }
    }

    /// Generate the mutable data holder. With composable data enabled every
    /// property is delegated to an observable state cell; the get/set
    /// contract stays the same.
    pub fn generate(&self, entity: &Entity) -> CodegenResult<String> {
        let composable = self.options.generate_composable_data;
        let name = utils::capitalized(&entity.name);

        let mut imports = BTreeSet::new();
        if composable {
            imports.extend(COMPOSE_IMPORTS.iter().map(|i| Language::Kotlin.import(i)));
        }
        utils::add_type_imports(&mut imports, self.entities, entity, Language::Kotlin)?;

        let initializer = if composable { " by mutableStateOf(null)" } else { " = null" };

        let mut content = utils::file_prelude(&entity.package_name, &imports, Language::Kotlin);
        content.push_str(&format!("open class {name}Data : I{name} {{\n\n"));

        for attribute in &entity.attributes {
            let property = utils::flattened_property(self.entities, entity, attribute)?;
            content.push_str(&format!(
                "    override var {}: {}?{}\n",
                property.name,
                property.scalar.kotlin_name(),
                initializer
            ));
            content.push('\n');
        }

        content.push_str("}\n");
        Ok(content)
    }
}
