// Schema definitions module - bundled sample entity model

pub mod department_schema;
pub mod employee_schema;
pub mod user_schema;

use crate::ent_framework::{EntitySet, EntitySetBuilder};
use crate::error::CodegenResult;

/// Build the sample entity set, in declaration order.
pub fn create_entity_set() -> CodegenResult<EntitySet> {
    let builder = EntitySetBuilder::new();
    let builder = user_schema::declare(builder);
    let builder = department_schema::declare(builder);
    let builder = employee_schema::declare(builder);
    builder.build()
}

/// Validate the sample entity set
pub fn validate_schemas() -> Result<(), Vec<String>> {
    create_entity_set()
        .map_err(|e| vec![e.to_string()])?
        .validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_model_is_valid() {
        assert_eq!(validate_schemas(), Ok(()));
        let set = create_entity_set().unwrap();
        let names: Vec<_> = set.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["user", "department", "employee"]);
    }
}
