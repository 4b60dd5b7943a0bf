use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a generation run.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("'columnType' of attribute '{attribute}' in entity '{entity}' is not declared")]
    UndeclaredColumnType { entity: String, attribute: String },

    #[error("'target' of attribute '{attribute}' in entity '{entity}' is a unknown entity ('{target}')")]
    UnknownEntity {
        entity: String,
        attribute: String,
        target: String,
    },

    #[error("'target' of attribute '{attribute}' in entity '{entity}' does not declare an identifier ('{target}')")]
    MissingIdentifier {
        entity: String,
        attribute: String,
        target: String,
    },

    #[error("entity '{entity}' is declared more than once")]
    DuplicateEntity { entity: String },

    #[error("attribute '{attribute}' is declared more than once in entity '{entity}'")]
    DuplicateAttribute { entity: String, attribute: String },

    #[error("artifact '{}' would be generated more than once", path.display())]
    ArtifactCollision { path: PathBuf },

    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed entity model: {0}")]
    Model(#[from] serde_json::Error),
}

impl CodegenError {
    /// True for defects in the declared entity model, as opposed to
    /// environment failures such as I/O.
    pub fn is_configuration_defect(&self) -> bool {
        !matches!(self, CodegenError::Io { .. } | CodegenError::Model(_))
    }

    pub(crate) fn undeclared(entity: &str, attribute: &str) -> Self {
        CodegenError::UndeclaredColumnType {
            entity: entity.to_string(),
            attribute: attribute.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CodegenError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type CodegenResult<T> = Result<T, CodegenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_attribute_and_entity() {
        let err = CodegenError::undeclared("user", "name");
        assert_eq!(
            err.to_string(),
            "'columnType' of attribute 'name' in entity 'user' is not declared"
        );

        let err = CodegenError::UnknownEntity {
            entity: "employee".into(),
            attribute: "manager".into(),
            target: "boss".into(),
        };
        let message = err.to_string();
        assert!(message.contains("'manager'"));
        assert!(message.contains("'employee'"));
        assert!(message.contains("unknown entity"));
    }

    #[test]
    fn test_configuration_defect_classification() {
        assert!(CodegenError::undeclared("a", "b").is_configuration_defect());
        let io = CodegenError::io("x", std::io::Error::other("boom"));
        assert!(!io.is_configuration_defect());
    }
}
