// Entity schema model - the resolved description the generators read
// Built once per run (by the builder or from JSON) and never mutated afterwards

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::column_type::ColumnType;
use super::resolver;
use crate::error::{CodegenError, CodegenResult};

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Declarative validation marker attached to an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    NotNull,
    NotBlank,
    NotEmpty,
}

impl Constraint {
    pub fn annotation_name(self) -> &'static str {
        match self {
            Constraint::NotNull => "NotNull",
            Constraint::NotBlank => "NotBlank",
            Constraint::NotEmpty => "NotEmpty",
        }
    }
}

/// Attribute definition. Column flags are tri-state: `None` leaves the
/// property out of the generated annotation entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(default)]
    pub column_type: Option<ColumnType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_unique: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_insertable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_updatable: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
}

impl Attribute {
    pub fn new(name: &str, column_type: Option<ColumnType>) -> Self {
        Self {
            name: name.to_string(),
            column_type,
            column_name: None,
            column_unique: None,
            column_nullable: None,
            column_insertable: None,
            column_updatable: None,
            constraints: Vec::new(),
        }
    }

    /// Column type of this attribute, failing if it was never declared.
    pub fn column_type(&self, entity: &Entity) -> CodegenResult<&ColumnType> {
        self.column_type
            .as_ref()
            .ok_or_else(|| CodegenError::undeclared(&entity.name, &self.name))
    }

    /// Unset counts as insertable.
    pub fn is_insertable(&self) -> bool {
        self.column_insertable.unwrap_or(true)
    }

    /// Unset counts as updatable.
    pub fn is_updatable(&self) -> bool {
        self.column_updatable.unwrap_or(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(default)]
    pub package_name: String,
    /// Overrides the persisted entity name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_schema: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Entity {
    pub fn new(name: &str, package_name: &str) -> Self {
        Self {
            name: name.to_string(),
            package_name: package_name.to_string(),
            entity_name: None,
            table_name: None,
            table_schema: None,
            attributes: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// The full set of entities of a generation run, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Entity>", into = "Vec<Entity>")]
pub struct EntitySet {
    entities: IndexMap<String, Entity>,
}

impl EntitySet {
    /// Build a set, rejecting duplicate entity names and duplicate attribute
    /// names within an entity.
    pub fn from_entities(entities: Vec<Entity>) -> CodegenResult<Self> {
        let mut map = IndexMap::with_capacity(entities.len());
        for entity in entities {
            for (i, attribute) in entity.attributes.iter().enumerate() {
                if entity.attributes[..i].iter().any(|a| a.name == attribute.name) {
                    return Err(CodegenError::DuplicateAttribute {
                        entity: entity.name.clone(),
                        attribute: attribute.name.clone(),
                    });
                }
            }
            if map.contains_key(&entity.name) {
                return Err(CodegenError::DuplicateEntity { entity: entity.name });
            }
            map.insert(entity.name.clone(), entity);
        }
        Ok(Self { entities: map })
    }

    /// Parse a JSON array of entities.
    pub fn from_json(json: &str) -> CodegenResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Check the whole model up front and report every defect found.
    ///
    /// Generation never relies on this; each generator still resolves lazily
    /// and fails on the first defect it meets.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for entity in self.iter() {
            if !IDENTIFIER.is_match(&entity.name) {
                errors.push(format!("entity name '{}' is not a valid identifier", entity.name));
            }
            for attribute in &entity.attributes {
                if !IDENTIFIER.is_match(&attribute.name) {
                    errors.push(format!(
                        "attribute name '{}' in entity '{}' is not a valid identifier",
                        attribute.name, entity.name
                    ));
                }
                match attribute.column_type(entity) {
                    Err(e) => errors.push(e.to_string()),
                    Ok(ColumnType::ManyToOne { target }) => {
                        if let Err(e) = resolver::resolve_target(self, entity, attribute, target) {
                            errors.push(e.to_string());
                        }
                    }
                    Ok(_) => {}
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl TryFrom<Vec<Entity>> for EntitySet {
    type Error = CodegenError;

    fn try_from(entities: Vec<Entity>) -> Result<Self, Self::Error> {
        Self::from_entities(entities)
    }
}

impl From<EntitySet> for Vec<Entity> {
    fn from(set: EntitySet) -> Self {
        set.entities.into_values().collect()
    }
}

impl<'a> IntoIterator for &'a EntitySet {
    type Item = &'a Entity;
    type IntoIter = indexmap::map::Values<'a, String, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity_with(name: &str, attributes: Vec<Attribute>) -> Entity {
        let mut entity = Entity::new(name, "com.example");
        entity.attributes = attributes;
        entity
    }

    #[test]
    fn test_duplicate_entity_rejected() {
        let result = EntitySet::from_entities(vec![
            entity_with("user", vec![]),
            entity_with("user", vec![]),
        ]);
        assert!(matches!(result, Err(CodegenError::DuplicateEntity { .. })));
    }

    #[test]
    fn test_duplicate_attribute_rejected() {
        let result = EntitySet::from_entities(vec![entity_with(
            "user",
            vec![
                Attribute::new("id", Some(ColumnType::id_long(true))),
                Attribute::new("id", Some(ColumnType::id_long(true))),
            ],
        )]);
        assert!(matches!(result, Err(CodegenError::DuplicateAttribute { .. })));
    }

    #[test]
    fn test_declaration_order_preserved() {
        let set = EntitySet::from_entities(vec![
            entity_with("zeta", vec![]),
            entity_with("alpha", vec![]),
        ])
        .unwrap();
        let names: Vec<_> = set.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_missing_column_type_fails_on_read() {
        let entity = entity_with("user", vec![Attribute::new("name", None)]);
        let err = entity.attributes[0].column_type(&entity).unwrap_err();
        assert!(matches!(err, CodegenError::UndeclaredColumnType { .. }));
    }

    #[test]
    fn test_validate_collects_all_defects() {
        let set = EntitySet::from_entities(vec![entity_with(
            "employee",
            vec![
                Attribute::new("id", Some(ColumnType::id_long(true))),
                Attribute::new("nickname", None),
                Attribute::new("manager", Some(ColumnType::many_to_one("boss"))),
                Attribute::new("bad-name", Some(ColumnType::string(None))),
            ],
        )])
        .unwrap();

        let errors = set.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("nickname")));
        assert!(errors.iter().any(|e| e.contains("unknown entity")));
        assert!(errors.iter().any(|e| e.contains("bad-name")));
    }

    #[test]
    fn test_json_round_trip_keeps_tri_state_flags() {
        let json = r#"[{
            "name": "user",
            "package_name": "com.example",
            "attributes": [
                {"name": "id", "column_type": {"category": "id", "id_type": "long", "auto_generated": true}},
                {"name": "code", "column_type": {"category": "basic", "type": "string"}, "column_updatable": false}
            ]
        }]"#;
        let set = EntitySet::from_json(json).unwrap();
        let user = set.get("user").unwrap();
        let code = user.attribute("code").unwrap();
        assert_eq!(code.column_updatable, Some(false));
        assert_eq!(code.column_insertable, None);
        assert!(code.is_insertable());
        assert!(!code.is_updatable());
        assert!(set.get("User").is_none());
    }
}
