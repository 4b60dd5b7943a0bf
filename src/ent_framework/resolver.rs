// Relationship resolution - maps a many-to-one attribute onto its target entity
// and the target's identifier. Pure lookups, repeated at every call site.

use super::column_type::{ColumnType, IdKind};
use super::ent_schema::{Attribute, Entity, EntitySet};
use crate::error::{CodegenError, CodegenResult};

/// Target of a many-to-one attribute, resolved against the entity set.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedTarget<'a> {
    pub entity: &'a Entity,
    pub identifier: &'a Attribute,
    pub id_kind: IdKind,
}

/// Look up the entity a relationship points at.
///
/// `target` is matched exactly, case included.
pub fn resolve_entity<'a>(
    entities: &'a EntitySet,
    owner: &Entity,
    attribute: &Attribute,
    target: &str,
) -> CodegenResult<&'a Entity> {
    entities.get(target).ok_or_else(|| CodegenError::UnknownEntity {
        entity: owner.name.clone(),
        attribute: attribute.name.clone(),
        target: target.to_string(),
    })
}

/// Resolve a many-to-one attribute to its target entity and the first
/// identifier attribute declared on that entity.
pub fn resolve_target<'a>(
    entities: &'a EntitySet,
    owner: &Entity,
    attribute: &Attribute,
    target: &str,
) -> CodegenResult<ResolvedTarget<'a>> {
    let entity = resolve_entity(entities, owner, attribute, target)?;

    entity
        .attributes
        .iter()
        .find_map(|candidate| {
            candidate
                .column_type
                .as_ref()
                .and_then(ColumnType::id_kind)
                .map(|id_kind| ResolvedTarget { entity, identifier: candidate, id_kind })
        })
        .ok_or_else(|| CodegenError::MissingIdentifier {
            entity: owner.name.clone(),
            attribute: attribute.name.clone(),
            target: target.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ent_framework::BasicType;

    fn sample() -> EntitySet {
        let mut employee = Entity::new("employee", "com.example.hr");
        employee.attributes = vec![
            Attribute::new("code", Some(ColumnType::Basic(BasicType::Integer))),
            Attribute::new("id", Some(ColumnType::id_long(true))),
            Attribute::new("altId", Some(ColumnType::id_uuid(false))),
            Attribute::new("manager", Some(ColumnType::many_to_one("employee"))),
            Attribute::new("mentor", Some(ColumnType::many_to_one("Employee"))),
            Attribute::new("team", Some(ColumnType::many_to_one("team"))),
        ];
        let mut team = Entity::new("team", "com.example.hr");
        team.attributes = vec![Attribute::new("label", Some(ColumnType::string(None)))];
        EntitySet::from_entities(vec![employee, team]).unwrap()
    }

    fn resolve<'a>(set: &'a EntitySet, attribute: &str) -> CodegenResult<ResolvedTarget<'a>> {
        let employee = set.get("employee").unwrap();
        let attribute = employee.attribute(attribute).unwrap();
        match attribute.column_type(employee)? {
            ColumnType::ManyToOne { target } => resolve_target(set, employee, attribute, target),
            other => panic!("not a relationship: {other:?}"),
        }
    }

    #[test]
    fn test_first_identifier_wins() {
        let set = sample();
        let resolved = resolve(&set, "manager").unwrap();
        assert_eq!(resolved.entity.name, "employee");
        assert_eq!(resolved.identifier.name, "id");
        assert_eq!(resolved.id_kind, IdKind::Long);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let set = sample();
        let err = resolve(&set, "mentor").unwrap_err();
        match err {
            CodegenError::UnknownEntity { entity, attribute, target } => {
                assert_eq!(entity, "employee");
                assert_eq!(attribute, "mentor");
                assert_eq!(target, "Employee");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_target_without_identifier() {
        let set = sample();
        let err = resolve(&set, "team").unwrap_err();
        assert!(matches!(err, CodegenError::MissingIdentifier { .. }));
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let set = sample();
        let first = resolve(&set, "manager").unwrap();
        let second = resolve(&set, "manager").unwrap();
        assert!(std::ptr::eq(first.identifier, second.identifier));
        assert!(resolve(&set, "team").is_err());
        assert!(resolve(&set, "team").is_err());
    }
}
