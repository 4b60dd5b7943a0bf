// Naming and formatting helpers shared by every generator

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::ent_framework::{resolve_target, Attribute, ColumnType, Entity, EntitySet, ScalarType};
use crate::error::CodegenResult;

/// Target language of an artifact. Decides statement terminators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Kotlin,
    Java,
}

impl Language {
    pub fn extension(self) -> &'static str {
        match self {
            Language::Kotlin => "kt",
            Language::Java => "java",
        }
    }

    fn terminator(self) -> &'static str {
        match self {
            Language::Kotlin => "",
            Language::Java => ";",
        }
    }

    pub fn import(self, qualified: &str) -> String {
        format!("import {}{}", qualified, self.terminator())
    }
}

/// Title-case the first character when it is lower-case.
pub fn capitalized(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => {
            let mut result = titlecase(first);
            result.extend(chars);
            result
        }
        _ => s.to_string(),
    }
}

/// Title case of a single character. Differs from upper case for the Latin
/// digraphs and for characters whose upper case expands to several
/// characters, where only the first one stays upper-case.
fn titlecase(c: char) -> String {
    match c {
        '\u{01C4}'..='\u{01C6}' => '\u{01C5}'.to_string(),
        '\u{01C7}'..='\u{01C9}' => '\u{01C8}'.to_string(),
        '\u{01CA}'..='\u{01CC}' => '\u{01CB}'.to_string(),
        '\u{01F1}'..='\u{01F3}' => '\u{01F2}'.to_string(),
        // ŉ keeps its full upper-case expansion
        '\u{0149}' => c.to_uppercase().collect(),
        _ => {
            let mut upper = c.to_uppercase();
            let mut result = String::new();
            if let Some(first) = upper.next() {
                result.push(first);
            }
            result.extend(upper.flat_map(char::to_lowercase));
            result
        }
    }
}

/// Lower-case the first character.
pub fn decapitalized(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Directory of a package relative to the output root: dots become separators.
pub fn package_dir(package_name: &str) -> PathBuf {
    package_name
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Name of the persisted entity type, e.g. `user` -> `UserEntity`.
pub fn entity_type_name(entity: &Entity) -> String {
    format!("{}Entity", capitalized(&entity.name))
}

/// Property as seen by client-facing types: relationships collapse to the
/// target identifier, named `<attribute><Identifier>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatProperty {
    pub name: String,
    pub scalar: ScalarType,
}

pub fn flattened_property(
    entities: &EntitySet,
    entity: &Entity,
    attribute: &Attribute,
) -> CodegenResult<FlatProperty> {
    let name = decapitalized(&attribute.name);
    let property = match attribute.column_type(entity)? {
        ColumnType::Id { id_type, .. } => FlatProperty { name, scalar: id_type.scalar() },
        ColumnType::Version { version_type } => FlatProperty { name, scalar: version_type.scalar() },
        ColumnType::Basic(basic) => FlatProperty { name, scalar: basic.scalar() },
        ColumnType::ManyToOne { target } => {
            let resolved = resolve_target(entities, entity, attribute, target)?;
            FlatProperty {
                name: format!("{}{}", name, capitalized(&resolved.identifier.name)),
                scalar: resolved.id_kind.scalar(),
            }
        }
    };
    Ok(property)
}

/// Package statement plus sorted imports, each block followed by a blank line.
pub fn file_prelude(package_name: &str, imports: &BTreeSet<String>, language: Language) -> String {
    let mut prelude = String::new();
    if !package_name.trim().is_empty() {
        prelude.push_str(&format!("package {}{}\n\n", package_name, language.terminator()));
    }
    if !imports.is_empty() {
        for import in imports {
            prelude.push_str(import);
            prelude.push('\n');
        }
        prelude.push('\n');
    }
    prelude
}

/// Imports the attribute types of `entity` require.
///
/// Relationships are resolved here as well, so a broken target fails import
/// collection the same way it fails the generators.
pub fn add_type_imports(
    imports: &mut BTreeSet<String>,
    entities: &EntitySet,
    entity: &Entity,
    language: Language,
) -> CodegenResult<()> {
    for attribute in &entity.attributes {
        match attribute.column_type(entity)? {
            ColumnType::ManyToOne { target } => {
                let resolved = resolve_target(entities, entity, attribute, target)?;
                if let Some(qualified) = resolved.id_kind.scalar().qualified_import() {
                    imports.insert(language.import(qualified));
                }
                let target_package = resolved.entity.package_name.as_str();
                if target_package != entity.package_name {
                    let target_type = entity_type_name(resolved.entity);
                    if target_package.trim().is_empty() {
                        imports.insert(language.import(&target_type));
                    } else {
                        imports.insert(language.import(&format!("{target_package}.{target_type}")));
                    }
                }
            }
            other => {
                if let Some(qualified) = other.scalar().and_then(|s| s.qualified_import()) {
                    imports.insert(language.import(qualified));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ent_framework::{BasicType, EntitySetBuilder};

    #[test]
    fn test_casing() {
        assert_eq!(capitalized("user"), "User");
        assert_eq!(capitalized("User"), "User");
        assert_eq!(capitalized("id"), "Id");
        assert_eq!(capitalized("_id"), "_id");
        assert_eq!(capitalized(""), "");
        assert_eq!(decapitalized("Manager"), "manager");
    }

    #[test]
    fn test_capitalized_uses_title_case() {
        assert_eq!(capitalized("ǆx"), "ǅx");
        assert_eq!(capitalized("ǉubav"), "ǈubav");
        assert_eq!(capitalized("ǌ"), "ǋ");
        assert_eq!(capitalized("ǳ"), "ǲ");
        assert_eq!(capitalized("ǅx"), "ǅx");
        assert_eq!(capitalized("ßtraße"), "Sstraße");
        assert_eq!(capitalized("ŉx"), "ʼNx");
        assert_eq!(capitalized("éclair"), "Éclair");
        assert_eq!(decapitalized("id"), "id");
        assert_eq!(decapitalized("URL"), "uRL");
        assert_eq!(decapitalized(""), "");
    }

    #[test]
    fn test_package_dir() {
        assert_eq!(package_dir("com.example.hr"), PathBuf::from("com/example/hr"));
        assert_eq!(package_dir(""), PathBuf::new());
    }

    #[test]
    fn test_prelude_layout() {
        let imports: BTreeSet<String> = ["import b", "import a"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            file_prelude("com.example", &imports, Language::Kotlin),
            "package com.example\n\nimport a\nimport b\n\n"
        );
        assert_eq!(file_prelude("", &BTreeSet::new(), Language::Java), "");
        assert_eq!(file_prelude("x", &BTreeSet::new(), Language::Java), "package x;\n\n");
    }

    #[test]
    fn test_flattened_relationship_property() {
        let set = EntitySetBuilder::new()
            .entity("employee", "com.example", |e| {
                e.attribute("id", ColumnType::id_long(true));
                e.attribute("manager", ColumnType::many_to_one("employee"));
            })
            .build()
            .unwrap();
        let employee = set.get("employee").unwrap();
        let manager = employee.attribute("manager").unwrap();

        let property = flattened_property(&set, employee, manager).unwrap();
        assert_eq!(property.name, "managerId");
        assert_eq!(property.scalar, ScalarType::Long);
    }

    #[test]
    fn test_type_imports_cover_relationships() {
        let set = EntitySetBuilder::new()
            .entity("account", "com.example.billing", |e| {
                e.attribute("id", ColumnType::id_uuid(true));
            })
            .entity("root", "", |e| {
                e.attribute("id", ColumnType::id_long(false));
            })
            .entity("order", "com.example.shop", |e| {
                e.attribute("total", ColumnType::big_decimal(Some(10), Some(2)));
                e.attribute("placed", ColumnType::Basic(BasicType::ZonedDateTime));
                e.attribute("account", ColumnType::many_to_one("account"));
                e.attribute("root", ColumnType::many_to_one("root"));
            })
            .build()
            .unwrap();

        let mut imports = BTreeSet::new();
        add_type_imports(&mut imports, &set, set.get("order").unwrap(), Language::Java).unwrap();
        let imports: Vec<_> = imports.into_iter().collect();
        assert_eq!(
            imports,
            vec![
                "import RootEntity;",
                "import com.example.billing.AccountEntity;",
                "import java.math.BigDecimal;",
                "import java.time.ZonedDateTime;",
                "import java.util.UUID;",
            ]
        );
    }
}
