// Query vocabulary generator - <Entity>OrdersPredicates.kt
use std::collections::BTreeSet;

use super::utils::{self, Language};
use crate::ent_framework::{ColumnType, Entity, EntitySet};
use crate::error::CodegenResult;

/// Operand shape of a predicate case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Singleton case without operands.
    Nullary,
    /// One operand `x`.
    Unary,
    /// Two operands `x` and `y`.
    Binary,
}

/// Filtering operators offered per attribute, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateOperator {
    Between,
    Equal,
    GreaterThan,
    GreaterThanOrEqualTo,
    IsNotNull,
    IsNull,
    LessThan,
    LessThanOrEqualTo,
    Like,
    NotBetween,
    NotEqual,
    NotGreaterThan,
    NotGreaterThanOrEqualTo,
    NotLessThan,
    NotLessThanOrEqualTo,
    NotLike,
}

impl PredicateOperator {
    pub const ALL: [PredicateOperator; 16] = [
        PredicateOperator::Between,
        PredicateOperator::Equal,
        PredicateOperator::GreaterThan,
        PredicateOperator::GreaterThanOrEqualTo,
        PredicateOperator::IsNotNull,
        PredicateOperator::IsNull,
        PredicateOperator::LessThan,
        PredicateOperator::LessThanOrEqualTo,
        PredicateOperator::Like,
        PredicateOperator::NotBetween,
        PredicateOperator::NotEqual,
        PredicateOperator::NotGreaterThan,
        PredicateOperator::NotGreaterThanOrEqualTo,
        PredicateOperator::NotLessThan,
        PredicateOperator::NotLessThanOrEqualTo,
        PredicateOperator::NotLike,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PredicateOperator::Between => "Between",
            PredicateOperator::Equal => "Equal",
            PredicateOperator::GreaterThan => "GreaterThan",
            PredicateOperator::GreaterThanOrEqualTo => "GreaterThanOrEqualTo",
            PredicateOperator::IsNotNull => "IsNotNull",
            PredicateOperator::IsNull => "IsNull",
            PredicateOperator::LessThan => "LessThan",
            PredicateOperator::LessThanOrEqualTo => "LessThanOrEqualTo",
            PredicateOperator::Like => "Like",
            PredicateOperator::NotBetween => "NotBetween",
            PredicateOperator::NotEqual => "NotEqual",
            PredicateOperator::NotGreaterThan => "NotGreaterThan",
            PredicateOperator::NotGreaterThanOrEqualTo => "NotGreaterThanOrEqualTo",
            PredicateOperator::NotLessThan => "NotLessThan",
            PredicateOperator::NotLessThanOrEqualTo => "NotLessThanOrEqualTo",
            PredicateOperator::NotLike => "NotLike",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            PredicateOperator::IsNotNull | PredicateOperator::IsNull => Arity::Nullary,
            PredicateOperator::Between | PredicateOperator::NotBetween => Arity::Binary,
            _ => Arity::Unary,
        }
    }

    /// Pattern operators, only offered for string attributes.
    pub fn is_textual(self) -> bool {
        matches!(self, PredicateOperator::Like | PredicateOperator::NotLike)
    }

    /// Criteria call building this predicate over `path`.
    ///
    /// Negated comparisons have no direct criteria method and are wrapped in
    /// `not(...)`; `notEqual` and `notLike` exist as such.
    pub fn criteria_call(self, path: &str) -> String {
        let (method, negated) = match self {
            PredicateOperator::Between => ("between", false),
            PredicateOperator::Equal => ("equal", false),
            PredicateOperator::GreaterThan => ("greaterThan", false),
            PredicateOperator::GreaterThanOrEqualTo => ("greaterThanOrEqualTo", false),
            PredicateOperator::IsNotNull => ("isNotNull", false),
            PredicateOperator::IsNull => ("isNull", false),
            PredicateOperator::LessThan => ("lessThan", false),
            PredicateOperator::LessThanOrEqualTo => ("lessThanOrEqualTo", false),
            PredicateOperator::Like => ("like", false),
            PredicateOperator::NotBetween => ("between", true),
            PredicateOperator::NotEqual => ("notEqual", false),
            PredicateOperator::NotGreaterThan => ("greaterThan", true),
            PredicateOperator::NotGreaterThanOrEqualTo => ("greaterThanOrEqualTo", true),
            PredicateOperator::NotLessThan => ("lessThan", true),
            PredicateOperator::NotLessThanOrEqualTo => ("lessThanOrEqualTo", true),
            PredicateOperator::NotLike => ("notLike", false),
        };
        let operands = match self.arity() {
            Arity::Nullary => String::new(),
            Arity::Unary => ", this.x".to_string(),
            Arity::Binary => ", this.x, this.y".to_string(),
        };
        let call = format!("criteriaBuilder.{method}({path}{operands})");
        if negated {
            format!("criteriaBuilder.not({call})")
        } else {
            call
        }
    }

    /// Operators available for an attribute of the given column type.
    pub fn operators_for(column_type: &ColumnType) -> impl Iterator<Item = PredicateOperator> {
        let textual = column_type.is_string();
        Self::ALL.into_iter().filter(move |op| textual || !op.is_textual())
    }
}

pub struct OrdersPredicatesGenerator<'a> {
    entities: &'a EntitySet,
}

impl<'a> OrdersPredicatesGenerator<'a> {
    pub fn new(entities: &'a EntitySet) -> Self {
        Self { entities }
    }

    pub fn generate(&self, entity: &Entity) -> CodegenResult<String> {
        let mut imports = BTreeSet::new();
        utils::add_type_imports(&mut imports, self.entities, entity, Language::Kotlin)?;

        let mut content = utils::file_prelude(&entity.package_name, &imports, Language::Kotlin);
        content.push_str(&self.generate_orders(entity));
        content.push_str(&self.generate_predicates(entity)?);
        Ok(content)
    }

    fn generate_orders(&self, entity: &Entity) -> String {
        let name = utils::capitalized(&entity.name);
        let mut content = format!("sealed class {name}Order {{\n");
        for attribute in &entity.attributes {
            let case = utils::capitalized(&attribute.name);
            content.push_str(&format!("    sealed class {case}: {name}Order() {{\n"));
            content.push_str(&format!("        object Ascending: {case}()\n"));
            content.push_str(&format!("        object Descending: {case}()\n"));
            content.push_str("    }\n");
        }
        content.push_str("}\n\n");
        content
    }

    fn generate_predicates(&self, entity: &Entity) -> CodegenResult<String> {
        let name = utils::capitalized(&entity.name);
        let mut content = format!("sealed class {name}Predicate {{\n");
        for attribute in &entity.attributes {
            let case = utils::capitalized(&attribute.name);
            let column_type = attribute.column_type(entity)?;
            let operand = utils::flattened_property(self.entities, entity, attribute)?.scalar;
            let operand = operand.kotlin_name();

            content.push_str(&format!("    sealed class {case}: {name}Predicate() {{\n"));
            for operator in PredicateOperator::operators_for(column_type) {
                let op = operator.name();
                let line = match operator.arity() {
                    Arity::Nullary => format!("        object {op}: {case}()\n"),
                    Arity::Unary => format!("        class {op}(val x: {operand}): {case}()\n"),
                    Arity::Binary => {
                        format!("        class {op}(val x: {operand}, val y: {operand}): {case}()\n")
                    }
                };
                content.push_str(&line);
            }
            content.push_str("    }\n");
        }
        content.push_str("}\n\n");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ent_framework::{BasicType, EntitySetBuilder};

    #[test]
    fn test_operator_sets() {
        let common: Vec<_> = PredicateOperator::operators_for(&ColumnType::id_long(true)).collect();
        assert_eq!(common.len(), 14);
        assert!(!common.contains(&PredicateOperator::Like));
        assert!(!common.contains(&PredicateOperator::NotLike));

        let textual: Vec<_> = PredicateOperator::operators_for(&ColumnType::string(None)).collect();
        assert_eq!(textual.len(), 16);
        assert_eq!(textual[8], PredicateOperator::Like);
        assert_eq!(textual[15], PredicateOperator::NotLike);
    }

    #[test]
    fn test_criteria_calls() {
        let path = "root[UserEntity_.name]";
        assert_eq!(
            PredicateOperator::Between.criteria_call(path),
            "criteriaBuilder.between(root[UserEntity_.name], this.x, this.y)"
        );
        assert_eq!(
            PredicateOperator::IsNull.criteria_call(path),
            "criteriaBuilder.isNull(root[UserEntity_.name])"
        );
        assert_eq!(
            PredicateOperator::NotBetween.criteria_call(path),
            "criteriaBuilder.not(criteriaBuilder.between(root[UserEntity_.name], this.x, this.y))"
        );
        assert_eq!(
            PredicateOperator::NotEqual.criteria_call(path),
            "criteriaBuilder.notEqual(root[UserEntity_.name], this.x)"
        );
        assert_eq!(
            PredicateOperator::NotLessThanOrEqualTo.criteria_call(path),
            "criteriaBuilder.not(criteriaBuilder.lessThanOrEqualTo(root[UserEntity_.name], this.x))"
        );
    }

    #[test]
    fn test_orders_and_predicates() {
        let set = EntitySetBuilder::new()
            .entity("user", "com.example", |e| {
                e.attribute("id", ColumnType::id_long(true));
                e.attribute("name", ColumnType::string(Some(50)));
            })
            .build()
            .unwrap();

        let text = OrdersPredicatesGenerator::new(&set)
            .generate(set.get("user").unwrap())
            .unwrap();

        assert!(text.starts_with(
            "package com.example\n\
             \n\
             sealed class UserOrder {\n\
             \x20   sealed class Id: UserOrder() {\n\
             \x20       object Ascending: Id()\n\
             \x20       object Descending: Id()\n\
             \x20   }\n\
             \x20   sealed class Name: UserOrder() {\n\
             \x20       object Ascending: Name()\n\
             \x20       object Descending: Name()\n\
             \x20   }\n\
             }\n\
             \n\
             sealed class UserPredicate {\n\
             \x20   sealed class Id: UserPredicate() {\n\
             \x20       class Between(val x: Long, val y: Long): Id()\n\
             \x20       class Equal(val x: Long): Id()\n"
        ));
        assert!(text.contains("        object IsNotNull: Id()\n        object IsNull: Id()\n"));
        assert!(text.contains("        class Like(val x: String): Name()\n"));
        assert!(text.contains("        class NotLike(val x: String): Name()\n    }\n}\n\n"));
        assert_eq!(text.matches(": Id()\n").count(), 2 + 14);
        assert_eq!(text.matches(": Name()\n").count(), 2 + 16);
    }

    #[test]
    fn test_relationship_operand_is_target_identifier() {
        let set = EntitySetBuilder::new()
            .entity("team", "", |e| {
                e.attribute("key", ColumnType::id_uuid(true));
            })
            .entity("player", "", |e| {
                e.attribute("team", ColumnType::many_to_one("team"));
                e.attribute("joined", ColumnType::Basic(BasicType::LocalDateTime));
            })
            .build()
            .unwrap();

        let text = OrdersPredicatesGenerator::new(&set)
            .generate(set.get("player").unwrap())
            .unwrap();

        assert!(text.starts_with("import java.time.LocalDateTime\nimport java.util.UUID\n\n"));
        assert!(text.contains("        class Equal(val x: UUID): Team()\n"));
        assert!(text.contains("        class NotBetween(val x: LocalDateTime, val y: LocalDateTime): Joined()\n"));
        assert!(!text.contains("Like"));
    }
}
