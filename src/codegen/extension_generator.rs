// Query and copy helpers generator - <Entity>Extension.kt
use std::collections::BTreeSet;

use super::orders_predicates_generator::{Arity, PredicateOperator};
use super::utils::{self, Language};
use crate::ent_framework::{resolve_target, Attribute, ColumnType, Entity, EntitySet};
use crate::error::CodegenResult;

/// Which column flag gates a copy from the contract into a persisted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CopyMode {
    Insertable,
    Updatable,
}

impl CopyMode {
    fn function_name(self) -> &'static str {
        match self {
            CopyMode::Insertable => "copyInsertablePropertiesTo",
            CopyMode::Updatable => "copyUpdatablePropertiesTo",
        }
    }

    fn allows(self, attribute: &Attribute) -> bool {
        match self {
            CopyMode::Insertable => attribute.is_insertable(),
            CopyMode::Updatable => attribute.is_updatable(),
        }
    }
}

pub struct ExtensionGenerator<'a> {
    entities: &'a EntitySet,
}

impl<'a> ExtensionGenerator<'a> {
    pub fn new(entities: &'a EntitySet) -> Self {
        Self { entities }
    }

    pub fn generate(&self, entity: &Entity) -> CodegenResult<String> {
        let mut imports = BTreeSet::new();
        imports.insert(Language::Kotlin.import("jakarta.persistence.*"));
        imports.insert(Language::Kotlin.import("jakarta.persistence.criteria.*"));
        utils::add_type_imports(&mut imports, self.entities, entity, Language::Kotlin)?;
        self.add_metamodel_imports(&mut imports, entity)?;

        let mut content = utils::file_prelude(&entity.package_name, &imports, Language::Kotlin);
        content.push_str(&self.generate_to_order(entity)?);
        content.push_str(&self.generate_to_predicate(entity)?);
        content.push_str(&generate_count(entity));
        content.push_str(&generate_list(entity));
        content.push_str(&self.generate_copy_into_entity(entity, CopyMode::Insertable)?);
        content.push_str(&self.generate_copy_into_entity(entity, CopyMode::Updatable)?);
        content.push_str(&self.generate_copy_into_data(entity)?);
        Ok(content)
    }

    /// Criteria paths into a relationship name the target's metamodel, which
    /// needs an import when it lives in another package.
    fn add_metamodel_imports(&self, imports: &mut BTreeSet<String>, entity: &Entity) -> CodegenResult<()> {
        for attribute in &entity.attributes {
            if let ColumnType::ManyToOne { target } = attribute.column_type(entity)? {
                let resolved = resolve_target(self.entities, entity, attribute, target)?;
                let target_package = resolved.entity.package_name.as_str();
                if target_package == entity.package_name {
                    continue;
                }
                let metamodel = format!("{}_", utils::entity_type_name(resolved.entity));
                if target_package.trim().is_empty() {
                    imports.insert(Language::Kotlin.import(&metamodel));
                } else {
                    imports.insert(Language::Kotlin.import(&format!("{target_package}.{metamodel}")));
                }
            }
        }
        Ok(())
    }

    /// Criteria path of an attribute; relationships navigate to the target
    /// identifier.
    fn attribute_path(&self, entity: &Entity, attribute: &Attribute) -> CodegenResult<String> {
        let mut path = format!(
            "root[{}_.{}]",
            utils::entity_type_name(entity),
            utils::decapitalized(&attribute.name)
        );
        if let ColumnType::ManyToOne { target } = attribute.column_type(entity)? {
            let resolved = resolve_target(self.entities, entity, attribute, target)?;
            path.push_str(&format!(
                "[{}_.{}]",
                utils::entity_type_name(resolved.entity),
                utils::decapitalized(&resolved.identifier.name)
            ));
        }
        Ok(path)
    }

    fn generate_to_order(&self, entity: &Entity) -> CodegenResult<String> {
        let name = utils::capitalized(&entity.name);
        let mut content = format!(
            "fun {name}Order.toOrder(criteriaBuilder: CriteriaBuilder, root: From<*, {name}Entity>): Order {{\n"
        );
        content.push_str("    return when (this) {\n");
        for attribute in &entity.attributes {
            let case = utils::capitalized(&attribute.name);
            let path = self.attribute_path(entity, attribute)?;
            content.push_str(&format!(
                "        {name}Order.{case}.Ascending -> criteriaBuilder.asc({path})\n"
            ));
            content.push_str(&format!(
                "        {name}Order.{case}.Descending -> criteriaBuilder.desc({path})\n"
            ));
        }
        content.push_str("    }\n}\n\n");
        Ok(content)
    }

    fn generate_to_predicate(&self, entity: &Entity) -> CodegenResult<String> {
        let name = utils::capitalized(&entity.name);
        let mut content = format!(
            "fun {name}Predicate.toPredicate(criteriaBuilder: CriteriaBuilder, root: From<*, {name}Entity>): Predicate {{\n"
        );
        content.push_str("    return when (this) {\n");
        for attribute in &entity.attributes {
            let case = utils::capitalized(&attribute.name);
            let path = self.attribute_path(entity, attribute)?;
            for operator in PredicateOperator::operators_for(attribute.column_type(entity)?) {
                // singleton cases match by value, the rest by type
                let matcher = if operator.arity() == Arity::Nullary { "" } else { "is " };
                content.push_str(&format!(
                    "        {matcher}{name}Predicate.{case}.{} -> {}\n",
                    operator.name(),
                    operator.criteria_call(&path)
                ));
            }
        }
        content.push_str("    }\n}\n\n");
        Ok(content)
    }

    fn generate_copy_into_entity(&self, entity: &Entity, mode: CopyMode) -> CodegenResult<String> {
        let name = utils::capitalized(&entity.name);
        let mut content = String::from("@Suppress(\"UNUSED_PARAMETER\")\n");
        content.push_str(&format!(
            "fun I{name}.{}(entityManager: EntityManager, entity: {name}Entity) {{\n",
            mode.function_name()
        ));
        for attribute in &entity.attributes {
            if !mode.allows(attribute) {
                continue;
            }
            let column_type = attribute.column_type(entity)?;
            if column_type.is_managed() {
                continue;
            }
            let property = utils::decapitalized(&attribute.name);
            match column_type {
                ColumnType::ManyToOne { target } => {
                    let resolved = resolve_target(self.entities, entity, attribute, target)?;
                    let foreign_key = format!("{property}{}", utils::capitalized(&resolved.identifier.name));
                    content.push_str(&format!(
                        "    entity.{property} = if (this.{foreign_key} == null) {{\n"
                    ));
                    content.push_str("        null\n");
                    content.push_str("    } else {\n");
                    content.push_str(&format!(
                        "        entityManager.find({}::class.java, this.{foreign_key})\n",
                        utils::entity_type_name(resolved.entity)
                    ));
                    content.push_str("    }\n");
                }
                _ => content.push_str(&format!("    entity.{property} = this.{property}\n")),
            }
        }
        content.push_str("}\n\n");
        Ok(content)
    }

    fn generate_copy_into_data(&self, entity: &Entity) -> CodegenResult<String> {
        let name = utils::capitalized(&entity.name);
        let mut content = format!("fun {name}Entity.copyPropertiesTo(data: I{name}) {{\n");
        for attribute in &entity.attributes {
            let property = utils::decapitalized(&attribute.name);
            match attribute.column_type(entity)? {
                ColumnType::ManyToOne { target } => {
                    let resolved = resolve_target(self.entities, entity, attribute, target)?;
                    content.push_str(&format!(
                        "    data.{property}{} = this.{property}?.{}\n",
                        utils::capitalized(&resolved.identifier.name),
                        utils::decapitalized(&resolved.identifier.name)
                    ));
                }
                _ => content.push_str(&format!("    data.{property} = this.{property}\n")),
            }
        }
        content.push_str("}\n\n");
        Ok(content)
    }
}

fn generate_count(entity: &Entity) -> String {
    let name = utils::capitalized(&entity.name);
    let mut content = format!(
        "fun EntityManager.count{name}(distinct: Boolean = false, filtering: List<{name}Predicate> = emptyList()): Long {{\n"
    );
    content.push_str("    val criteriaBuilder = this.criteriaBuilder\n");
    content.push_str("    val criteriaQuery = criteriaBuilder.createQuery(Long::class.java)\n");
    content.push_str(&format!("    val root = criteriaQuery.from({name}Entity::class.java)\n"));
    content.push_str("    criteriaQuery.select(criteriaBuilder.count(root))\n");
    content.push_str("    criteriaQuery.distinct(distinct)\n");
    content.push_str(PREDICATES_BLOCK);
    content.push_str("    if (predicates.isNotEmpty()) {\n");
    content.push_str("        criteriaQuery.where(*predicates.toTypedArray())\n");
    content.push_str("    }\n");
    content.push_str("    val typedQuery = this.createQuery(criteriaQuery)\n");
    content.push_str("    return typedQuery.singleResult\n");
    content.push_str("}\n\n");
    content
}

fn generate_list(entity: &Entity) -> String {
    let name = utils::capitalized(&entity.name);
    let mut content = format!(
        "fun EntityManager.list{name}(distinct: Boolean = false, filtering: List<{name}Predicate> = emptyList(), \
         ordering: List<{name}Order> = emptyList(), lockMode: LockModeType = LockModeType.NONE, \
         firstResult: Int = -1, maxResults: Int = -1): List<{name}Entity> {{\n"
    );
    content.push_str("    val criteriaBuilder = this.criteriaBuilder\n");
    content.push_str(&format!("    val criteriaQuery = criteriaBuilder.createQuery({name}Entity::class.java)\n"));
    content.push_str(&format!("    val root = criteriaQuery.from({name}Entity::class.java)\n"));
    content.push_str("    criteriaQuery.select(root)\n");
    content.push_str("    criteriaQuery.distinct(distinct)\n");
    content.push_str(PREDICATES_BLOCK);
    content.push_str("    val orders = buildList {\n");
    content.push_str("        for (order in ordering) {\n");
    content.push_str("            add(order.toOrder(criteriaBuilder, root))\n");
    content.push_str("        }\n");
    content.push_str("    }\n");
    content.push_str("    if (predicates.isNotEmpty()) {\n");
    content.push_str("        criteriaQuery.where(*predicates.toTypedArray())\n");
    content.push_str("    }\n");
    content.push_str("    if (ordering.isNotEmpty()) {\n");
    content.push_str("        criteriaQuery.orderBy(*orders.toTypedArray())\n");
    content.push_str("    }\n");
    content.push_str("    val typedQuery = this.createQuery(criteriaQuery)\n");
    content.push_str("    typedQuery.setLockMode(lockMode)\n");
    content.push_str("    if (firstResult >= 0) {\n");
    content.push_str("        typedQuery.setFirstResult(firstResult)\n");
    content.push_str("    }\n");
    content.push_str("    if (maxResults >= 0) {\n");
    content.push_str("        typedQuery.setMaxResults(maxResults)\n");
    content.push_str("    }\n");
    content.push_str("    return typedQuery.resultList\n");
    content.push_str("}\n\n");
    content
}

const PREDICATES_BLOCK: &str = "    val predicates = buildList {\n\
                                \x20       for (predicate in filtering) {\n\
                                \x20           add(predicate.toPredicate(criteriaBuilder, root))\n\
                                \x20       }\n\
                                \x20   }\n";
