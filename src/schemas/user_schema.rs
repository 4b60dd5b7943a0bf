// User entity - surrogate key, optimistic locking and basic columns

use crate::ent_framework::{BasicType, ColumnType, EntitySetBuilder};

pub fn declare(builder: EntitySetBuilder) -> EntitySetBuilder {
    builder.entity("user", "com.example.model", |e| {
        e.table_name("users");
        e.attribute("id", ColumnType::id_long(true));
        e.attribute("version", ColumnType::version_integer());
        e.attribute("name", ColumnType::string(Some(50)))
            .nullable(false)
            .not_null()
            .not_blank();
        e.attribute("email", ColumnType::string(Some(120)))
            .unique(true)
            .not_empty();
        e.attribute("active", ColumnType::Basic(BasicType::Boolean));
        e.attribute("createdAt", ColumnType::Basic(BasicType::ZonedDateTime))
            .column_name("created_at")
            .updatable(false);
    })
}
