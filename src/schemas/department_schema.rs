// Department entity - UUID key in its own package and schema

use crate::ent_framework::{ColumnType, EntitySetBuilder};

pub fn declare(builder: EntitySetBuilder) -> EntitySetBuilder {
    builder.entity("department", "com.example.org", |e| {
        e.table_name("departments").table_schema("hr");
        e.attribute("key", ColumnType::id_uuid(true));
        e.attribute("title", ColumnType::string(Some(80))).not_blank();
        e.attribute("budget", ColumnType::big_decimal(Some(12), Some(2)));
    })
}
