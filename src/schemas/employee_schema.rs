// Employee entity - self reference and a cross-package relationship

use crate::ent_framework::{BasicType, ColumnType, EntitySetBuilder};

pub fn declare(builder: EntitySetBuilder) -> EntitySetBuilder {
    builder.entity("employee", "com.example.model", |e| {
        e.entity_name("Staff").table_name("employees").table_schema("hr");
        e.attribute("id", ColumnType::id_long(true));
        e.attribute("version", ColumnType::version_long());
        e.attribute("name", ColumnType::string(Some(100))).not_null();
        e.attribute("salary", ColumnType::big_decimal(Some(10), Some(2)));
        e.attribute("hiredOn", ColumnType::Basic(BasicType::LocalDateTime))
            .column_name("hired_on")
            .updatable(false);
        e.attribute("badge", ColumnType::Basic(BasicType::Uuid)).unique(true);
        e.attribute("photo", ColumnType::Basic(BasicType::ByteArray));
        e.attribute("manager", ColumnType::many_to_one("employee"))
            .column_name("manager_id");
        e.attribute("department", ColumnType::many_to_one("department"))
            .column_name("department_key")
            .insertable(false);
    })
}
