// Column type taxonomy - the closed set of attribute kinds the generators understand

use serde::{Deserialize, Serialize};

/// Column type of an attribute.
///
/// Every generator matches on this exhaustively, so adding a variant forces
/// each artifact kind to decide what it emits for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ColumnType {
    /// Primary key of the entity
    Id {
        id_type: IdKind,
        #[serde(default)]
        auto_generated: bool,
    },
    /// Optimistic locking counter
    Version { version_type: VersionKind },
    Basic(BasicType),
    /// Owning side of a many-to-one relationship, keyed by target entity name
    ManyToOne { target: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdKind {
    Integer,
    Long,
    Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionKind {
    Integer,
    Long,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BasicType {
    Integer,
    Long,
    Boolean,
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length: Option<u32>,
    },
    BigDecimal {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        precision: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale: Option<u32>,
    },
    ByteArray,
    Uuid,
    LocalDateTime,
    ZonedDateTime,
}

/// Scalar a column maps to in the generated sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Int,
    Long,
    Boolean,
    String,
    BigDecimal,
    ByteArray,
    Uuid,
    LocalDateTime,
    ZonedDateTime,
}

impl ScalarType {
    pub fn kotlin_name(self) -> &'static str {
        match self {
            ScalarType::Int => "Int",
            ScalarType::Long => "Long",
            ScalarType::Boolean => "Boolean",
            ScalarType::String => "String",
            ScalarType::BigDecimal => "BigDecimal",
            ScalarType::ByteArray => "ByteArray",
            ScalarType::Uuid => "UUID",
            ScalarType::LocalDateTime => "LocalDateTime",
            ScalarType::ZonedDateTime => "ZonedDateTime",
        }
    }

    pub fn java_name(self) -> &'static str {
        match self {
            ScalarType::Int => "Integer",
            ScalarType::Long => "Long",
            ScalarType::Boolean => "Boolean",
            ScalarType::String => "String",
            ScalarType::BigDecimal => "BigDecimal",
            ScalarType::ByteArray => "byte[]",
            ScalarType::Uuid => "UUID",
            ScalarType::LocalDateTime => "LocalDateTime",
            ScalarType::ZonedDateTime => "ZonedDateTime",
        }
    }

    /// Fully qualified name the scalar must be imported from, if any.
    pub fn qualified_import(self) -> Option<&'static str> {
        match self {
            ScalarType::Uuid => Some("java.util.UUID"),
            ScalarType::BigDecimal => Some("java.math.BigDecimal"),
            ScalarType::LocalDateTime => Some("java.time.LocalDateTime"),
            ScalarType::ZonedDateTime => Some("java.time.ZonedDateTime"),
            ScalarType::Int
            | ScalarType::Long
            | ScalarType::Boolean
            | ScalarType::String
            | ScalarType::ByteArray => None,
        }
    }
}

impl IdKind {
    pub fn scalar(self) -> ScalarType {
        match self {
            IdKind::Integer => ScalarType::Int,
            IdKind::Long => ScalarType::Long,
            IdKind::Uuid => ScalarType::Uuid,
        }
    }
}

impl VersionKind {
    pub fn scalar(self) -> ScalarType {
        match self {
            VersionKind::Integer => ScalarType::Int,
            VersionKind::Long => ScalarType::Long,
        }
    }
}

impl BasicType {
    pub fn scalar(&self) -> ScalarType {
        match self {
            BasicType::Integer => ScalarType::Int,
            BasicType::Long => ScalarType::Long,
            BasicType::Boolean => ScalarType::Boolean,
            BasicType::String { .. } => ScalarType::String,
            BasicType::BigDecimal { .. } => ScalarType::BigDecimal,
            BasicType::ByteArray => ScalarType::ByteArray,
            BasicType::Uuid => ScalarType::Uuid,
            BasicType::LocalDateTime => ScalarType::LocalDateTime,
            BasicType::ZonedDateTime => ScalarType::ZonedDateTime,
        }
    }
}

impl ColumnType {
    pub fn id_integer(auto_generated: bool) -> Self {
        ColumnType::Id { id_type: IdKind::Integer, auto_generated }
    }

    pub fn id_long(auto_generated: bool) -> Self {
        ColumnType::Id { id_type: IdKind::Long, auto_generated }
    }

    pub fn id_uuid(auto_generated: bool) -> Self {
        ColumnType::Id { id_type: IdKind::Uuid, auto_generated }
    }

    pub fn version_integer() -> Self {
        ColumnType::Version { version_type: VersionKind::Integer }
    }

    pub fn version_long() -> Self {
        ColumnType::Version { version_type: VersionKind::Long }
    }

    pub fn string(length: Option<u32>) -> Self {
        ColumnType::Basic(BasicType::String { length })
    }

    pub fn big_decimal(precision: Option<u32>, scale: Option<u32>) -> Self {
        ColumnType::Basic(BasicType::BigDecimal { precision, scale })
    }

    pub fn many_to_one(target: &str) -> Self {
        ColumnType::ManyToOne { target: target.to_string() }
    }

    /// Scalar for every non-relationship type. Relationships have no scalar of
    /// their own; they borrow the one of the target's identifier.
    pub fn scalar(&self) -> Option<ScalarType> {
        match self {
            ColumnType::Id { id_type, .. } => Some(id_type.scalar()),
            ColumnType::Version { version_type } => Some(version_type.scalar()),
            ColumnType::Basic(basic) => Some(basic.scalar()),
            ColumnType::ManyToOne { .. } => None,
        }
    }

    pub fn id_kind(&self) -> Option<IdKind> {
        match self {
            ColumnType::Id { id_type, .. } => Some(*id_type),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, ColumnType::Basic(BasicType::String { .. }))
    }

    /// Identifier and version columns are managed by the persistence runtime
    /// and never copied from client data.
    pub fn is_managed(&self) -> bool {
        matches!(self, ColumnType::Id { .. } | ColumnType::Version { .. })
    }
}
