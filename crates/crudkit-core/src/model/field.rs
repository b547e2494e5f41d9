use crate::model::entity::EntityModel;

///
/// FieldModel
/// Runtime field metadata used by path checks, compilers, and merges.
///

#[derive(Debug)]
pub struct FieldModel {
    /// Declared field name as it appears in payloads and query strings.
    pub name: &'static str,
    /// Semantic type of the field.
    pub kind: FieldKind,
}

///
/// FieldKind
///
/// Semantic type surface needed by the compilers.
/// This is a lossy projection of the Rust field type: `Option<T>` and `T`
/// share a kind, and every integer width maps onto `Int` or `Uint`.
///

#[derive(Debug)]
pub enum FieldKind {
    // Scalar primitives
    Bool,
    Date,
    /// Closed set of variant names, matched case-insensitively.
    Enum(&'static [&'static str]),
    Float,
    Int,
    Text,
    Timestamp,
    Uint,

    // Identifiers
    Ulid,
    Uuid,

    // Structure
    List(&'static Self),
    Record(&'static EntityModel),

    /// Marker for fields that are neither filterable nor orderable.
    Unsupported,
}

impl FieldKind {
    /// Stable, human-readable name for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Date => "date",
            Self::Enum(_) => "enum",
            Self::Float => "float",
            Self::Int => "int",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Uint => "uint",
            Self::Ulid => "ulid",
            Self::Uuid => "uuid",
            Self::List(_) => "list",
            Self::Record(_) => "record",
            Self::Unsupported => "unsupported",
        }
    }

    /// Identifier kinds get exact-match treatment and always surface parse
    /// failures.
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(self, Self::Ulid | Self::Uuid)
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }

    /// Scalar kinds are the only ones a query-string term can address.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Record(_) | Self::Unsupported)
    }

    /// Element kind for list fields.
    #[must_use]
    pub const fn element(&self) -> Option<&'static Self> {
        match self {
            Self::List(inner) => Some(*inner),
            _ => None,
        }
    }
}
