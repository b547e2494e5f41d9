mod compare;
mod parse;

#[cfg(test)]
mod tests;

use crate::model::casefold;
use serde::{Serialize, Serializer};
use std::{cmp::Ordering, fmt};
use time::{Date, OffsetDateTime, format_description::well_known::Rfc3339};
use ulid::Ulid;
use uuid::Uuid;

// re-exports
pub use compare::canonical_cmp;
pub use parse::{TermError, parse_term};

///
/// Value
/// Runtime field value read from a record or parsed from a query term.
///
/// Null        → the field holds `Option::None`.
/// Unsupported → the field exists but carries no comparable value
///               (nested records, opaque types).
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Date(#[serde(serialize_with = "serialize_date")] Date),
    Enum(String),
    Float(f64),
    Int(i64),
    /// Ordered list of values.
    List(Vec<Self>),
    Null,
    Text(String),
    Timestamp(#[serde(serialize_with = "serialize_timestamp")] OffsetDateTime),
    Uint(u64),
    Ulid(Ulid),
    Unsupported,
    Uuid(Uuid),
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build a `Value::List` from owned items.
    pub fn from_list<T>(items: Vec<T>) -> Self
    where
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    ///
    /// TYPES
    ///

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Float(_) | Self::Int(_) | Self::Uint(_))
    }

    ///
    /// ACCESSORS
    ///

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    ///
    /// COMPARISON
    ///

    /// Equality with numeric widening across `Int`, `Uint`, and `Float`.
    ///
    /// Every other pairing compares strictly: mismatched variants are never
    /// equal, and `Unsupported` never equals anything (including itself).
    #[must_use]
    pub fn loose_eq(&self, other: &Self) -> bool {
        if self.is_numeric() && other.is_numeric() {
            return self.cmp_numeric(other) == Some(Ordering::Equal);
        }

        match (self, other) {
            (Self::Unsupported, _) | (_, Self::Unsupported) => false,
            (Self::Enum(a), Self::Enum(b)) => a.eq_ignore_ascii_case(b),
            _ => self == other,
        }
    }

    /// Numeric ordering with widening; `None` for non-numeric operands.
    #[must_use]
    pub fn cmp_numeric(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Uint(a), Self::Uint(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Uint(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
            (Self::Uint(a), Self::Int(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
            _ => {
                let left = self.to_f64()?;
                let right = other.to_f64()?;
                left.partial_cmp(&right)
            }
        }
    }

    #[expect(clippy::cast_precision_loss)]
    const fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            Self::Uint(u) => Some(*u as f64),
            _ => None,
        }
    }

    /// Case-insensitive substring test; `None` unless `self` is text.
    #[must_use]
    pub fn text_contains_ci(&self, needle: &str) -> Option<bool> {
        let haystack = self.as_text()?;

        Some(casefold(haystack).contains(&casefold(needle)))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Enum(variant) => write!(f, "{variant}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Null => f.write_str("null"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Timestamp(ts) => match ts.format(&Rfc3339) {
                Ok(text) => f.write_str(&text),
                Err(_) => write!(f, "{ts}"),
            },
            Self::Uint(u) => write!(f, "{u}"),
            Self::Ulid(id) => write!(f, "{id}"),
            Self::Unsupported => f.write_str("<unsupported>"),
            Self::Uuid(id) => write!(f, "{id}"),
        }
    }
}

fn serialize_timestamp<S: Serializer>(
    ts: &OffsetDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let text = ts.format(&Rfc3339).map_err(serde::ser::Error::custom)?;

    serializer.serialize_str(&text)
}

fn serialize_date<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(date)
}

// Conversions from plain Rust values.
macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    bool => Bool,
    f32 => Float,
    f64 => Float,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    String => Text,
    &str => Text,
    Ulid => Ulid,
    Uuid => Uuid,
    Date => Date,
    OffsetDateTime => Timestamp,
}

impl From<Vec<Self>> for Value {
    fn from(vec: Vec<Self>) -> Self {
        Self::List(vec)
    }
}
