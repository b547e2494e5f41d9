use crate::{model::entity::EntityModel, value::Value};
use serde::{Deserialize, de::DeserializeOwned};
use std::collections::{BTreeSet, HashSet};
use time::{Date, OffsetDateTime};
use ulid::Ulid;
use uuid::Uuid;

pub use serde_json::{Error as JsonError, Value as JsonValue};

// ============================================================================
// RECORD SCHEMA
// ============================================================================
//
// These traits describe *what a record is*. They are implemented by the
// `entity_model!` macro, never by hand.
//

///
/// EntitySchema
///
/// Declared descriptor table for one record type.
///

pub trait EntitySchema {
    const MODEL: &'static EntityModel;
}

///
/// FieldValues
///
/// By-name field read used by predicate evaluation and ordering.
/// Names resolve case-insensitively; `None` means the field is not declared.
///

pub trait FieldValues {
    fn get_value(&self, name: &str) -> Option<Value>;
}

///
/// FieldCopy
///
/// By-name field assignment used by patch merges.
/// Both methods return `false` when the field is not declared.
///

pub trait FieldCopy {
    /// Clone one member of `self` into `target`.
    fn copy_field(&self, target: &mut Self, name: &str) -> bool;

    /// Deserialize one payload node into the named member.
    fn merge_field(&mut self, name: &str, node: &JsonValue) -> Result<bool, JsonError>;
}

// Member deserialization used by `entity_model!`.
#[doc(hidden)]
pub fn read_member<V: DeserializeOwned>(node: &JsonValue) -> Result<V, JsonError> {
    Deserialize::deserialize(node)
}

// ============================================================================
// FIELD VALUES
// ============================================================================

///
/// FieldValue
///
/// Conversion from one Rust field type into its runtime `Value`.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;
}

impl FieldValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FieldValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FieldValue> FieldValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }
}

impl<T: FieldValue> FieldValue for BTreeSet<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }
}

impl<T: FieldValue, S> FieldValue for HashSet<T, S> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }
}

// Scalars that convert through `Value::from`.
macro_rules! impl_field_value {
    ( $( $type:ty ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn to_value(&self) -> Value {
                    Value::from(self.clone())
                }
            }
        )*
    };
}

impl_field_value!(
    bool,
    f32,
    f64,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    String,
    Ulid,
    Uuid,
    Date,
    OffsetDateTime,
);
