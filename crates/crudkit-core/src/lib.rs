//! Core runtime for crudkit: field models, values, paths, partial update
//! payloads, and the query-string predicate and ordering compilers used by
//! generated CRUD endpoints.
#![warn(unreachable_pub)]

#[macro_use]
mod macros;

// public exports are one module level down
pub mod config;
pub mod error;
pub mod model;
pub mod patch;
pub mod path;
pub mod query;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::Error;

///
/// CONSTANTS
///

/// Symbolic segment that addresses the last element of an array at lookup time.
pub const LAST_INDEX_SEGMENT: &str = "$last";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, compilers, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        model::{entity::EntityModel, field::FieldKind, field::FieldModel},
        patch::Partial,
        path::Path,
        query::{OrderDirection, Predicate},
        traits::{EntitySchema, FieldCopy, FieldValue, FieldValues},
        value::Value,
    };
}
