//! Query-string compilation.
//!
//! Request query parameters become a `Predicate` (what to keep), a
//! `CompiledOrder` (how to sort) and an optional `PageSpec` (which slice to
//! return). Compilation never touches records; evaluation happens later
//! against anything that implements `FieldValues`.

mod compile;
mod filter;
mod order;
mod params;
mod predicate;


use crate::{error::FieldIssues, value::TermError};
use thiserror::Error as ThisError;

// re-exports
pub use compile::{
    SearchPredicate, compile_field_predicate, compile_id_set_predicate, compile_search_predicate,
};
pub use filter::{
    CompiledQuery, FilterChain, IdRangeFilter, PageFilter, PageSpec, QueryFilter, QueryPolicy,
    SearchFilter, SortFilter,
};
pub use order::{CompiledOrder, OrderDirection, OrderSpec, compile_ordering};
pub use params::QueryParams;
pub use predicate::Predicate;

///
/// QueryError
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum QueryError {
    #[error("{entity} has no field named '{field}'")]
    UnknownField { entity: &'static str, field: String },

    #[error("{kind} field '{field}' cannot be filtered")]
    NotFilterable {
        field: &'static str,
        kind: &'static str,
    },

    #[error("field '{field}': {source}")]
    UnconvertibleTerm {
        field: &'static str,
        #[source]
        source: TermError,
    },

    #[error("field '{field}': '{term}' is not a valid {kind}")]
    IdentifierParse {
        field: &'static str,
        kind: &'static str,
        term: String,
    },

    #[error("'{term}' is not a sort direction")]
    InvalidDirection { term: String },

    #[error("invalid filter: {0}")]
    InvalidFilter(FieldIssues),
}
