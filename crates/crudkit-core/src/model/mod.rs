//! Runtime data model definitions.
//!
//! Every record type that crosses the CRUD boundary carries a static
//! descriptor table (`EntityModel`) listing its fields and their semantic
//! kinds. Path validation, predicate compilation, ordering, and patch merges
//! all work against this table instead of inspecting types at runtime.
//!
//! In general:
//! - the `entity_model!` macro defines *what exists*
//! - `model` defines *what the compilers read*
pub mod entity;
pub mod field;

pub use entity::EntityModel;
pub use field::{FieldKind, FieldModel};

///
/// Casefold a name for case-insensitive matching.
///
/// ASCII input takes the fast path; anything else falls back to Unicode
/// lowercasing so payload keys and declared names agree on one rule.
///
#[must_use]
pub fn casefold(input: &str) -> String {
    if input.is_ascii() {
        return input.to_ascii_lowercase();
    }

    input.to_lowercase()
}

/// Compare two names under the shared casefold rule.
#[must_use]
pub fn names_match(left: &str, right: &str) -> bool {
    if left.is_ascii() && right.is_ascii() {
        return left.eq_ignore_ascii_case(right);
    }

    casefold(left) == casefold(right)
}
