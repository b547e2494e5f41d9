use crate::{
    config::ConfigError, patch::PatchError, path::PathError, query::QueryError, value::TermError,
};
use derive_more::{Deref, DerefMut, IntoIterator};
use serde::Serialize;
use std::{collections::BTreeMap, fmt};
use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level error for every fallible crudkit operation.
/// Each variant wraps the error of one subsystem unchanged.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Term(#[from] TermError),
}

///
/// FieldIssues
///
/// Field-keyed issue map: declared field name → messages, in field order.
/// Shapes both skipped search fields and aggregate filter rejections so the
/// controller layer can render one validation response.
///

#[derive(Clone, Debug, Default, Deref, DerefMut, Eq, IntoIterator, PartialEq, Serialize)]
pub struct FieldIssues(BTreeMap<String, Vec<String>>);

impl FieldIssues {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record one issue against a field.
    pub fn push(&mut self, field: impl Into<String>, message: impl ToString) {
        self.0
            .entry(field.into())
            .or_default()
            .push(message.to_string());
    }

    /// Merge another issue map into this one.
    pub fn extend(&mut self, other: Self) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl fmt::Display for FieldIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, messages)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {}", messages.join(", "))?;
        }

        Ok(())
    }
}
