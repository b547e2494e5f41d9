//! Path resolver.
//!
//! A `Path` addresses one location inside a payload tree: field names,
//! concrete array indices, and the symbolic last-element segment. Paths are
//! built with chained builder calls (or parsed from dotted strings) and have
//! two renderings derived from the same segment list:
//!
//! - `key()`   → `tags.0.id`   (casefolded, dot-joined; presence-map storage)
//! - `Display` → `Tags[0].Id`  (bracketed; diagnostics)
//!
//! Field segments compare case-insensitively. In keys, a field that reads
//! like an index or `$last` gets a leading `\`, and `.` or `\` inside a
//! field name is escaped with `\`, so no two distinct paths share a key.

#[cfg(test)]
mod tests;

use crate::{
    LAST_INDEX_SEGMENT,
    model::{casefold, entity::EntityModel, field::FieldKind, names_match},
};
use std::{
    fmt,
    hash::{Hash, Hasher},
    mem,
};
use thiserror::Error as ThisError;

///
/// PathError
///
/// A built path does not describe a location the target shape declares.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PathError {
    #[error("empty path does not address a field")]
    EmptyPath,

    #[error("'{path}': {entity} has no field named '{field}'")]
    UnknownField {
        path: String,
        entity: &'static str,
        field: String,
    },

    #[error("'{path}': {kind} field cannot be indexed")]
    NotIndexable { path: String, kind: &'static str },

    #[error("'{path}': {kind} field has no member '{field}'")]
    NotARecord {
        path: String,
        kind: &'static str,
        field: String,
    },
}

///
/// PathSegment
///

#[derive(Clone, Debug)]
pub enum PathSegment {
    Field(String),
    Index(usize),
    /// Resolves against the array length at lookup time.
    Last,
}

impl PathSegment {
    fn write_key(&self, out: &mut String) {
        match self {
            Self::Field(name) => {
                let folded = casefold(name);
                if folded == LAST_INDEX_SEGMENT || is_decimal(&folded) {
                    out.push(KEY_ESCAPE);
                }
                for c in folded.chars() {
                    if c == '.' || c == KEY_ESCAPE {
                        out.push(KEY_ESCAPE);
                    }
                    out.push(c);
                }
            }
            Self::Index(i) => out.push_str(&i.to_string()),
            Self::Last => out.push_str(LAST_INDEX_SEGMENT),
        }
    }

    fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case(LAST_INDEX_SEGMENT) {
            return Self::Last;
        }

        if is_decimal(token) {
            // NOTE: indices too large for usize stay fields and simply never resolve.
            if let Ok(index) = token.parse() {
                return Self::Index(index);
            }
        }

        Self::Field(token.to_string())
    }
}

impl PartialEq for PathSegment {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Field(a), Self::Field(b)) => names_match(a, b),
            (Self::Index(a), Self::Index(b)) => a == b,
            (Self::Last, Self::Last) => true,
            _ => false,
        }
    }
}

impl Eq for PathSegment {}

impl Hash for PathSegment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Self::Field(name) => casefold(name).hash(state),
            Self::Index(i) => i.hash(state),
            Self::Last => {}
        }
    }
}

const KEY_ESCAPE: char = '\\';

fn is_decimal(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

impl From<&str> for PathSegment {
    fn from(s: &str) -> Self {
        Self::Field(s.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

///
/// Path
///

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    ///
    /// CONSTRUCTION
    ///

    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    #[must_use]
    pub const fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Parse a dotted string path.
    ///
    /// Numeric segments become indices, `$last` becomes the symbolic last
    /// segment, and anything else is a field name. Bracket notation
    /// (`Tags[0].Id`) is accepted as well; empty segments are skipped.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let segments = input
            .split(['.', '[', ']'])
            .filter(|token| !token.is_empty())
            .map(PathSegment::from_token)
            .collect();

        Self { segments }
    }

    ///
    /// BUILDER
    ///

    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Field(name.into()));
        self
    }

    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(PathSegment::Index(index));
        self
    }

    #[must_use]
    pub fn element_at(self, index: usize) -> Self {
        self.index(index)
    }

    #[must_use]
    pub fn first(self) -> Self {
        self.index(0)
    }

    #[must_use]
    pub fn first_or_default(self) -> Self {
        self.index(0)
    }

    #[must_use]
    pub fn last(mut self) -> Self {
        self.segments.push(PathSegment::Last);
        self
    }

    #[must_use]
    pub fn last_or_default(self) -> Self {
        self.last()
    }

    ///
    /// ACCESSORS
    ///

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Storage key: casefolded segments joined with `.`.
    #[must_use]
    pub fn key(&self) -> String {
        Self::key_of(&self.segments)
    }

    /// Storage keys of every strict prefix, shortest first.
    #[must_use]
    pub fn prefix_keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.segments.len().saturating_sub(1));
        let mut key = String::new();

        for (i, segment) in self.segments.iter().enumerate() {
            if i + 1 == self.segments.len() {
                break;
            }
            if i > 0 {
                key.push('.');
            }
            segment.write_key(&mut key);
            keys.push(key.clone());
        }

        keys
    }

    fn key_of(segments: &[PathSegment]) -> String {
        let mut key = String::new();
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                key.push('.');
            }
            segment.write_key(&mut key);
        }

        key
    }

    ///
    /// VALIDATION
    ///

    /// Check that every segment addresses something `model` declares.
    ///
    /// Field segments must name a declared field of the current record,
    /// index segments require a list, and descending by name requires a
    /// nested record.
    pub fn check(&self, model: &EntityModel) -> Result<(), PathError> {
        if self.segments.is_empty() {
            return Err(PathError::EmptyPath);
        }

        let mut cursor = Cursor::Record(model);
        for segment in &self.segments {
            cursor = match (segment, cursor) {
                (PathSegment::Field(name), Cursor::Record(record)) => {
                    let field = record.field(name).ok_or_else(|| PathError::UnknownField {
                        path: self.to_string(),
                        entity: record.entity_name,
                        field: name.clone(),
                    })?;
                    Cursor::Kind(&field.kind)
                }

                (PathSegment::Field(name), Cursor::Kind(kind)) => match kind {
                    FieldKind::Record(record) => {
                        let field =
                            record.field(name).ok_or_else(|| PathError::UnknownField {
                                path: self.to_string(),
                                entity: record.entity_name,
                                field: name.clone(),
                            })?;
                        Cursor::Kind(&field.kind)
                    }
                    other => {
                        return Err(PathError::NotARecord {
                            path: self.to_string(),
                            kind: other.name(),
                            field: name.clone(),
                        });
                    }
                },

                (PathSegment::Index(_) | PathSegment::Last, Cursor::Kind(kind)) => {
                    match kind.element() {
                        Some(element) => Cursor::Kind(element),
                        None => {
                            return Err(PathError::NotIndexable {
                                path: self.to_string(),
                                kind: kind.name(),
                            });
                        }
                    }
                }

                (PathSegment::Index(_) | PathSegment::Last, Cursor::Record(_)) => {
                    return Err(PathError::NotIndexable {
                        path: self.to_string(),
                        kind: "record",
                    });
                }
            };
        }

        Ok(())
    }
}

// Position reached while walking a path against declared kinds.
#[derive(Clone, Copy)]
enum Cursor<'a> {
    Record(&'a EntityModel),
    Kind(&'a FieldKind),
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Last => write!(f, "[{LAST_INDEX_SEGMENT}]")?,
            }
        }

        Ok(())
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self::from_segments(iter.into_iter().collect())
    }
}
