use crate::{traits::FieldValues, value::Value};
use serde::Serialize;
use std::{
    fmt,
    ops::{BitAnd, BitOr},
};

///
/// Predicate
///
/// Schema-agnostic filter tree built once per request.
///
/// Field names are the declared names resolved at compile time. Evaluation
/// reads fields by name through `FieldValues`; a field the row does not
/// expose never matches.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Predicate {
    /// Pass-through; keeps every row.
    True,
    Equals {
        field: String,
        value: Value,
    },
    /// Case-insensitive substring test on a text field.
    Contains {
        field: String,
        text: String,
    },
    InSet {
        field: String,
        values: Vec<Value>,
    },
    And(Vec<Self>),
    Or(Vec<Self>),
}

impl Predicate {
    ///
    /// CONSTRUCTION
    ///

    #[must_use]
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn contains(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Contains {
            field: field.into(),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn in_set(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::InSet {
            field: field.into(),
            values,
        }
    }

    /// Disjunction of `children`, flattened.
    ///
    /// No children yields `True`: an empty search never filters anything out.
    /// A single child is returned unwrapped.
    #[must_use]
    pub fn any_of(children: impl IntoIterator<Item = Self>) -> Self {
        let mut flat = Vec::new();
        for child in children {
            match child {
                Self::Or(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }

        match flat.len() {
            0 => Self::True,
            1 => flat.pop().unwrap_or(Self::True),
            _ => Self::Or(flat),
        }
    }

    /// Conjunction of `children`, flattened, with `True` children dropped.
    #[must_use]
    pub fn all_of(children: impl IntoIterator<Item = Self>) -> Self {
        let mut flat = Vec::new();
        for child in children {
            match child {
                Self::True => {}
                Self::And(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }

        match flat.len() {
            0 => Self::True,
            1 => flat.pop().unwrap_or(Self::True),
            _ => Self::And(flat),
        }
    }

    #[must_use]
    pub const fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }

    ///
    /// EVALUATION
    ///

    #[must_use]
    pub fn eval<R: FieldValues + ?Sized>(&self, row: &R) -> bool {
        match self {
            Self::True => true,
            Self::Equals { field, value } => {
                on_present(row, field, |actual| actual.loose_eq(value))
            }
            Self::Contains { field, text } => on_present(row, field, |actual| {
                // NOTE: non-text values never contain anything.
                actual.text_contains_ci(text).unwrap_or(false)
            }),
            Self::InSet { field, values } => on_present(row, field, |actual| {
                values.iter().any(|candidate| actual.loose_eq(candidate))
            }),
            Self::And(children) => children.iter().all(|child| child.eval(row)),
            Self::Or(children) => children.iter().any(|child| child.eval(row)),
        }
    }
}

// Evaluate a field test only when the row exposes the field.
fn on_present<R: FieldValues + ?Sized>(
    row: &R,
    field: &str,
    f: impl FnOnce(&Value) -> bool,
) -> bool {
    row.get_value(field).is_some_and(|value| f(&value))
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::all_of([self, rhs])
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::any_of([self, rhs])
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => f.write_str("true"),
            Self::Equals { field, value } => write!(f, "{field} = {value}"),
            Self::Contains { field, text } => write!(f, "{field} contains {text:?}"),
            Self::InSet { field, values } => {
                write!(f, "{field} in ")?;
                fmt_joined(f, values, ", ", "[", "]")
            }
            Self::And(children) => fmt_joined(f, children, " AND ", "(", ")"),
            Self::Or(children) => fmt_joined(f, children, " OR ", "(", ")"),
        }
    }
}

fn fmt_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    separator: &str,
    open: &str,
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}

///
/// TESTS
///
