use crate::{
    model::{field::FieldKind, names_match},
    value::Value,
};
use thiserror::Error as ThisError;
use time::{
    Date, OffsetDateTime,
    format_description::well_known::{Iso8601, Rfc3339},
};
use ulid::Ulid;
use uuid::Uuid;

///
/// TermError
///
/// A query-string term could not be converted to a field's semantic type.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TermError {
    #[error("'{term}' is not a valid {kind}: {reason}")]
    Invalid {
        kind: &'static str,
        term: String,
        reason: String,
    },

    #[error("{kind} fields cannot be compared against a single term")]
    NotScalar { kind: &'static str },
}

impl TermError {
    fn invalid(kind: &FieldKind, term: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            kind: kind.name(),
            term: term.to_string(),
            reason: reason.to_string(),
        }
    }
}

///
/// parse_term
///
/// Convert a raw query-string term to a `Value` of the given semantic kind,
/// using that kind's canonical parse rule. Surrounding whitespace is ignored
/// for every kind except text, which is taken verbatim.
///
pub fn parse_term(kind: &FieldKind, term: &str) -> Result<Value, TermError> {
    let trimmed = term.trim();

    match kind {
        FieldKind::Text => Ok(Value::Text(term.to_string())),

        FieldKind::Bool => {
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(TermError::invalid(kind, term, "expected true or false"))
            }
        }

        FieldKind::Int => trimmed
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|err| TermError::invalid(kind, term, err)),

        FieldKind::Uint => trimmed
            .parse::<u64>()
            .map(Value::Uint)
            .map_err(|err| TermError::invalid(kind, term, err)),

        FieldKind::Float => {
            let value = trimmed
                .parse::<f64>()
                .map_err(|err| TermError::invalid(kind, term, err))?;

            if value.is_finite() {
                Ok(Value::Float(value))
            } else {
                Err(TermError::invalid(kind, term, "value must be finite"))
            }
        }

        FieldKind::Enum(variants) => variants
            .iter()
            .find(|variant| names_match(variant, trimmed))
            .map(|variant| Value::Enum((*variant).to_string()))
            .ok_or_else(|| {
                TermError::invalid(
                    kind,
                    term,
                    format!("expected one of {}", variants.join(", ")),
                )
            }),

        FieldKind::Date => Date::parse(trimmed, &Iso8601::DATE)
            .map(Value::Date)
            .map_err(|err| TermError::invalid(kind, term, err)),

        FieldKind::Timestamp => OffsetDateTime::parse(trimmed, &Rfc3339)
            .map(Value::Timestamp)
            .map_err(|err| TermError::invalid(kind, term, err)),

        FieldKind::Ulid => Ulid::from_string(trimmed)
            .map(Value::Ulid)
            .map_err(|err| TermError::invalid(kind, term, err)),

        FieldKind::Uuid => Uuid::parse_str(trimmed)
            .map(Value::Uuid)
            .map_err(|err| TermError::invalid(kind, term, err)),

        FieldKind::List(_) | FieldKind::Record(_) | FieldKind::Unsupported => {
            Err(TermError::NotScalar { kind: kind.name() })
        }
    }
}
