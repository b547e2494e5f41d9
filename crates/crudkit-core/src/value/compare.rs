use crate::value::Value;
use std::cmp::Ordering;

///
/// Canonical total ordering used by the ordering compiler.
///
/// - `Null` sorts before every other value
/// - numeric variants compare with widening; floats use `f64::total_cmp`
/// - text compares ordinally
/// - same-variant values use their natural order
/// - anything else falls back to a fixed variant rank
///
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    if let Some(ordering) = strict_ordering(left, right) {
        return ordering;
    }

    if left.is_numeric() && right.is_numeric() {
        return numeric_ordering(left, right);
    }

    canonical_rank(left).cmp(&canonical_rank(right))
}

const fn canonical_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Float(_) | Value::Int(_) | Value::Uint(_) => 2,
        Value::Text(_) => 3,
        Value::Enum(_) => 4,
        Value::Date(_) => 5,
        Value::Timestamp(_) => 6,
        Value::Ulid(_) => 7,
        Value::Uuid(_) => 8,
        Value::List(_) => 9,
        Value::Unsupported => 10,
    }
}

/// Ordering for identical value variants.
///
/// Returns `None` if values are of different variants.
fn strict_ordering(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        (Value::Enum(a), Value::Enum(b)) | (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => Some(a.total_cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::List(a), Value::List(b)) => Some(list_ordering(a, b)),
        (Value::Null, Value::Null) | (Value::Unsupported, Value::Unsupported) => {
            Some(Ordering::Equal)
        }
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Uint(a), Value::Uint(b)) => Some(a.cmp(b)),
        (Value::Ulid(a), Value::Ulid(b)) => Some(a.cmp(b)),
        (Value::Uuid(a), Value::Uuid(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

// Integers compare exactly; any float operand compares under
// `f64::total_cmp`, so NaN and signed zero have fixed positions.
fn numeric_ordering(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Int(_) | Value::Uint(_), Value::Int(_) | Value::Uint(_)) => {
            left.cmp_numeric(right).unwrap_or(Ordering::Equal)
        }
        _ => match (left.to_f64(), right.to_f64()) {
            (Some(l), Some(r)) => l.total_cmp(&r),
            _ => Ordering::Equal,
        },
    }
}

// Lexicographic over elements, then by length.
fn list_ordering(left: &[Value], right: &[Value]) -> Ordering {
    for (l, r) in left.iter().zip(right.iter()) {
        let ordering = canonical_cmp(l, r);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    left.len().cmp(&right.len())
}
