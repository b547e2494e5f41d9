use crate::{
    model::entity::EntityModel,
    query::QueryError,
    traits::FieldValues,
    value::{Value, canonical_cmp},
};
use serde::Serialize;
use std::{cmp::Ordering, fmt, str::FromStr};

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    /// Parse `asc`, `ascending`, `desc` or `descending`, ignoring case.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();

        if input.eq_ignore_ascii_case("asc") || input.eq_ignore_ascii_case("ascending") {
            Some(Self::Asc)
        } else if input.eq_ignore_ascii_case("desc") || input.eq_ignore_ascii_case("descending") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for OrderDirection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| QueryError::InvalidDirection {
            term: s.to_string(),
        })
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

///
/// OrderSpec
/// Resolved ordering: declared field names with their directions, in
/// priority order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct OrderSpec {
    pub fields: Vec<(String, OrderDirection)>,
}

impl OrderSpec {
    /// Ascending by primary key, twice. The repeated key is kept as the
    /// stability tiebreak slot.
    #[must_use]
    pub fn identifier_default(model: &EntityModel) -> Self {
        let fields = match model.primary_key_field() {
            Some(pk) => vec![
                (pk.name.to_string(), OrderDirection::Asc),
                (pk.name.to_string(), OrderDirection::Asc),
            ],
            None => Vec::new(),
        };

        Self { fields }
    }
}

///
/// CompiledOrder
///
/// Composite comparator over an `OrderSpec`. Each key is compared with the
/// canonical value order (null first, numeric widening, ordinal text) and
/// the first non-equal key decides.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompiledOrder {
    spec: OrderSpec,
    fallback: bool,
}

impl CompiledOrder {
    #[must_use]
    pub const fn spec(&self) -> &OrderSpec {
        &self.spec
    }

    /// True when no requested field survived and the identifier default applies.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.fallback
    }

    #[must_use]
    pub fn compare<R: FieldValues + ?Sized>(&self, left: &R, right: &R) -> Ordering {
        for (field, direction) in &self.spec.fields {
            let ordering = compare_slots(
                left.get_value(field).as_ref(),
                right.get_value(field).as_ref(),
            );
            let ordering = direction.apply(ordering);

            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        Ordering::Equal
    }

    /// Stable sort: rows equal on every key keep their input order.
    pub fn sort<R: FieldValues>(&self, rows: &mut [R]) {
        rows.sort_by(|left, right| self.compare(left, right));
    }
}

// Fields a row does not expose sort before every present value.
fn compare_slots(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => canonical_cmp(left, right),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

///
/// compile_ordering
///
/// Resolve requested `(field, direction)` pairs against `model`.
///
/// Names match declared fields case-insensitively; unknown and
/// non-orderable fields are dropped. When nothing survives, the identifier
/// default applies so paging stays deterministic.
///
pub fn compile_ordering<S: AsRef<str>>(
    model: &EntityModel,
    specs: &[(S, OrderDirection)],
) -> CompiledOrder {
    let mut fields = Vec::with_capacity(specs.len());

    for (name, direction) in specs {
        let name = name.as_ref();

        match model.field(name) {
            Some(field) if field.kind.is_scalar() => {
                fields.push((field.name.to_string(), *direction));
            }
            Some(field) => {
                tracing::debug!(
                    entity = model.entity_name,
                    field = field.name,
                    kind = field.kind.name(),
                    "order field is not orderable"
                );
            }
            None => {
                tracing::debug!(entity = model.entity_name, field = name, "order field unknown");
            }
        }
    }

    if fields.is_empty() {
        tracing::debug!(
            entity = model.entity_name,
            "ordering falls back to the identifier default"
        );

        return CompiledOrder {
            spec: OrderSpec::identifier_default(model),
            fallback: true,
        };
    }

    CompiledOrder {
        spec: OrderSpec { fields },
        fallback: false,
    }
}

///
/// TESTS
///
