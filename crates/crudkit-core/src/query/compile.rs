use crate::{
    error::FieldIssues,
    model::{entity::EntityModel, field::FieldModel},
    query::{Predicate, QueryError},
    value::{Value, parse_term},
};

///
/// compile_field_predicate
///
/// Build the single-field predicate for one raw query term.
///
/// Identifier kinds compile to exact `Equals` and surface parse failures as
/// `IdentifierParse`. Text compiles to a case-insensitive `Contains`. Every
/// other scalar kind compiles to `Equals` after converting the term with the
/// kind's canonical parse rule.
///
pub fn compile_field_predicate(
    model: &EntityModel,
    field: &str,
    term: &str,
) -> Result<Predicate, QueryError> {
    let field = filterable_field(model, field)?;
    let kind = &field.kind;

    if kind.is_text() {
        return Ok(Predicate::contains(field.name, term));
    }

    let value = parse_term(kind, term).map_err(|source| {
        if kind.is_identifier() {
            QueryError::IdentifierParse {
                field: field.name,
                kind: kind.name(),
                term: term.to_string(),
            }
        } else {
            QueryError::UnconvertibleTerm {
                field: field.name,
                source,
            }
        }
    })?;

    Ok(Predicate::equals(field.name, value))
}

///
/// SearchPredicate
///
/// Result of a multi-field search: the OR-ed predicate over the fields that
/// accepted the term, plus the reason each remaining field was skipped.
///

#[derive(Clone, Debug, PartialEq)]
pub struct SearchPredicate {
    pub predicate: Predicate,
    pub skipped: FieldIssues,
}

///
/// compile_search_predicate
///
/// OR together the per-field predicates of `fields` for one search term.
///
/// Fields that reject the term (unknown, not filterable, unconvertible,
/// unparsable identifier) are skipped and reported, never fatal. A blank
/// term or zero usable fields yields `Predicate::True`.
///
pub fn compile_search_predicate<S: AsRef<str>>(
    model: &EntityModel,
    fields: &[S],
    term: &str,
) -> SearchPredicate {
    let term = term.trim();
    let mut skipped = FieldIssues::new();

    if term.is_empty() {
        return SearchPredicate {
            predicate: Predicate::True,
            skipped,
        };
    }

    let mut usable = Vec::with_capacity(fields.len());
    for field in fields {
        let field = field.as_ref();

        match compile_field_predicate(model, field, term) {
            Ok(predicate) => usable.push(predicate),
            Err(err) => {
                tracing::debug!(
                    entity = model.entity_name,
                    field,
                    term,
                    error = %err,
                    "search field skipped"
                );
                let key = model.field(field).map_or(field, |declared| declared.name);
                skipped.push(key, err);
            }
        }
    }

    SearchPredicate {
        predicate: Predicate::any_of(usable),
        skipped,
    }
}

///
/// compile_id_set_predicate
///
/// Membership test of `id_field` against the identifiers in `terms`.
///
/// Terms may repeat (`?ids=a&ids=b`) or pack several ids into one value
/// (`a,b` or `[a,b]`, optionally quoted). Unparsable ids are dropped and
/// duplicates collapse; an empty set yields `Predicate::True`.
///
pub fn compile_id_set_predicate<I>(
    model: &EntityModel,
    id_field: &str,
    terms: I,
) -> Result<Predicate, QueryError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let field = filterable_field(model, id_field)?;

    let mut values: Vec<Value> = Vec::new();
    for raw in terms {
        for term in split_id_terms(raw.as_ref()) {
            match parse_term(&field.kind, term) {
                Ok(value) => {
                    if !values.contains(&value) {
                        values.push(value);
                    }
                }
                Err(err) => {
                    tracing::debug!(
                        entity = model.entity_name,
                        field = field.name,
                        term,
                        error = %err,
                        "id term dropped"
                    );
                }
            }
        }
    }

    if values.is_empty() {
        return Ok(Predicate::True);
    }

    Ok(Predicate::in_set(field.name, values))
}

// Resolve a declared field that a single term can address.
fn filterable_field(model: &EntityModel, name: &str) -> Result<&'static FieldModel, QueryError> {
    let field = model.field(name).ok_or_else(|| QueryError::UnknownField {
        entity: model.entity_name,
        field: name.to_string(),
    })?;

    if !field.kind.is_scalar() {
        return Err(QueryError::NotFilterable {
            field: field.name,
            kind: field.kind.name(),
        });
    }

    Ok(field)
}

fn split_id_terms(raw: &str) -> impl Iterator<Item = &str> {
    let raw = raw.trim();
    let raw = raw
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(raw);

    raw.split(',')
        .map(|term| term.trim().trim_matches(['"', '\'']).trim())
        .filter(|term| !term.is_empty())
}

///
/// TESTS
///
