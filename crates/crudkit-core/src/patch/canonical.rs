use crate::model::{entity::EntityModel, field::FieldKind};
use serde_json::{Map, Value as JsonValue};

/// Rewrite payload object keys to their declared field names, recursing
/// through nested records and lists of records.
///
/// Keys the model does not declare are kept as-is. When two keys fold to
/// the same declared name the first one wins, matching presence lookup.
pub(crate) fn canonicalize(model: &EntityModel, value: JsonValue) -> JsonValue {
    let JsonValue::Object(map) = value else {
        return value;
    };

    let mut out = Map::with_capacity(map.len());
    for (key, child) in map {
        match model.field(&key) {
            Some(field) => {
                let child = canonicalize_kind(&field.kind, child);
                out.entry(field.name).or_insert(child);
            }
            None => {
                out.entry(key).or_insert(child);
            }
        }
    }

    JsonValue::Object(out)
}

fn canonicalize_kind(kind: &FieldKind, value: JsonValue) -> JsonValue {
    match (kind, value) {
        (FieldKind::Record(model), value) => canonicalize(model, value),
        (FieldKind::List(element), JsonValue::Array(items)) => JsonValue::Array(
            items
                .into_iter()
                .map(|item| canonicalize_kind(element, item))
                .collect(),
        ),
        (_, value) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::canonicalize;
    use crate::{
        test_fixtures::{Order, Warehouse},
        traits::EntitySchema,
    };
    use serde_json::json;

    #[test]
    fn keys_fold_to_declared_names_recursively() {
        let payload = json!({ "id": 1, "TAGS": [{ "label": "x", "iD": 2 }], "extra": true });

        assert_eq!(
            canonicalize(Order::MODEL, payload),
            json!({ "Id": 1, "Tags": [{ "Label": "x", "Id": 2 }], "extra": true })
        );
    }

    #[test]
    fn nested_lists_are_walked() {
        let payload = json!({ "grid": [[{ "id": 5 }], []] });

        assert_eq!(
            canonicalize(Warehouse::MODEL, payload),
            json!({ "Grid": [[{ "Id": 5 }], []] })
        );
    }

    #[test]
    fn first_duplicate_wins() {
        let payload = json!({ "name": "a", "NAME": "b" });

        assert_eq!(canonicalize(Order::MODEL, payload), json!({ "Name": "a" }));
    }
}
