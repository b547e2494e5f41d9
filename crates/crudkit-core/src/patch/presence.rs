use crate::{
    model::names_match,
    path::{Path, PathSegment},
};
use serde_json::Value as JsonValue;
use std::{cell::RefCell, collections::HashMap};

///
/// resolve
///
/// Walk `segments` through a payload tree and return the addressed node.
///
/// Field segments match object keys case-insensitively (exact key first).
/// Index segments address arrays by position and objects by decimal key.
/// `Last` addresses the final element of a non-empty array.
/// A JSON `null` is a node like any other.
///
pub(crate) fn resolve<'a>(root: &'a JsonValue, segments: &[PathSegment]) -> Option<&'a JsonValue> {
    segments.iter().try_fold(root, step)
}

fn step<'a>(node: &'a JsonValue, segment: &PathSegment) -> Option<&'a JsonValue> {
    match (segment, node) {
        (PathSegment::Field(name), JsonValue::Object(map)) => map.get(name.as_str()).or_else(|| {
            map.iter()
                .find(|(key, _)| names_match(key, name))
                .map(|(_, value)| value)
        }),
        (PathSegment::Index(index), JsonValue::Array(items)) => items.get(*index),
        (PathSegment::Index(index), JsonValue::Object(map)) => map.get(index.to_string().as_str()),
        (PathSegment::Last, JsonValue::Array(items)) => items.last(),
        _ => None,
    }
}

///
/// PresenceMap
///
/// Memoized storage-key → presence answers for one payload.
///
/// A positive answer at depth N seeds every strict prefix as positive,
/// leaving entries that already exist (manual overrides included) alone.
/// Negative answers never cascade.
///

#[derive(Clone, Debug, Default)]
pub(crate) struct PresenceMap {
    entries: RefCell<HashMap<String, bool>>,
}

impl PresenceMap {
    pub(crate) fn get(&self, key: &str) -> Option<bool> {
        self.entries.borrow().get(key).copied()
    }

    /// Record a computed answer for `path`, seeding prefixes when positive.
    pub(crate) fn record(&self, path: &Path, key: String, present: bool) {
        let mut entries = self.entries.borrow_mut();
        entries.insert(key, present);

        if present {
            for prefix in path.prefix_keys() {
                entries.entry(prefix).or_insert(true);
            }
        }
    }

    /// Force exactly one entry; no cascade.
    pub(crate) fn force(&mut self, key: String, present: bool) {
        self.entries.get_mut().insert(key, present);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.get_mut().clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}
