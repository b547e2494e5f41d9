//! Partial update payloads.
//!
//! A `Partial<T>` wraps the raw JSON body of a write request and answers
//! which fields the client actually sent, so an update can overwrite only
//! those fields and leave the rest of the stored record alone.

mod canonical;
mod presence;


use crate::{
    path::{Path, PathError},
    traits::{EntitySchema, FieldCopy},
};
use presence::{PresenceMap, resolve};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::DeserializeOwned};
use serde_json::Value as JsonValue;
use std::cell::OnceCell;
use thiserror::Error as ThisError;

///
/// PatchError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PatchError {
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("payload does not materialize as {entity}: {reason}")]
    Materialize { entity: &'static str, reason: String },
}

///
/// Partial
///
/// Read-only view over a partial-update payload for record type `T`.
///
/// Presence answers are memoized per storage key; the typed instance is
/// materialized lazily at most once. Both caches use interior mutability,
/// so a `Partial` belongs to a single request and is never shared.
///

#[derive(Clone, Debug)]
pub struct Partial<T> {
    payload: JsonValue,
    presence: PresenceMap,
    instance: OnceCell<T>,
}

impl<T: EntitySchema> Partial<T> {
    ///
    /// CONSTRUCTION
    ///

    pub fn from_json(body: &str) -> Result<Self, PatchError> {
        let payload = serde_json::from_str(body)
            .map_err(|err| PatchError::MalformedPayload(err.to_string()))?;

        Self::from_value(payload)
    }

    pub fn from_slice(body: &[u8]) -> Result<Self, PatchError> {
        let payload = serde_json::from_slice(body)
            .map_err(|err| PatchError::MalformedPayload(err.to_string()))?;

        Self::from_value(payload)
    }

    /// Wrap an already-parsed payload tree. The root must be an object.
    pub fn from_value(payload: JsonValue) -> Result<Self, PatchError> {
        if !payload.is_object() {
            return Err(PatchError::MalformedPayload(format!(
                "expected a JSON object, found {}",
                json_kind(&payload)
            )));
        }

        Ok(Self {
            payload,
            presence: PresenceMap::default(),
            instance: OnceCell::new(),
        })
    }

    ///
    /// PRESENCE
    ///

    /// Whether the payload contains a value (null included) at `path`.
    ///
    /// Never fails: unknown fields, shape mismatches, out-of-range indices
    /// and the empty path all answer `false`.
    #[must_use]
    pub fn is_set(&self, path: &Path) -> bool {
        if path.is_empty() {
            return false;
        }

        let key = path.key();
        if let Some(present) = self.presence.get(&key) {
            return present;
        }

        let present = resolve(&self.payload, path.segments()).is_some();
        tracing::trace!(entity = T::MODEL.entity_name, path = %key, present, "presence cache miss");
        self.presence.record(path, key, present);

        present
    }

    /// `is_set` for a dotted string path such as `Tags.$last.Id`.
    #[must_use]
    pub fn is_set_str(&self, path: &str) -> bool {
        self.is_set(&Path::parse(path))
    }

    /// Declared top-level fields present in the payload, in model order.
    #[must_use]
    pub fn present_fields(&self) -> Vec<&'static str> {
        T::MODEL
            .fields
            .iter()
            .map(|field| field.name)
            .filter(|name| self.is_set(&Path::root().field(*name)))
            .collect()
    }

    /// Mark `path` present. Only that exact entry changes.
    pub fn add(&mut self, path: &Path) -> Result<(), PathError> {
        path.check(T::MODEL)?;
        self.presence.force(path.key(), true);

        Ok(())
    }

    /// Mark `path` absent. Only that exact entry changes.
    pub fn remove(&mut self, path: &Path) -> Result<(), PathError> {
        path.check(T::MODEL)?;
        self.presence.force(path.key(), false);

        Ok(())
    }

    /// Drop every memoized answer, manual overrides included.
    pub fn clear_cache(&mut self) {
        self.presence.clear();
    }

    ///
    /// READS
    ///

    /// Typed read of the raw payload node at `path`, or `default` when the
    /// node is missing or does not deserialize as `V`.
    pub fn get_or<V>(&self, path: &Path, default: V) -> V
    where
        V: DeserializeOwned,
    {
        if path.is_empty() {
            return default;
        }

        resolve(&self.payload, path.segments())
            .and_then(|node| V::deserialize(node).ok())
            .unwrap_or(default)
    }

    #[must_use]
    pub const fn payload(&self) -> &JsonValue {
        &self.payload
    }
}

impl<T> Partial<T>
where
    T: EntitySchema + FieldCopy + Default,
{
    ///
    /// READS
    ///

    /// Evaluate `accessor` on the materialized instance when `path` is set.
    ///
    /// Returns `default` without calling `accessor` when the path is unset
    /// or the payload does not materialize.
    pub fn get_if_set<R>(&self, path: &Path, accessor: impl FnOnce(&T) -> R, default: R) -> R {
        if !self.is_set(path) {
            return default;
        }

        match self.instance() {
            Ok(instance) => accessor(instance),
            Err(_) => default,
        }
    }

    ///
    /// MATERIALIZATION
    ///

    /// The payload as a `T`, materialized on first call and reused after.
    pub fn instance(&self) -> Result<&T, PatchError> {
        if let Some(instance) = self.instance.get() {
            return Ok(instance);
        }

        let instance = self.materialize()?;

        Ok(self.instance.get_or_init(|| instance))
    }

    /// A freshly materialized `T` on every call.
    pub fn to_object(&self) -> Result<T, PatchError> {
        self.materialize()
    }

    // `T::default()` overlaid with every declared field the payload carries.
    fn materialize(&self) -> Result<T, PatchError> {
        let entity = T::MODEL.entity_name;
        let payload = canonical::canonicalize(T::MODEL, self.payload.clone());
        let mut instance = T::default();

        let JsonValue::Object(members) = &payload else {
            return Ok(instance);
        };

        for field in T::MODEL.fields {
            let Some(node) = members.get(field.name) else {
                continue;
            };

            instance.merge_field(field.name, node).map_err(|err| {
                tracing::debug!(
                    entity,
                    field = field.name,
                    error = %err,
                    "payload failed to materialize"
                );

                PatchError::Materialize {
                    entity,
                    reason: format!("{}: {err}", field.name),
                }
            })?;
        }

        Ok(instance)
    }

    /// Copy every present top-level field from the payload into `target`.
    ///
    /// Returns the declared names of the copied fields. Absent fields keep
    /// their current value in `target`.
    pub fn copy_to(&self, target: &mut T) -> Result<Vec<&'static str>, PatchError> {
        let present = self.present_fields();
        if present.is_empty() {
            return Ok(present);
        }

        let source = self.instance()?;
        let copied = present
            .into_iter()
            .filter(|name| source.copy_field(target, name))
            .collect();

        Ok(copied)
    }
}

impl<T> Serialize for Partial<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.payload.serialize(serializer)
    }
}

impl<'de, T: EntitySchema> Deserialize<'de> for Partial<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let payload = JsonValue::deserialize(deserializer)?;

        Self::from_value(payload).map_err(serde::de::Error::custom)
    }
}

const fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
