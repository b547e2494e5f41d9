use crate::model::{field::FieldModel, names_match};

///
/// EntityModel
/// Minimal, macro-generated runtime model for one record type.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Fully-qualified Rust type path (for diagnostics).
    pub path: &'static str,
    /// Stable external name used in error messages and logs.
    pub entity_name: &'static str,
    /// Name of the primary identifier field (points at an entry in `fields`).
    pub primary_key: &'static str,
    /// Ordered field list (authoritative for compilers and merges).
    pub fields: &'static [FieldModel],
}

impl EntityModel {
    /// Look up a declared field by name, case-insensitively.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldModel> {
        self.fields.iter().find(|field| names_match(field.name, name))
    }

    /// The primary identifier field, if the model declares it correctly.
    #[must_use]
    pub fn primary_key_field(&self) -> Option<&'static FieldModel> {
        self.field(self.primary_key)
    }

    /// Declared text fields, in declaration order.
    pub fn text_fields(&self) -> impl Iterator<Item = &'static FieldModel> {
        self.fields.iter().filter(|field| field.kind.is_text())
    }
}
