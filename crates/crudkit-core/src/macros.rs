// entity_model
/// Declare the descriptor table for a record type.
///
/// Generates `EntitySchema`, `FieldValues`, `FieldCopy`, and `FieldValue`
/// for the named type. Each field entry pairs the Rust member with its
/// declared (payload/query) name and semantic kind; every member type must
/// implement `FieldValue`, `Clone` and `DeserializeOwned`.
///
/// ```ignore
/// entity_model! {
///     Company,
///     path = "app::Company",
///     entity_name = "Company",
///     primary_key = "Id",
///     fields = [
///         (id, "Id", FieldKind::Ulid),
///         (name, "Name", FieldKind::Text),
///     ],
/// }
/// ```
#[macro_export]
macro_rules! entity_model {
    (
        $name:ty,
        path = $path:expr,
        entity_name = $entity_name:expr,
        primary_key = $primary_key:expr,
        fields = [ $( ($member:ident, $field_name:expr, $field_kind:expr) ),+ $(,)? ] $(,)?
    ) => {
        impl $crate::traits::EntitySchema for $name {
            const MODEL: &'static $crate::model::entity::EntityModel = {
                const FIELDS: &[$crate::model::field::FieldModel] = &[
                    $(
                        $crate::model::field::FieldModel {
                            name: $field_name,
                            kind: $field_kind,
                        },
                    )+
                ];

                &$crate::model::entity::EntityModel {
                    path: $path,
                    entity_name: $entity_name,
                    primary_key: $primary_key,
                    fields: FIELDS,
                }
            };
        }

        impl $crate::traits::FieldValues for $name {
            fn get_value(&self, name: &str) -> Option<$crate::value::Value> {
                $(
                    if $crate::model::names_match($field_name, name) {
                        return Some($crate::traits::FieldValue::to_value(&self.$member));
                    }
                )+

                None
            }
        }

        impl $crate::traits::FieldCopy for $name {
            fn copy_field(&self, target: &mut Self, name: &str) -> bool {
                $(
                    if $crate::model::names_match($field_name, name) {
                        target.$member = ::core::clone::Clone::clone(&self.$member);
                        return true;
                    }
                )+

                false
            }

            fn merge_field(
                &mut self,
                name: &str,
                node: &$crate::traits::JsonValue,
            ) -> ::core::result::Result<bool, $crate::traits::JsonError> {
                $(
                    if $crate::model::names_match($field_name, name) {
                        self.$member = $crate::traits::read_member(node)?;
                        return ::core::result::Result::Ok(true);
                    }
                )+

                ::core::result::Result::Ok(false)
            }
        }

        // Nested records carry no comparable value of their own.
        impl $crate::traits::FieldValue for $name {
            fn to_value(&self) -> $crate::value::Value {
                $crate::value::Value::Unsupported
            }
        }
    };
}
