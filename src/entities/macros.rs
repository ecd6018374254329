//! Macro for reducing boilerplate when defining record kinds
//!
//! Generates the struct, the `Entity` and `Record` implementations and a few
//! lifecycle helpers for each listed record kind.

/// Create a record kind with automatic trait implementations
///
/// Every generated struct carries the base fields `id`, `type`, `created_at`,
/// `updated_at`, `deleted_at`, `status` and `name`, followed by the declared
/// fields. All fields are reachable through `Record::field_value`; the ones
/// listed under `search` are matched by free-text search.
///
/// # Example
///
/// ```rust,ignore
/// use buildboard::prelude::*;
///
/// record_entity!(
///     Crew,
///     "crew",
///     "crews",
///     search: ["name", "foreman"],
///     {
///         foreman: String,
///         trades: Vec<String>,
///         size: u32,
///     }
/// );
///
/// let crew = Crew::new("crew-1", "Night shift", "active");
/// ```
#[macro_export]
macro_rules! record_entity {
    (
        $type:ident,
        $singular:expr,
        $plural:expr,
        search: [ $( $search_field:expr ),* $(,)? ],
        {
            $( $(#[$field_meta:meta])* $field:ident : $field_type:ty ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Unique, immutable identifier
            pub id: String,

            /// Type of the record
            #[serde(rename = "type")]
            pub entity_type: String,

            /// When this record was created
            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this record was last updated
            pub updated_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this record was soft-deleted (if applicable)
            pub deleted_at: Option<::chrono::DateTime<::chrono::Utc>>,

            /// Current status of the record
            pub status: String,

            /// Display name of the record
            pub name: String,
            $( $(#[$field_meta])* pub $field : $field_type ),*
        }

        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> &str {
                &self.id
            }

            fn entity_type(&self) -> &str {
                &self.entity_type
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn deleted_at(&self) -> Option<::chrono::DateTime<::chrono::Utc>> {
                self.deleted_at
            }

            fn status(&self) -> &str {
                &self.status
            }
        }

        impl $crate::core::entity::Record for $type {
            fn name(&self) -> &str {
                &self.name
            }

            fn searchable_fields() -> &'static [&'static str] {
                &[ $( $search_field ),* ]
            }

            fn field_names() -> &'static [&'static str] {
                &[
                    "id", "type", "created_at", "updated_at", "deleted_at", "status", "name",
                    $( stringify!($field) ),*
                ]
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                use $crate::core::field::{FieldValue, IntoFieldValue};
                match field {
                    "id" => Some(FieldValue::String(self.id.clone())),
                    "type" => Some(FieldValue::String(self.entity_type.clone())),
                    "created_at" => Some(FieldValue::DateTime(self.created_at)),
                    "updated_at" => Some(FieldValue::DateTime(self.updated_at)),
                    "deleted_at" => Some(self.deleted_at.to_field_value()),
                    "status" => Some(FieldValue::String(self.status.clone())),
                    "name" => Some(FieldValue::String(self.name.clone())),
                    $( stringify!($field) => Some(self.$field.to_field_value()), )*
                    _ => None,
                }
            }

            fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }

        impl $type {
            /// Create a record with default values for the kind-specific fields
            pub fn new(
                id: impl Into<String>,
                name: impl Into<String>,
                status: impl Into<String>,
            ) -> Self {
                let now = ::chrono::Utc::now();
                Self {
                    id: id.into(),
                    entity_type: $singular.to_string(),
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                    status: status.into(),
                    name: name.into(),
                    $( $field: Default::default() ),*
                }
            }

            /// Soft delete this record (sets deleted_at timestamp)
            pub fn soft_delete(&mut self) {
                self.deleted_at = Some(::chrono::Utc::now());
                self.updated_at = ::chrono::Utc::now();
            }

            /// Restore a soft-deleted record (clears deleted_at timestamp)
            pub fn restore(&mut self) {
                self.deleted_at = None;
                self.updated_at = ::chrono::Utc::now();
            }

            /// Change the record status
            pub fn set_status(&mut self, status: impl Into<String>) {
                self.status = status.into();
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}
