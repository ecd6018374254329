//! Entity traits defining the core abstraction for all listed records

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Base trait for all entities held by an Entity Store.
///
/// All entities have:
/// - id: Unique, immutable string identifier
/// - type: Entity type name (e.g., "job", "professional")
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
/// - deleted_at: Soft deletion timestamp (optional)
/// - status: Current status of the entity
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "jobs", "businesses")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "job", "business")
    fn resource_name_singular() -> &'static str;

    // === Core Entity Fields ===

    /// Get the unique identifier for this entity instance
    fn id(&self) -> &str;

    /// Get the entity type name
    fn entity_type(&self) -> &str;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Get the deletion timestamp (soft delete)
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// Get the entity status
    fn status(&self) -> &str;

    // === Utility Methods ===

    /// Check if the entity has been soft-deleted
    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }

    /// Check if the entity is active (status == "active" and not deleted)
    fn is_active(&self) -> bool {
        self.status() == "active" && !self.is_deleted()
    }
}

/// Trait for records that can be listed, filtered, sorted and patched.
///
/// Records extend the base Entity with:
/// - name: A human-readable name (job title, person or company name)
/// - searchable_fields: free-text attributes used by the search filter
/// - field_value: dynamic field access for filters and sorting
pub trait Record: Entity + Serialize + DeserializeOwned {
    /// Get the display name of this record
    fn name(&self) -> &str;

    /// Free-text attributes matched by a search criterion
    fn searchable_fields() -> &'static [&'static str];

    /// Every attribute name the record kind exposes
    fn field_names() -> &'static [&'static str];

    /// Get the value of a specific field by name.
    ///
    /// Returns `None` when the record kind has no such attribute, and
    /// `Some(FieldValue::Null)` when the attribute exists but is unset.
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Refresh the updated_at timestamp
    fn touch(&mut self);

    /// Whether the record kind exposes an attribute with this name
    fn has_field(field: &str) -> bool {
        Self::field_names().contains(&field)
    }
}
