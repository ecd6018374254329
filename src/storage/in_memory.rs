//! In-memory Entity Store
//!
//! Backed by an `IndexMap` so that iteration order is insertion order.

use crate::core::entity::Record;
use crate::core::error::{BoardError, BoardResult, EntityError};
use crate::core::events::{BoardEvent, EntityEvent, EventBus};
use crate::core::service::DataService;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::{Arc, RwLock};

/// Fields a patch may never touch
const IMMUTABLE_FIELDS: &[&str] = &["id", "type"];

/// In-memory data service
///
/// Clones share the same underlying collection.
#[derive(Clone)]
pub struct InMemoryDataService<T: Record> {
    records: Arc<RwLock<IndexMap<String, T>>>,
    event_bus: Option<EventBus>,
}

impl<T: Record> InMemoryDataService<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
            event_bus: None,
        }
    }

    /// Seed the store; later duplicates of an id are skipped
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let mut map = IndexMap::new();
        for record in records {
            let id = record.id().to_string();
            if map.contains_key(&id) {
                tracing::warn!(entity_type = T::resource_name_singular(), %id, "skipping duplicate seed record");
                continue;
            }
            map.insert(id, record);
        }
        Self {
            records: Arc::new(RwLock::new(map)),
            event_bus: None,
        }
    }

    /// Publish Created/Updated events on the given bus
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.event_bus = Some(bus);
        self
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn publish(&self, event: EntityEvent) {
        if let Some(bus) = &self.event_bus {
            bus.publish(BoardEvent::Entity(event));
        }
    }

    fn invalid_patch(id: &str, message: impl Into<String>) -> BoardError {
        EntityError::InvalidPatch {
            entity_type: T::resource_name_singular().to_string(),
            id: id.to_string(),
            message: message.into(),
        }
        .into()
    }

    /// Merge `patch` into a copy of `current`
    fn merge(current: &T, id: &str, patch: &Value) -> BoardResult<T> {
        let fields = patch
            .as_object()
            .ok_or_else(|| Self::invalid_patch(id, "patch must be a JSON object"))?;

        let mut value = serde_json::to_value(current)
            .map_err(|e| BoardError::Internal(format!("failed to serialize record: {}", e)))?;
        let target = value
            .as_object_mut()
            .ok_or_else(|| BoardError::Internal("record did not serialize to an object".into()))?;

        for (key, new_value) in fields {
            if IMMUTABLE_FIELDS.contains(&key.as_str()) {
                return Err(Self::invalid_patch(id, format!("field '{}' is immutable", key)));
            }
            if !target.contains_key(key) {
                return Err(Self::invalid_patch(id, format!("unknown field '{}'", key)));
            }
            target.insert(key.clone(), new_value.clone());
        }

        let mut merged: T =
            serde_json::from_value(value).map_err(|e| Self::invalid_patch(id, e.to_string()))?;
        merged.touch();
        Ok(merged)
    }
}

impl<T: Record> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, record: T) -> BoardResult<T> {
        {
            let mut records = self
                .records
                .write()
                .map_err(|e| BoardError::Internal(format!("Failed to acquire write lock: {}", e)))?;

            if records.contains_key(record.id()) {
                return Err(EntityError::DuplicateId {
                    entity_type: T::resource_name_singular().to_string(),
                    id: record.id().to_string(),
                }
                .into());
            }
            records.insert(record.id().to_string(), record.clone());
        }

        self.publish(EntityEvent::Created {
            entity_type: T::resource_name_singular().to_string(),
            entity_id: record.id().to_string(),
            data: serde_json::to_value(&record).unwrap_or(Value::Null),
        });
        Ok(record)
    }

    async fn get(&self, id: &str) -> BoardResult<Option<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| BoardError::Internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(records.get(id).cloned())
    }

    async fn list(&self) -> BoardResult<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| BoardError::Internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(records.values().cloned().collect())
    }

    async fn update(&self, id: &str, patch: Value) -> BoardResult<T> {
        let updated = {
            let mut records = self
                .records
                .write()
                .map_err(|e| BoardError::Internal(format!("Failed to acquire write lock: {}", e)))?;

            let current = records.get(id).ok_or_else(|| EntityError::NotFound {
                entity_type: T::resource_name_singular().to_string(),
                id: id.to_string(),
            })?;

            let merged = Self::merge(current, id, &patch)?;
            records.insert(id.to_string(), merged.clone());
            merged
        };

        self.publish(EntityEvent::Updated {
            entity_type: T::resource_name_singular().to_string(),
            entity_id: id.to_string(),
            data: patch,
        });
        Ok(updated)
    }
}
