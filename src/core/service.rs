//! Service boundary for Entity Stores
//!
//! Handlers, the bulk dispatcher and the wizard only ever talk to a
//! `DataService<T>`; whether it is backed by memory or a remote API is
//! invisible to them.

use crate::core::engine::QueryEngine;
use crate::core::entity::Record;
use crate::core::error::BoardResult;
use crate::core::field::FieldValue;
use crate::core::query::{QueryRequest, QueryResponse};
use async_trait::async_trait;
use serde_json::Value;

/// Service trait for managing one kind of record
#[async_trait]
pub trait DataService<T: Record>: Send + Sync {
    /// Insert a new record; fails with `DuplicateId` if the id is taken
    async fn create(&self, record: T) -> BoardResult<T>;

    /// Get a record by id
    async fn get(&self, id: &str) -> BoardResult<Option<T>>;

    /// Every record, in insertion order
    async fn list(&self) -> BoardResult<Vec<T>>;

    /// Merge the fields of `patch` (a JSON object) into the record
    ///
    /// Fails with `NotFound` for an unknown id and `InvalidPatch` when the
    /// patch does not fit the record kind. The stored record is replaced;
    /// earlier clones are not affected.
    async fn update(&self, id: &str, patch: Value) -> BoardResult<T>;

    /// Records whose `field` equals `value`
    async fn search(&self, field: &str, value: &FieldValue) -> BoardResult<Vec<T>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|record| record.field_value(field).as_ref() == Some(value))
            .collect())
    }

    /// Filter, sort and paginate the collection
    async fn query(&self, request: &QueryRequest) -> BoardResult<QueryResponse<T>> {
        let records = self.list().await?;
        Ok(QueryEngine::run(&records, request))
    }
}
