//! Generic HTTP handlers for every registered record kind
//!
//! One set of handlers serves all four listings; the record type is a type
//! parameter and the per-kind settings live in [`RecordState`].

use crate::config::EntityConfig;
use crate::core::bulk::{BulkAction, BulkActionDispatcher, BulkOutcome};
use crate::core::entity::Record;
use crate::core::error::{BoardResult, EntityError};
use crate::core::query::{PaginatedResponse, QueryParams};
use crate::core::service::DataService;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// State shared by the handlers of one record kind
pub struct RecordState<T: Record> {
    pub service: Arc<dyn DataService<T>>,
    pub dispatcher: BulkActionDispatcher<T>,
    pub entity: EntityConfig,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl<T: Record> Clone for RecordState<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            dispatcher: self.dispatcher.clone(),
            entity: self.entity.clone(),
            default_limit: self.default_limit,
            max_limit: self.max_limit,
        }
    }
}

/// Body of `POST /{plural}/bulk`
#[derive(Debug, Clone, Deserialize)]
pub struct BulkRequest {
    /// Action name, e.g. `activate` or `set-status:archived`
    pub action: String,
    #[serde(default)]
    pub ids: Vec<String>,
}

fn not_found<T: Record>(id: &str) -> EntityError {
    EntityError::NotFound {
        entity_type: T::resource_name_singular().to_string(),
        id: id.to_string(),
    }
}

/// `GET /{plural}?page=&limit=&q=&filter=&sort=`
pub async fn list_records<T: Record>(
    State(state): State<RecordState<T>>,
    Query(params): Query<QueryParams>,
) -> BoardResult<Json<PaginatedResponse<T>>> {
    let mut request = params.to_request(state.default_limit, state.max_limit);
    if params.sort.is_none() {
        request.sort = state.entity.default_sort();
    }

    let response = state.service.query(&request).await?;
    Ok(Json(PaginatedResponse::from_response(
        response,
        request.page.index + 1,
        request.page.size,
    )))
}

/// `GET /{plural}/{id}`
pub async fn get_record<T: Record>(
    State(state): State<RecordState<T>>,
    Path(id): Path<String>,
) -> BoardResult<Json<T>> {
    let record = state.service.get(&id).await?.ok_or_else(|| not_found::<T>(&id))?;
    Ok(Json(record))
}

/// `POST /{plural}` with a complete record as body
pub async fn create_record<T: Record>(
    State(state): State<RecordState<T>>,
    Json(payload): Json<Value>,
) -> BoardResult<(StatusCode, Json<T>)> {
    let record: T = serde_json::from_value(payload)?;
    let created = state.service.create(record).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PATCH /{plural}/{id}` with a JSON merge patch as body
pub async fn update_record<T: Record>(
    State(state): State<RecordState<T>>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> BoardResult<Json<T>> {
    let updated = state.service.update(&id, patch).await?;
    Ok(Json(updated))
}

/// `POST /{plural}/bulk`
pub async fn bulk_action<T: Record>(
    State(state): State<RecordState<T>>,
    Json(request): Json<BulkRequest>,
) -> BoardResult<Json<BulkOutcome>> {
    let action: BulkAction = request.action.parse()?;
    let outcome = state.dispatcher.apply(&action, &request.ids).await?;
    Ok(Json(outcome))
}
