//! Bulk Action Dispatcher
//!
//! Applies one action to every selected record, one record at a time and in
//! selection order. A failing record does not abort the batch: every outcome
//! is collected and reported together.
//!
//! Lifecycle: `Idle -> Running -> {Completed, CompletedWithErrors}`.

use crate::core::entity::Record;
use crate::core::error::{BoardError, BoardResult, RequestError, SelectionError};
use crate::core::events::{BoardEvent, BulkEvent, EventBus};
use crate::core::selection::SelectionTracker;
use crate::core::service::DataService;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

/// An operation applicable to many records at once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BulkAction {
    Activate,
    Deactivate,
    Suspend,
    Verify,
    Unverify,
    Feature,
    Unfeature,
    Close,
    Reopen,
    /// Soft delete: status `deleted` plus a deletion timestamp
    Delete,
    Restore,
    SetStatus(String),
}

impl BulkAction {
    /// The patch this action merges into each record
    pub fn patch(&self) -> Value {
        match self {
            BulkAction::Activate => json!({ "status": "active" }),
            BulkAction::Deactivate => json!({ "status": "inactive" }),
            BulkAction::Suspend => json!({ "status": "suspended" }),
            BulkAction::Verify => json!({ "verified": true }),
            BulkAction::Unverify => json!({ "verified": false }),
            BulkAction::Feature => json!({ "featured": true }),
            BulkAction::Unfeature => json!({ "featured": false }),
            BulkAction::Close => json!({ "status": "closed" }),
            BulkAction::Reopen => json!({ "status": "open" }),
            BulkAction::Delete => json!({ "status": "deleted", "deleted_at": Utc::now() }),
            BulkAction::Restore => json!({ "status": "active", "deleted_at": null }),
            BulkAction::SetStatus(status) => json!({ "status": status }),
        }
    }

    pub fn name(&self) -> String {
        match self {
            BulkAction::SetStatus(status) => format!("set-status:{}", status),
            other => serde_json::to_value(other)
                .ok()
                .and_then(|v| v.as_str().map(String::from))
                .unwrap_or_default(),
        }
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BulkAction {
    type Err = BoardError;

    /// Parse `activate`, `set-status:archived`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(status) = s.strip_prefix("set-status:") {
            if !status.is_empty() {
                return Ok(BulkAction::SetStatus(status.to_string()));
            }
        }
        serde_json::from_value(Value::String(s.to_string())).map_err(|_| {
            RequestError::UnknownAction {
                action: s.to_string(),
            }
            .into()
        })
    }
}

/// Where the dispatcher is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkState {
    Idle,
    Running,
    Completed,
    CompletedWithErrors,
}

/// One record the action could not be applied to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkFailure {
    pub id: String,
    /// Error kind, e.g. `NotFoundError`
    pub reason: String,
    pub message: String,
}

/// Aggregate result of a bulk action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub action: String,
    pub succeeded: Vec<String>,
    pub failed: Vec<BulkFailure>,
    pub state: BulkState,
}

impl BulkOutcome {
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Consolidated message, e.g. `"2 of 3 succeeded"`
    pub fn summary(&self) -> String {
        format!("{} of {} succeeded", self.succeeded.len(), self.attempted())
    }

    pub fn failed_ids(&self) -> Vec<String> {
        self.failed.iter().map(|f| f.id.clone()).collect()
    }
}

/// Batches in flight across every clone, and how the last one ended
#[derive(Debug, Clone, Copy)]
struct BulkProgress {
    in_flight: usize,
    last: BulkState,
}

/// Applies a [`BulkAction`] to many records through a [`DataService`]
///
/// Clones share one lifecycle: it reads `Running` while any clone has a
/// batch in flight, otherwise the state the most recent batch ended in.
pub struct BulkActionDispatcher<T: Record> {
    service: Arc<dyn DataService<T>>,
    event_bus: Option<EventBus>,
    progress: Arc<RwLock<BulkProgress>>,
}

impl<T: Record> Clone for BulkActionDispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            event_bus: self.event_bus.clone(),
            progress: self.progress.clone(),
        }
    }
}

impl<T: Record> BulkActionDispatcher<T> {
    pub fn new(service: Arc<dyn DataService<T>>) -> Self {
        Self {
            service,
            event_bus: None,
            progress: Arc::new(RwLock::new(BulkProgress {
                in_flight: 0,
                last: BulkState::Idle,
            })),
        }
    }

    /// Publish a completion event for every finished batch
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.event_bus = Some(bus);
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> BulkState {
        match self.progress.read() {
            Ok(progress) if progress.in_flight > 0 => BulkState::Running,
            Ok(progress) => progress.last,
            Err(_) => BulkState::Idle,
        }
    }

    fn update_progress(&self, f: impl FnOnce(&mut BulkProgress)) -> BoardResult<()> {
        let mut progress = self
            .progress
            .write()
            .map_err(|e| BoardError::Internal(format!("Failed to acquire state lock: {}", e)))?;
        f(&mut progress);
        Ok(())
    }

    fn begin(&self) -> BoardResult<()> {
        self.update_progress(|p| p.in_flight += 1)
    }

    fn finish(&self, state: BulkState) -> BoardResult<()> {
        self.update_progress(|p| {
            p.in_flight = p.in_flight.saturating_sub(1);
            p.last = state;
        })
    }

    /// Apply `action` to each id in order, collecting per-item outcomes
    ///
    /// Fails with `NoSelectionError` before touching the store when `ids`
    /// is empty.
    pub async fn apply(&self, action: &BulkAction, ids: &[String]) -> BoardResult<BulkOutcome> {
        if ids.is_empty() {
            return Err(SelectionError::Empty {
                action: action.name(),
            }
            .into());
        }

        self.begin()?;

        let mut succeeded = Vec::new();
        let mut failed = Vec::new();
        for id in ids {
            match self.service.update(id, action.patch()).await {
                Ok(_) => succeeded.push(id.clone()),
                Err(err) => {
                    tracing::warn!(
                        entity_type = T::resource_name_singular(),
                        %id,
                        action = %action,
                        reason = err.kind(),
                        "bulk action failed for record"
                    );
                    failed.push(BulkFailure {
                        id: id.clone(),
                        reason: err.kind().to_string(),
                        message: err.to_string(),
                    });
                }
            }
        }

        let state = if failed.is_empty() {
            BulkState::Completed
        } else {
            BulkState::CompletedWithErrors
        };
        self.finish(state)?;

        let outcome = BulkOutcome {
            action: action.name(),
            succeeded,
            failed,
            state,
        };

        tracing::info!(
            entity_type = T::resource_name_singular(),
            action = %action,
            summary = %outcome.summary(),
            "bulk action completed"
        );

        if let Some(bus) = &self.event_bus {
            bus.publish(BoardEvent::Bulk(BulkEvent::Completed {
                entity_type: T::resource_name_singular().to_string(),
                bulk_action: outcome.action.clone(),
                succeeded: outcome.succeeded.clone(),
                failed: outcome.failed_ids(),
            }));
        }

        Ok(outcome)
    }

    /// Apply `action` to the current selection, then clear it
    ///
    /// The selection is cleared even when some records failed. An empty
    /// selection is reported as `NoSelectionError` and left as is.
    pub async fn dispatch(
        &self,
        action: &BulkAction,
        selection: &mut SelectionTracker,
    ) -> BoardResult<BulkOutcome> {
        let ids = selection.ids();
        let outcome = self.apply(action, &ids).await?;
        selection.clear();
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        assert_eq!("activate".parse::<BulkAction>().unwrap(), BulkAction::Activate);
        assert_eq!("set-status:archived".parse::<BulkAction>().unwrap(), BulkAction::SetStatus("archived".to_string()));
        let err = "explode".parse::<BulkAction>().unwrap_err();
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }

    #[test]
    fn test_action_names_round_trip() {
        for action in [BulkAction::Unverify, BulkAction::Reopen, BulkAction::SetStatus("paused".into())] {
            assert_eq!(action.name().parse::<BulkAction>().unwrap(), action);
        }
    }

    #[test]
    fn test_delete_is_soft() {
        let patch = BulkAction::Delete.patch();
        assert_eq!(patch["status"], "deleted");
        assert!(patch["deleted_at"].is_string());
    }

    #[test]
    fn test_state_stays_running_while_any_clone_is_busy() {
        use crate::entities::Job;
        use crate::storage::InMemoryDataService;

        let dispatcher = BulkActionDispatcher::<Job>::new(Arc::new(InMemoryDataService::new()));
        let other = dispatcher.clone();
        assert_eq!(dispatcher.state(), BulkState::Idle);

        dispatcher.begin().unwrap();
        other.begin().unwrap();
        other.finish(BulkState::Completed).unwrap();
        assert_eq!(dispatcher.state(), BulkState::Running);
        assert_eq!(other.state(), BulkState::Running);

        dispatcher.finish(BulkState::CompletedWithErrors).unwrap();
        assert_eq!(other.state(), BulkState::CompletedWithErrors);
    }

    #[test]
    fn test_outcome_summary() {
        let outcome = BulkOutcome {
            action: "close".to_string(),
            succeeded: vec!["a".to_string(), "b".to_string()],
            failed: vec![BulkFailure {
                id: "c".to_string(),
                reason: "NotFoundError".to_string(),
                message: "job with id 'c' not found".to_string(),
            }],
            state: BulkState::CompletedWithErrors,
        };
        assert_eq!(outcome.summary(), "2 of 3 succeeded");
        assert!(!outcome.is_complete_success());
    }
}
