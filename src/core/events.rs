//! Board event bus
//!
//! Every mutation publishes an event so the presentation layer can show an
//! acknowledgement ("3 of 4 jobs closed") or a specific failure reason.
//!
//! ```text
//! InMemoryDataService ──┐
//!                       ├──▶ EventBus::publish() ──▶ broadcast channel ──▶ subscribers
//! BulkActionDispatcher ─┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let bus = EventBus::new(256);
//! let mut rx = bus.subscribe();
//!
//! let service = InMemoryDataService::<Job>::new().with_event_bus(bus.clone());
//! service.update("job-1", json!({"status": "closed"})).await?;
//!
//! if let Ok(envelope) = rx.recv().await {
//!     println!("{} {}", envelope.event.action(), envelope.event.entity_type());
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Events related to single-record mutations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EntityEvent {
    /// A record was inserted
    Created {
        entity_type: String,
        entity_id: String,
        data: serde_json::Value,
    },
    /// A record was patched
    Updated {
        entity_type: String,
        entity_id: String,
        data: serde_json::Value,
    },
}

/// Events related to bulk actions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BulkEvent {
    /// A bulk action finished, possibly with per-item failures
    Completed {
        entity_type: String,
        bulk_action: String,
        succeeded: Vec<String>,
        failed: Vec<String>,
    },
}

/// Top-level event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoardEvent {
    Entity(EntityEvent),
    Bulk(BulkEvent),
}

impl BoardEvent {
    pub fn event_kind(&self) -> &str {
        match self {
            BoardEvent::Entity(_) => "entity",
            BoardEvent::Bulk(_) => "bulk",
        }
    }

    /// Get the entity type this event relates to
    pub fn entity_type(&self) -> &str {
        match self {
            BoardEvent::Entity(EntityEvent::Created { entity_type, .. })
            | BoardEvent::Entity(EntityEvent::Updated { entity_type, .. })
            | BoardEvent::Bulk(BulkEvent::Completed { entity_type, .. }) => entity_type,
        }
    }

    /// Get the record id for single-record events
    pub fn entity_id(&self) -> Option<&str> {
        match self {
            BoardEvent::Entity(EntityEvent::Created { entity_id, .. })
            | BoardEvent::Entity(EntityEvent::Updated { entity_id, .. }) => Some(entity_id),
            BoardEvent::Bulk(_) => None,
        }
    }

    pub fn action(&self) -> &str {
        match self {
            BoardEvent::Entity(EntityEvent::Created { .. }) => "created",
            BoardEvent::Entity(EntityEvent::Updated { .. }) => "updated",
            BoardEvent::Bulk(BulkEvent::Completed { .. }) => "completed",
        }
    }
}

/// Envelope wrapping an event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: BoardEvent,
}

impl EventEnvelope {
    pub fn new(event: BoardEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone; every clone publishes into the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// Slow receivers start lagging once `capacity` events are buffered.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never blocks. Returns the number of receivers that will see the event;
    /// with no subscribers the event is dropped.
    pub fn publish(&self, event: BoardEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_event_serialization() {
        let event = EntityEvent::Updated {
            entity_type: "job".to_string(),
            entity_id: "job-1".to_string(),
            data: json!({"status": "closed"}),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "updated");
        assert_eq!(json["entity_id"], "job-1");
    }

    #[test]
    fn test_bulk_event_accessors() {
        let event = BoardEvent::Bulk(BulkEvent::Completed {
            entity_type: "user".to_string(),
            bulk_action: "verify".to_string(),
            succeeded: vec!["u1".to_string()],
            failed: vec![],
        });

        assert_eq!(event.entity_type(), "user");
        assert_eq!(event.entity_id(), None);
        assert_eq!(event.action(), "completed");
        assert_eq!(event.event_kind(), "bulk");
    }

    #[tokio::test]
    async fn test_event_bus_publish_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        let receivers = bus.publish(BoardEvent::Entity(EntityEvent::Created {
            entity_type: "job".to_string(),
            entity_id: "job-7".to_string(),
            data: json!({}),
        }));
        assert_eq!(receivers, 1);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.event.entity_id(), Some("job-7"));
        assert_eq!(received.event.action(), "created");
    }

    #[test]
    fn test_event_bus_publish_without_subscribers() {
        let bus = EventBus::default();
        let receivers = bus.publish(BoardEvent::Bulk(BulkEvent::Completed {
            entity_type: "job".to_string(),
            bulk_action: "close".to_string(),
            succeeded: vec![],
            failed: vec![],
        }));
        assert_eq!(receivers, 0);
    }
}
