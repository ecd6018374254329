//! Core module containing fundamental traits and types for the board

pub mod bulk;
pub mod engine;
pub mod entity;
pub mod error;
pub mod events;
pub mod field;
pub mod filter;
pub mod query;
pub mod selection;
pub mod service;
pub mod validation;

pub use bulk::{BulkAction, BulkActionDispatcher, BulkFailure, BulkOutcome, BulkState};
pub use engine::QueryEngine;
pub use entity::{Entity, Record};
pub use error::{BoardError, BoardResult};
pub use events::{BoardEvent, EventBus, EventEnvelope};
pub use field::{FieldFormat, FieldValue};
pub use filter::{FilterSet, FilterValue};
pub use query::{PageRequest, QueryRequest, QueryResponse, SortDirection, SortSpec};
pub use selection::SelectionTracker;
pub use service::DataService;
