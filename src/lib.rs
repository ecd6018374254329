//! # BuildBoard
//!
//! Listing, filtering and bulk-action engine for a construction job
//! marketplace.
//!
//! ## Features
//!
//! - **Entity Stores**: keyed, insertion-ordered collections of jobs, users,
//!   businesses and professionals with JSON merge-patch updates
//! - **Query Engine**: free-text search, faceted filters, numeric ranges,
//!   sorting and pagination in one deterministic pass
//! - **Bulk Actions**: apply one action to many selected records and get a
//!   per-record outcome report
//! - **Job Post Wizard**: a guarded, step-by-step job creation flow
//! - **REST exposure**: every listing served over HTTP with Axum
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use buildboard::prelude::*;
//!
//! let jobs = InMemoryDataService::with_records(vec![
//!     Job::builder("j1", "Site Carpenter").skills(["Framing"]).build(),
//!     Job::builder("j2", "Platform Engineer").status("closed").build(),
//! ]);
//!
//! let request = QueryRequest::all()
//!     .with_filters(FilterSet::new().with_filter("status", FilterValue::Category("open".into())));
//! let open = jobs.query(&request).await?;
//! assert_eq!(open.total_count, 1);
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;
pub mod wizard;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        bulk::{BulkAction, BulkActionDispatcher, BulkFailure, BulkOutcome, BulkState},
        engine::QueryEngine,
        entity::{Entity, Record},
        error::{BoardError, BoardResult, EntityError, SelectionError, ValidationError},
        events::{BoardEvent, BulkEvent, EntityEvent, EventBus, EventEnvelope},
        field::{FieldFormat, FieldValue},
        filter::{FilterSet, FilterValue},
        query::{
            PageRequest, PaginatedResponse, QueryParams, QueryRequest, QueryResponse,
            SortDirection, SortSpec,
        },
        selection::SelectionTracker,
        service::DataService,
        validation::RuleSet,
    };

    // === Macros ===
    pub use crate::record_entity;

    // === Entities ===
    pub use crate::entities::{Business, Job, JobBuilder, Professional, SeedData, User};

    // === Storage ===
    pub use crate::storage::InMemoryDataService;

    // === Config ===
    pub use crate::config::{BoardConfig, EntityConfig, SeedConfig, WizardConfig};

    // === Wizard ===
    pub use crate::wizard::{JobDraft, JobPostWizard, WizardStep};

    // === Server ===
    pub use crate::server::{EntityDescriptor, EntityRegistry, ServerBuilder};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
