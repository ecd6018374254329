//! Server module for building HTTP servers with auto-registered routes
//!
//! `ServerBuilder` registers, for every record kind:
//! - `GET /{plural}` listing with search, filters, sort and pagination
//! - `POST /{plural}` and `GET|PATCH /{plural}/{id}`
//! - `POST /{plural}/bulk` for bulk actions

pub mod builder;
pub mod entity_registry;
pub mod exposure;
pub mod handlers;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry, RecordDescriptor};
pub use handlers::{BulkRequest, RecordState};
