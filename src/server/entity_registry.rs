//! Entity registry for managing entity descriptors and auto-generating routes

use super::handlers::{
    RecordState, bulk_action, create_record, get_record, list_records, update_record,
};
use crate::core::entity::Record;
use axum::Router;
use axum::routing::{get, post};
use indexmap::IndexMap;
use std::marker::PhantomData;

/// Trait that describes how to build routes for an entity
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "job")
    fn entity_type(&self) -> &str;

    /// The plural form (e.g., "jobs")
    fn plural(&self) -> &str;

    /// Build the routes for this entity:
    /// - GET/POST /{plural}
    /// - GET/PATCH /{plural}/{id}
    /// - POST /{plural}/bulk
    fn build_routes(&self) -> Router;
}

/// Descriptor for any [`Record`] kind, backed by the generic handlers
pub struct RecordDescriptor<T: Record> {
    state: RecordState<T>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> RecordDescriptor<T> {
    pub fn new(state: RecordState<T>) -> Self {
        Self {
            state,
            _marker: PhantomData,
        }
    }
}

impl<T: Record> EntityDescriptor for RecordDescriptor<T> {
    fn entity_type(&self) -> &str {
        &self.state.entity.singular
    }

    fn plural(&self) -> &str {
        &self.state.entity.plural
    }

    fn build_routes(&self) -> Router {
        let plural = self.plural();
        Router::new()
            .route(
                &format!("/{}", plural),
                get(list_records::<T>).post(create_record::<T>),
            )
            .route(&format!("/{}/bulk", plural), post(bulk_action::<T>))
            .route(
                &format!("/{}/{{id}}", plural),
                get(get_record::<T>).patch(update_record::<T>),
            )
            .with_state(self.state.clone())
    }
}

/// Registry for all entities in the application
///
/// Keeps registration order so route listings are stable.
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: IndexMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity descriptor; a second descriptor for the same
    /// entity type replaces the first
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Build a router with all registered entity routes
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    /// Registered entity types, in registration order
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }

    /// Plural route names, in registration order
    pub fn plurals(&self) -> Vec<&str> {
        self.descriptors.values().map(|d| d.plural()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
