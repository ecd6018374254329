//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::{EntityRegistry, RecordDescriptor};
use super::exposure::RestExposure;
use super::handlers::RecordState;
use crate::config::BoardConfig;
use crate::core::bulk::BulkActionDispatcher;
use crate::core::entity::Record;
use crate::core::events::EventBus;
use crate::core::service::DataService;
use crate::entities::{Business, Job, Professional, SeedData, User};
use crate::storage::InMemoryDataService;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for creating HTTP servers with auto-registered routes
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(BoardConfig::from_yaml_file("board.yaml")?)
///     .register::<Job>(InMemoryDataService::new())?
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: BoardConfig,
    entity_registry: EntityRegistry,
    custom_routes: Vec<Router>,
    event_bus: Option<EventBus>,
    permissive_cors: bool,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default marketplace configuration
    pub fn new() -> Self {
        Self {
            config: BoardConfig::default_config(),
            entity_registry: EntityRegistry::new(),
            custom_routes: Vec::new(),
            event_bus: None,
            permissive_cors: false,
        }
    }

    /// Replace the board configuration
    ///
    /// Call before registering services: each registration reads the
    /// settings of its entity kind at that point.
    pub fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes that don't fit the listing pattern
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Enable the event bus
    ///
    /// Bulk dispatchers created by later registrations publish to it, and
    /// [`register_seeded`](Self::register_seeded) wires it into the stores.
    pub fn with_event_bus(mut self, capacity: usize) -> Self {
        self.event_bus = Some(EventBus::new(capacity));
        self
    }

    /// Use a bus the caller already publishes to or subscribes on
    pub fn with_shared_event_bus(mut self, bus: EventBus) -> Self {
        self.event_bus = Some(bus);
        self
    }

    /// Answer cross-origin requests from any origin
    pub fn with_permissive_cors(mut self) -> Self {
        self.permissive_cors = true;
        self
    }

    /// The event bus, if enabled
    pub fn event_bus(&self) -> Option<&EventBus> {
        self.event_bus.as_ref()
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Register a service for record kind `T`
    ///
    /// Fails when the configuration has no entry for `T`.
    pub fn register<T: Record>(self, service: impl DataService<T> + 'static) -> Result<Self> {
        self.register_arc::<T>(Arc::new(service))
    }

    /// Register a shared service for record kind `T`
    pub fn register_arc<T: Record>(mut self, service: Arc<dyn DataService<T>>) -> Result<Self> {
        let entity = self.config.entity(T::resource_name_singular())?.clone();

        let mut dispatcher = BulkActionDispatcher::new(service.clone());
        if let Some(bus) = &self.event_bus {
            dispatcher = dispatcher.with_event_bus(bus.clone());
        }

        let state = RecordState {
            service,
            dispatcher,
            default_limit: self.config.page_size(&entity.singular),
            max_limit: self.config.pagination.max_limit,
            entity,
        };

        tracing::debug!(
            entity_type = %state.entity.singular,
            plural = %state.entity.plural,
            "registered entity routes"
        );

        self.entity_registry
            .register(Box::new(RecordDescriptor::new(state)));
        Ok(self)
    }

    /// Register in-memory stores for the four marketplace listings
    pub fn register_seeded(self, data: SeedData) -> Result<Self> {
        fn store<T: Record>(records: Vec<T>, bus: Option<&EventBus>) -> InMemoryDataService<T> {
            let service = InMemoryDataService::with_records(records);
            match bus {
                Some(bus) => service.with_event_bus(bus.clone()),
                None => service,
            }
        }

        let bus = self.event_bus.clone();
        let bus = bus.as_ref();
        self.register::<Job>(store(data.jobs, bus))?
            .register::<User>(store(data.users, bus))?
            .register::<Business>(store(data.businesses, bus))?
            .register::<Professional>(store(data.professionals, bus))
    }

    /// Build the final REST router
    pub fn build(self) -> Result<Router> {
        if self.entity_registry.is_empty() {
            tracing::warn!("building a server with no registered entities");
        }

        let mut app = RestExposure::build_router(&self.entity_registry, self.custom_routes)
            .layer(TraceLayer::new_for_http());
        if self.permissive_cors {
            app = app.layer(CorsLayer::permissive());
        }
        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `addr`, then serves until SIGTERM or Ctrl+C.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedConfig;

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = ServerBuilder::new();
        assert!(builder.entity_registry.is_empty());
        assert!(builder.custom_routes.is_empty());
        assert!(builder.event_bus.is_none());
        assert_eq!(builder.config().entities.len(), 4);
    }

    #[test]
    fn test_with_event_bus_sets_bus() {
        let builder = ServerBuilder::new().with_event_bus(16);
        assert!(builder.event_bus().is_some());
    }

    #[test]
    fn test_with_custom_routes_appends_router() {
        let builder = ServerBuilder::new()
            .with_custom_routes(Router::new())
            .with_custom_routes(Router::new());
        assert_eq!(builder.custom_routes.len(), 2);
    }

    #[test]
    fn test_register_records_entity_types() {
        let builder = ServerBuilder::new()
            .register::<Job>(InMemoryDataService::new())
            .expect("job is configured")
            .register::<User>(InMemoryDataService::new())
            .expect("user is configured");
        assert_eq!(builder.entity_registry.entity_types(), vec!["job", "user"]);
        assert_eq!(builder.entity_registry.plurals(), vec!["jobs", "users"]);
    }

    #[test]
    fn test_register_unconfigured_entity_fails() {
        let config = BoardConfig::from_yaml_str(
            "entities:\n  - singular: user\n    plural: users\n",
        )
        .unwrap();
        let result = ServerBuilder::new()
            .with_config(config)
            .register::<Job>(InMemoryDataService::new());
        let err = result.err().expect("job is not configured");
        assert!(err.to_string().contains("'job'"));
    }

    #[test]
    fn test_register_seeded_registers_all_kinds() {
        let data = SeedData::generate(&SeedConfig::default());
        let builder = ServerBuilder::new()
            .with_event_bus(64)
            .register_seeded(data)
            .expect("all kinds are configured");
        assert_eq!(
            builder.entity_registry.entity_types(),
            vec!["job", "user", "business", "professional"]
        );
        assert!(builder.build().is_ok());
    }
}
