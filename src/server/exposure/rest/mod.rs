//! REST API exposure for the board
//!
//! Consumes an [`EntityRegistry`] and produces an Axum `Router` with
//! health checks, a route index and every registered listing.

use crate::server::entity_registry::EntityRegistry;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - `GET /` listing the registered collections
    /// - Entity routes
    /// - Custom routes
    pub fn build_router(registry: &EntityRegistry, custom_routes: Vec<Router>) -> Router {
        let collections: Vec<String> = registry
            .plurals()
            .into_iter()
            .map(|plural| format!("/{}", plural))
            .collect();

        let index = Router::new().route(
            "/",
            get(move || {
                let collections = collections.clone();
                async move { Json(json!({ "collections": collections })) }
            }),
        );

        let mut app = Self::health_routes()
            .merge(index)
            .merge(registry.build_routes());

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "buildboard"
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = tokio_test::assert_ok!(app.oneshot(request).await);
        let status = response.status();
        let bytes = tokio_test::assert_ok!(to_bytes(response.into_body(), usize::MAX).await);
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_routes_on_empty_registry() {
        let registry = EntityRegistry::new();

        for uri in ["/health", "/healthz"] {
            let app = RestExposure::build_router(&registry, Vec::new());
            let (status, body) = get_json(app, uri).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["service"], "buildboard");
        }
    }

    #[tokio::test]
    async fn test_index_is_empty_without_entities() {
        let app = RestExposure::build_router(&EntityRegistry::new(), Vec::new());
        let (_, body) = get_json(app, "/").await;
        assert_eq!(body["collections"], json!([]));
    }

    #[tokio::test]
    async fn test_custom_routes_are_merged() {
        let custom = Router::new().route("/ping", get(|| async { Json(json!({"pong": true})) }));
        let app = RestExposure::build_router(&EntityRegistry::new(), vec![custom]);
        let (status, body) = get_json(app, "/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pong"], true);
    }
}
