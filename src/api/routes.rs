//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{group_handler, health_handler, owner_handler, stats_handler, AppState};

/// Path prefix under which groups are served.
pub const BASE_PATH: &str = "/_groupcache";

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /_groupcache/:group/:key` - Cached bytes of a key
/// - `GET /owner/:key` - Peer owning a key on the ring
/// - `GET /stats` - Per-group statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(&format!("{BASE_PATH}/:group/:key"), get(group_handler))
        .route("/owner/:key", get(owner_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::GroupRegistry;
    use crate::ring::HashRing;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let registry = Arc::new(GroupRegistry::new());
        registry.new_group("scores", 0, |key: &str| -> anyhow::Result<Vec<u8>> {
            Ok(key.to_uppercase().into_bytes())
        });
        create_router(AppState::new(registry, HashRing::default()))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_group_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/_groupcache/scores/tom")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"TOM");
    }

    #[tokio::test]
    async fn test_group_endpoint_unknown_group() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/_groupcache/missing/tom")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
