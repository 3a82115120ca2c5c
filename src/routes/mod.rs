//! HTTP Routes
//!
//! - `/search/` - structured keyword search relayed to arXiv
//! - `/freesearch/` - raw arXiv expression passthrough
//! - `/health` - liveness probe

pub mod free_search;
pub mod health;
pub mod search;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::apply_cors;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let origins = state.config.server.cors_allowed_origins.clone();
    let router = Router::new()
        .merge(search::router(state.clone()))
        .merge(free_search::router(state.clone()))
        .merge(health::router(state));

    apply_cors(router, &origins).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{body::Body, http::{Request, StatusCode}};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_reports_upstream() {
        let state = AppState::new(Config::with_upstream("http://127.0.0.1:9/api/query")).unwrap();
        let response = create_router(state)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["upstream"], "http://127.0.0.1:9/api/query");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let state = AppState::new(Config::with_upstream("http://127.0.0.1:9/api/query")).unwrap();
        let response = create_router(state)
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_validation_through_full_router() {
        let state = AppState::new(Config::with_upstream("http://127.0.0.1:9/api/query")).unwrap();
        let response = create_router(state)
            .oneshot(Request::builder().uri("/search/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
