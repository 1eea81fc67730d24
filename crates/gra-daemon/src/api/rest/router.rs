//! API Router configuration

use super::handlers;
use super::state::AppState;
use crate::config::ServerConfig;
use crate::error::ApiError;
use axum::{
    extract::{DefaultBodyLimit, OriginalUri},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the main API router
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let api_routes = Router::new()
        // Health and status
        .route("/health", get(handlers::health_check))
        .route("/status", get(handlers::daemon_status))
        // Inner-loop optimizer
        .route("/simulate", post(handlers::run_simulation));

    // Build router with middleware
    let router = Router::new()
        .nest("/api/v1", api_routes)
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(server.max_body_size))
        .layer(TraceLayer::new_for_http());

    let router = if server.enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    };

    router.with_state(state)
}

/// Unknown paths get the same JSON error body as handler failures
async fn route_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}
