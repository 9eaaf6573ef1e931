//! API Routes
//!
//! Configures the Axum router with all group cache endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    empty_key_handler, get_handler, groups_handler, health_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/:group/:key` - Fetch a value through a group
/// - `GET /api/:group/` - Empty key, rejected with 400
/// - `GET /stats/:group` - Get a group's statistics
/// - `GET /groups` - List registered groups
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/api/:group/", get(empty_key_handler))
        .route("/api/:group/:key", get(get_handler))
        .route("/stats/:group", get(stats_handler))
        .route("/groups", get(groups_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
