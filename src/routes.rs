//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`        - Service info page
//! - `GET  /r`       - Affiliate redirect
//! - `GET  /api/r`   - Affiliate redirect (API path)
//! - `GET  /error`   - Error page for a given reason
//! - `GET  /health`  - Health check: decision queue
//! - `GET  /whoami`  - Deployment info
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{
    error_page_handler, health_handler, index_handler, redirect_handler, whoami_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// All routes with tracing, before path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/r", get(redirect_handler))
        .route("/error", get(error_page_handler))
        .route("/health", get(health_handler))
        .route("/whoami", get(whoami_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}
