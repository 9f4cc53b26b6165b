//! API route configuration.

use crate::api::handlers::redirect_handler;
use crate::state::AppState;
use axum::{Router, routing::get};

/// Routes served under `/api`.
///
/// # Endpoints
///
/// - `GET /r` - Affiliate redirect (same as the top-level `/r`)
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/r", get(redirect_handler))
}
