//! Handler for deployment info endpoint.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::api::dto::whoami::WhoamiResponse;
use crate::state::AppState;

/// Reports which build is serving requests.
///
/// # Endpoint
///
/// `GET /whoami`
pub async fn whoami_handler(State(state): State<AppState>) -> Json<WhoamiResponse> {
    Json(WhoamiResponse {
        ok: true,
        env: state.deployment.env.clone(),
        commit: state.deployment.commit.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        now: Utc::now().timestamp_millis(),
    })
}
