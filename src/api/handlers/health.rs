//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Returns service liveness and decision queue status.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Service is up
/// - **503 Service Unavailable**: The decision worker has stopped
///
/// # Response
///
/// ```json
/// {
///   "ok": true,
///   "ts": 1767225600000,
///   "version": "0.1.0",
///   "decision_queue": "ok"
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let decision_queue = match &state.decision_sender {
        None => "disabled",
        Some(sender) if sender.is_closed() => "closed",
        Some(_) => "ok",
    };
    let healthy = decision_queue != "closed";

    let response = HealthResponse {
        ok: healthy,
        ts: Utc::now().timestamp_millis(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        decision_queue,
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
