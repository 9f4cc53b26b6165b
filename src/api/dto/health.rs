//! DTOs for health check endpoint.

use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    /// Unix timestamp in milliseconds.
    pub ts: i64,
    pub version: String,
    /// `ok`, `closed`, or `disabled` when decision records are turned off.
    pub decision_queue: &'static str,
}
