//! DTOs for the deployment info endpoint.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct WhoamiResponse {
    pub ok: bool,
    pub env: String,
    pub commit: String,
    pub version: String,
    /// Unix timestamp in milliseconds.
    pub now: i64,
}
