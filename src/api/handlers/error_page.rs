//! Handler for the standalone error page.

use axum::{extract::RawQuery, http::HeaderMap, response::Response};

use crate::api::dto::error_page::ErrorPageQuery;
use crate::error::AppError;
use crate::utils::response_format::ResponseFormat;

/// Renders the error page for a caller-supplied reason.
///
/// # Endpoint
///
/// `GET /error?reason=<code>&host=<host>`
///
/// Always answers 400. `reason` and `host` are reduced to safe characters
/// before they are echoed back.
pub async fn error_page_handler(
    RawQuery(raw_query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let query = ErrorPageQuery::from_query_string(raw_query.as_deref().unwrap_or_default());
    let error = AppError::Reported {
        reason: query.reason(),
        host: query.host(),
    };

    error.into_negotiated_response(ResponseFormat::from_headers(&headers))
}
