//! Handler for the affiliate redirect endpoint.

use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::api::dto::redirect::RedirectQuery;
use crate::domain::decision_event::DecisionEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::response_format::ResponseFormat;

/// Resolves a shared product link and redirects to it.
///
/// # Endpoint
///
/// `GET /r?url=<target>` (also `/api/r`; `u` and `t` are accepted aliases)
///
/// # Request Flow
///
/// 1. Pick the target from `url`, `u` or `t` (first non-empty value of a repeated key)
/// 2. Run the redirect pipeline (normalize, sanitize, expand, classify, build)
/// 3. Queue a decision event for the background worker
/// 4. Return 302 Found with `Cache-Control: no-store`
///
/// # Decision Records
///
/// Every outcome, including errors, produces one [`DecisionEvent`]. Events go
/// to a bounded channel with `try_send`; when the queue is full or closed the
/// event is dropped and the response is unaffected.
///
/// # Errors
///
/// - 400 `missing_url` / `invalid_url` / `bad_protocol`
/// - 403 `domain_not_allowed` when unmapped domains are blocked
///
/// Errors are rendered as JSON or HTML depending on the `Accept` header.
pub async fn redirect_handler(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let query = RedirectQuery::from_query_string(raw_query.as_deref().unwrap_or_default());
    let format = ResponseFormat::from_headers(&headers);

    let outcome = match query.target() {
        Some(target) => state.redirect_service.resolve(target).await,
        None => Err(AppError::MissingTarget),
    };
    let outcome =
        outcome.and_then(|resolution| found(&resolution.location).map(|r| (r, resolution)));

    let (response, event) = match outcome {
        Ok((response, resolution)) => {
            let event = DecisionEvent::new(
                StatusCode::FOUND.as_u16(),
                resolution.host,
                resolution.network,
                resolution.is_affiliate,
            )
            .with_expanded(resolution.expanded);
            (response, event)
        }
        Err(e) => {
            let event = DecisionEvent::new(
                e.status().as_u16(),
                e.host().unwrap_or_default(),
                None,
                false,
            );
            (e.into_negotiated_response(format), event)
        }
    };

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());
    emit_decision(
        &state,
        event.with_request_meta(query.correlation_id(), user_agent),
    );

    response
}

/// Builds a `302 Found` response that must not be cached.
fn found(location: &str) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(location).map_err(|_| AppError::Internal)?;

    Ok((
        StatusCode::FOUND,
        [
            (header::LOCATION, location),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
        ],
    )
        .into_response())
}

fn emit_decision(state: &AppState, event: DecisionEvent) {
    let Some(sender) = &state.decision_sender else {
        return;
    };

    if let Err(e) = sender.try_send(event) {
        debug!("Decision event dropped: {}", e);
    }
}
