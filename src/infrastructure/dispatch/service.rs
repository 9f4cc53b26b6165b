//! Decision sink trait and error types.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::decision_event::DecisionEvent;

/// Errors that can occur while forwarding a decision record.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Sink client error: {0}")]
    ClientError(String),
    #[error("Sink request failed: {0}")]
    RequestError(String),
    #[error("Sink responded with status {0}")]
    UnexpectedStatus(u16),
}

/// Result type for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Destination for decision records beyond the local log.
///
/// Dispatch is attempted once per record. Callers log failures and move on;
/// a failed dispatch never affects a response.
///
/// # Implementations
///
/// - [`crate::infrastructure::dispatch::WebhookSink`] - JSON POST to a configured URL
/// - [`crate::infrastructure::dispatch::NullSink`] - No-op when no webhook is configured
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DecisionSink: Send + Sync {
    /// Forwards a single decision record.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] on network errors or non-2xx responses.
    async fn dispatch(&self, event: &DecisionEvent) -> SinkResult<()>;
}
