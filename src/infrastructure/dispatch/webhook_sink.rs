//! Webhook sink forwarding decision records as JSON.

use super::service::{DecisionSink, SinkError, SinkResult};
use crate::domain::decision_event::DecisionEvent;
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

/// Posts each decision record to a fixed URL.
///
/// A single attempt is made per record, bounded by the configured timeout.
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl WebhookSink {
    /// Creates a sink posting to `url`, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::ClientError`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> SinkResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SinkError::ClientError(e.to_string()))?;

        Ok(Self::with_client(client, url, timeout))
    }

    /// Uses a prebuilt client. `timeout` still applies to every request.
    pub fn with_client(client: reqwest::Client, url: impl Into<String>, timeout: Duration) -> Self {
        info!("Decision webhook enabled");

        Self {
            client,
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl DecisionSink for WebhookSink {
    async fn dispatch(&self, event: &DecisionEvent) -> SinkResult<()> {
        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(event)
            .send()
            .await
            .map_err(|e| SinkError::RequestError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::UnexpectedStatus(status.as_u16()));
        }

        Ok(())
    }
}
