//! No-op sink used when no webhook is configured.

use super::service::{DecisionSink, SinkResult};
use crate::domain::decision_event::DecisionEvent;
use async_trait::async_trait;
use tracing::debug;

/// A sink that drops every record.
pub struct NullSink;

impl NullSink {
    /// Creates a new NullSink instance.
    pub fn new() -> Self {
        debug!("Using NullSink (decision forwarding disabled)");
        Self
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DecisionSink for NullSink {
    async fn dispatch(&self, _event: &DecisionEvent) -> SinkResult<()> {
        Ok(())
    }
}
