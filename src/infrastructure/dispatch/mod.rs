//! Forwarding of decision records to external collectors.
//!
//! Provides a [`DecisionSink`] trait with two implementations:
//! - [`WebhookSink`] - JSON POST to a configured webhook
//! - [`NullSink`] - No-op implementation when forwarding is disabled

mod null_sink;
mod service;
mod webhook_sink;

pub use null_sink::NullSink;
#[cfg(test)]
pub use service::MockDecisionSink;
pub use service::{DecisionSink, SinkError, SinkResult};
pub use webhook_sink::WebhookSink;
