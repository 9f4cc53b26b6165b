//! Decision record emitted for every redirect request.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::NetworkKind;

/// Structured record of how a redirect request was resolved.
///
/// Created in the redirect handler once the response status is known, sent
/// to the decision worker over a bounded channel, logged there and optionally
/// forwarded to a webhook. The handler never waits on any of that.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionEvent {
    pub timestamp: DateTime<Utc>,
    /// HTTP status returned to the client.
    pub outcome: u16,
    /// Resolved target host, empty if the target never parsed.
    pub host: String,
    /// Network name, or `"none"` when unclassified.
    pub network: &'static str,
    pub is_affiliate: bool,
    pub expanded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl DecisionEvent {
    /// Creates a record stamped with the current time.
    pub fn new(
        outcome: u16,
        host: impl Into<String>,
        network: Option<NetworkKind>,
        is_affiliate: bool,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            outcome,
            host: host.into(),
            network: network.map_or("none", |n| n.as_str()),
            is_affiliate,
            expanded: false,
            correlation_id: None,
            user_agent: None,
        }
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn with_request_meta(
        mut self,
        correlation_id: Option<&str>,
        user_agent: Option<&str>,
    ) -> Self {
        self.correlation_id = correlation_id.map(str::to_string);
        self.user_agent = user_agent.map(str::to_string);
        self
    }
}
