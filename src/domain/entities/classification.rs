//! Outcome of matching a host against the partner registry.

use super::network::{Network, NetworkKind};

/// Result of classifying a target host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The host belongs to a partner. `domain` is the registry domain that matched.
    Matched { domain: String, network: Network },
    Unmatched,
}

impl Classification {
    pub fn network_kind(&self) -> Option<NetworkKind> {
        match self {
            Self::Matched { network, .. } => Some(network.kind()),
            Self::Unmatched => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }
}
