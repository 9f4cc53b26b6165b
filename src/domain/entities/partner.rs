//! Partner registry rows and shortlink rules.

use serde::{Deserialize, Serialize};

use super::network::Network;

/// A shop domain and the network its links are tracked through.
///
/// Matches the domain itself and every subdomain of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerEntry {
    pub domain: String,
    pub network: Network,
}

impl PartnerEntry {
    pub fn new(domain: impl Into<String>, network: Network) -> Self {
        Self {
            domain: domain.into(),
            network,
        }
    }
}

/// A brand's own link shortener and the root domain its links resolve to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortlinkRule {
    /// Host of the shortener (e.g. `amzn.to`). Matched exactly.
    pub short_domain: String,
    /// Domain that ends expansion once a hop lands on it or a subdomain.
    pub brand_root: String,
}

impl ShortlinkRule {
    pub fn new(short_domain: impl Into<String>, brand_root: impl Into<String>) -> Self {
        Self {
            short_domain: short_domain.into(),
            brand_root: brand_root.into(),
        }
    }
}
