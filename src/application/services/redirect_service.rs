//! Redirect resolution pipeline.

use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::application::services::shortlink_expander::ShortlinkExpander;
use crate::domain::affiliate::AffiliateLinkBuilder;
use crate::domain::entities::{Classification, NetworkKind};
use crate::domain::registry::PartnerRegistry;
use crate::error::AppError;
use crate::utils::query_sanitizer::QuerySanitizer;
use crate::utils::url_normalizer::normalize_target;

/// What to do with targets whose host is not in the partner registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmappedDomainPolicy {
    /// Redirect to the sanitized link with attribution tags only.
    #[default]
    Passthrough,
    /// Refuse with `403 domain_not_allowed`.
    Block,
}

impl UnmappedDomainPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passthrough => "passthrough",
            Self::Block => "block",
        }
    }
}

impl FromStr for UnmappedDomainPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passthrough" => Ok(Self::Passthrough),
            "block" => Ok(Self::Block),
            other => Err(format!(
                "expected 'passthrough' or 'block', got '{}'",
                other
            )),
        }
    }
}

/// The decision reached for one redirect request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Absolute URL for the `Location` header.
    pub location: String,
    /// Host the decision was made for (after expansion).
    pub host: String,
    pub network: Option<NetworkKind>,
    /// Whether network tracking was actually applied.
    pub is_affiliate: bool,
    /// Whether shortlink expansion changed the target.
    pub expanded: bool,
}

/// Resolves raw targets into outbound redirect URLs.
///
/// Holds only read-only configuration, so one instance is shared by all
/// requests.
pub struct RedirectService {
    registry: Arc<PartnerRegistry>,
    sanitizer: QuerySanitizer,
    expander: ShortlinkExpander,
    builder: AffiliateLinkBuilder,
    policy: UnmappedDomainPolicy,
    expansion_enabled: bool,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(
        registry: Arc<PartnerRegistry>,
        sanitizer: QuerySanitizer,
        expander: ShortlinkExpander,
        builder: AffiliateLinkBuilder,
        policy: UnmappedDomainPolicy,
    ) -> Self {
        Self {
            registry,
            sanitizer,
            expander,
            builder,
            policy,
            expansion_enabled: true,
        }
    }

    /// Disables shortlink expansion; shortlinks are classified as-is.
    pub fn without_expansion(mut self) -> Self {
        self.expansion_enabled = false;
        self
    }

    pub fn registry(&self) -> &PartnerRegistry {
        &self.registry
    }

    pub fn policy(&self) -> UnmappedDomainPolicy {
        self.policy
    }

    /// Resolves a raw target string.
    ///
    /// # Pipeline
    ///
    /// 1. **Normalize** - parse as absolute HTTP(S) URL (the only failing stage)
    /// 2. **Sanitize** - drop tracking parameters, add attribution
    /// 3. **Expand** - follow brand shortlinks; re-sanitize if the URL changed
    /// 4. **Classify** - match the host against the partner registry
    /// 5. **Build** - construct the network tracking link, or pass through
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidTarget`] or [`AppError::ProtocolNotAllowed`]
    /// from normalization, and [`AppError::DomainNotAllowed`] for unclassified
    /// hosts under [`UnmappedDomainPolicy::Block`].
    pub async fn resolve(&self, raw: &str) -> Result<Resolution, AppError> {
        let target = normalize_target(raw)?;
        let sanitized = self.sanitizer.sanitize(&target);

        let (target, expanded) = self.expand_if_shortlink(sanitized).await;
        let host = target.host_str().unwrap_or_default().to_string();

        let classification = self.registry.classify(&host);
        let network = classification.network_kind();

        let (location, is_affiliate) = match classification {
            Classification::Matched { network, .. } => {
                let link = self.builder.build(&target, &network);
                (link.url, link.tracked)
            }
            Classification::Unmatched => match self.policy {
                UnmappedDomainPolicy::Passthrough => (target.to_string(), false),
                UnmappedDomainPolicy::Block => {
                    return Err(AppError::DomainNotAllowed { host });
                }
            },
        };

        debug!(
            "Resolved {} -> {} (network: {}, affiliate: {})",
            target,
            location,
            network.map_or("none", |n| n.as_str()),
            is_affiliate
        );

        Ok(Resolution {
            location,
            host,
            network,
            is_affiliate,
            expanded,
        })
    }

    async fn expand_if_shortlink(&self, target: Url) -> (Url, bool) {
        if !self.expansion_enabled {
            return (target, false);
        }

        let host = target.host_str().unwrap_or_default();
        let Some(rule) = self.registry.shortlink_rule(host) else {
            return (target, false);
        };

        let expansion = self.expander.expand(&target, rule).await;
        if let Some(reason) = &expansion.degraded {
            warn!(
                "Shortlink expansion degraded for {} after {} hops: {}",
                target, expansion.hops, reason
            );
        }

        if expansion.url == target {
            (target, false)
        } else {
            (self.sanitizer.sanitize(&expansion.url), true)
        }
    }
}
