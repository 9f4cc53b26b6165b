//! Static partner registry and host classification.
//!
//! The registry is built once at startup, either from the built-in table or
//! from a JSON file, and is never mutated afterwards. Lookups are plain
//! in-memory suffix comparisons, so it is shared between requests behind an
//! `Arc` without any locking.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use serde::Deserialize;
use tracing::warn;

use crate::domain::affiliate::is_valid_merchant_id;
use crate::domain::entities::{Classification, Network, NetworkKind, PartnerEntry, ShortlinkRule};

/// Marketplace suffixes that make up the Amazon vendor group.
const AMAZON_MARKETPLACES: &[&str] = &[
    "de", "com", "co.uk", "fr", "it", "es", "nl", "pl", "se", "com.be", "com.tr", "ca", "com.mx",
    "co.jp",
];

static AMAZON_ROOTS: LazyLock<Vec<String>> = LazyLock::new(|| {
    AMAZON_MARKETPLACES
        .iter()
        .map(|tld| format!("amazon.{tld}"))
        .collect()
});

/// Errors raised while building a registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Partner domain must not be empty")]
    EmptyDomain,

    #[error("Domain '{0}' is listed more than once")]
    DuplicateDomain(String),

    #[error("Shortlink domain '{0}' is listed more than once")]
    DuplicateShortlink(String),

    #[error("Failed to read registry file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid registry file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk registry format.
#[derive(Debug, Deserialize)]
struct RegistryFile {
    partners: Vec<PartnerRow>,
    #[serde(default = "builtin_shortlinks")]
    shortlinks: Vec<ShortlinkRule>,
}

#[derive(Debug, Deserialize)]
struct PartnerRow {
    domain: String,
    network: NetworkKind,
    #[serde(default)]
    mid: Option<String>,
}

impl From<PartnerRow> for PartnerEntry {
    fn from(row: PartnerRow) -> Self {
        let network = match row.network {
            NetworkKind::Awin => Network::Awin {
                mid: row.mid.unwrap_or_default(),
            },
            NetworkKind::Cj => Network::Cj,
            NetworkKind::Amazon => Network::Amazon,
        };
        PartnerEntry::new(row.domain, network)
    }
}

/// Immutable lookup table from shop domains to affiliate networks.
#[derive(Debug, Clone)]
pub struct PartnerRegistry {
    /// Sorted longest domain first so the most specific suffix wins.
    entries: Vec<PartnerEntry>,
    shortlinks: Vec<ShortlinkRule>,
}

impl PartnerRegistry {
    /// Builds a registry from explicit partner rows and shortlink rules.
    ///
    /// Domains are trimmed, lowercased and stripped of a single leading dot.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyDomain`] for blank domains and
    /// [`RegistryError::DuplicateDomain`] / [`RegistryError::DuplicateShortlink`]
    /// when the same domain appears twice.
    pub fn new(
        partners: Vec<PartnerEntry>,
        shortlinks: Vec<ShortlinkRule>,
    ) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(partners.len());

        for entry in partners {
            let domain = normalize_domain(&entry.domain).ok_or(RegistryError::EmptyDomain)?;
            if !seen.insert(domain.clone()) {
                return Err(RegistryError::DuplicateDomain(domain));
            }

            if let Network::Awin { mid } = &entry.network
                && !is_valid_merchant_id(mid)
            {
                warn!(
                    "AWIN partner {} has no numeric merchant id, links will pass through untracked",
                    domain
                );
            }

            entries.push(PartnerEntry::new(domain, entry.network));
        }

        entries.sort_by(|a, b| {
            b.domain
                .len()
                .cmp(&a.domain.len())
                .then_with(|| a.domain.cmp(&b.domain))
        });

        let mut seen_short = HashSet::new();
        let mut rules = Vec::with_capacity(shortlinks.len());
        for rule in shortlinks {
            let short = normalize_domain(&rule.short_domain).ok_or(RegistryError::EmptyDomain)?;
            let root = normalize_domain(&rule.brand_root).ok_or(RegistryError::EmptyDomain)?;
            if !seen_short.insert(short.clone()) {
                return Err(RegistryError::DuplicateShortlink(short));
            }
            rules.push(ShortlinkRule::new(short, root));
        }

        Ok(Self {
            entries,
            shortlinks: rules,
        })
    }

    /// The registry shipped with the service.
    ///
    /// AWIN merchant ids are placeholders here; real ids come from a
    /// registry file (see [`Self::from_json_file`]).
    pub fn builtin() -> Self {
        let partners = vec![
            PartnerEntry::new("zalando.de", Network::Awin { mid: "XXXX".into() }),
            PartnerEntry::new("hm.com", Network::Awin { mid: "XXXX".into() }),
            PartnerEntry::new("aboutyou.de", Network::Awin { mid: "XXXX".into() }),
            PartnerEntry::new("ikea.com", Network::Cj),
            PartnerEntry::new("home24.de", Network::Cj),
            PartnerEntry::new("amazon.de", Network::Amazon),
        ];

        Self::new(partners, builtin_shortlinks()).expect("built-in registry has no duplicates")
    }

    /// Parses a registry from its JSON representation.
    ///
    /// ```json
    /// {
    ///   "partners": [
    ///     { "domain": "zalando.de", "network": "awin", "mid": "12345" },
    ///     { "domain": "ikea.com", "network": "cj" }
    ///   ],
    ///   "shortlinks": [{ "short_domain": "amzn.to", "brand_root": "amazon.de" }]
    /// }
    /// ```
    ///
    /// When `shortlinks` is omitted the built-in shortlink rules are used.
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let file: RegistryFile = serde_json::from_str(json)?;
        let partners = file.partners.into_iter().map(PartnerEntry::from).collect();
        Self::new(partners, file.shortlinks)
    }

    /// Reads and parses a JSON registry file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Classifies a host against the registry.
    ///
    /// Explicit rows are checked first, longest domain first. Hosts in the
    /// Amazon vendor group classify as Amazon even without a row.
    pub fn classify(&self, host: &str) -> Classification {
        let host = normalize_host(host);

        if let Some(entry) = self
            .entries
            .iter()
            .find(|entry| host_matches(&host, &entry.domain))
        {
            return Classification::Matched {
                domain: entry.domain.clone(),
                network: entry.network.clone(),
            };
        }

        if let Some(root) = amazon_root_for(&host) {
            return Classification::Matched {
                domain: root.to_string(),
                network: Network::Amazon,
            };
        }

        Classification::Unmatched
    }

    /// Returns the shortlink rule for a host, if it is a known brand shortener.
    pub fn shortlink_rule(&self, host: &str) -> Option<&ShortlinkRule> {
        let host = normalize_host(host);
        self.shortlinks.iter().find(|rule| rule.short_domain == host)
    }

    /// Whether `host` has reached the brand root of `rule`.
    ///
    /// A rule rooted in the Amazon vendor group accepts any Amazon marketplace.
    pub fn reaches_brand_root(&self, rule: &ShortlinkRule, host: &str) -> bool {
        let host = normalize_host(host);
        if host_matches(&host, &rule.brand_root) {
            return true;
        }
        amazon_root_for(&rule.brand_root).is_some() && amazon_root_for(&host).is_some()
    }

    pub fn partners(&self) -> &[PartnerEntry] {
        &self.entries
    }

    pub fn shortlinks(&self) -> &[ShortlinkRule] {
        &self.shortlinks
    }
}

impl Default for PartnerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_shortlinks() -> Vec<ShortlinkRule> {
    vec![
        ShortlinkRule::new("amzn.to", "amazon.de"),
        ShortlinkRule::new("amzn.eu", "amazon.de"),
        ShortlinkRule::new("a.co", "amazon.de"),
    ]
}

fn normalize_domain(domain: &str) -> Option<String> {
    let domain = domain.trim();
    let domain = domain.strip_prefix('.').unwrap_or(domain);
    let domain = domain.trim_end_matches('.');
    if domain.is_empty() {
        None
    } else {
        Some(domain.to_ascii_lowercase())
    }
}

fn normalize_host(host: &str) -> String {
    host.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Exact match or subdomain match on a dot boundary.
///
/// `sub.example.com` matches `example.com`; `notexample.com` does not.
pub fn host_matches(host: &str, domain: &str) -> bool {
    if host == domain {
        return true;
    }
    host.len() > domain.len()
        && host.ends_with(domain)
        && host.as_bytes()[host.len() - domain.len() - 1] == b'.'
}

/// The Amazon marketplace root a host belongs to, if any.
fn amazon_root_for(host: &str) -> Option<&'static str> {
    AMAZON_ROOTS
        .iter()
        .find(|root| host_matches(host, root))
        .map(String::as_str)
}
