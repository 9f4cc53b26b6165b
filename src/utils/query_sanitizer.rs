//! Query string sanitization.
//!
//! Strips third-party tracking parameters and adds the service's own
//! attribution tags. Applying the sanitizer to its own output is a no-op.

use url::Url;

/// Parameter name prefixes removed from every target (case-insensitive).
const TRACKING_PREFIXES: &[&str] = &["utm_"];

/// Individual parameter names removed from every target (case-insensitive).
const TRACKING_PARAMS: &[&str] = &[
    "gclid", "gclsrc", "dclid", "gbraid", "wbraid", "fbclid", "msclkid", "yclid", "ttclid",
    "twclid", "li_fat_id", "igshid", "mc_cid", "mc_eid", "_ga", "_gl", "awc", "cjevent",
];

/// Default `utm_source` value added to outbound links.
pub const DEFAULT_ATTRIBUTION_SOURCE: &str = "2list";

/// Default `utm_medium` value added to outbound links.
pub const DEFAULT_ATTRIBUTION_MEDIUM: &str = "app";

/// Returns whether a query parameter name is a foreign tracking parameter.
pub fn is_tracking_param(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    TRACKING_PARAMS.contains(&lower.as_str())
        || TRACKING_PREFIXES
            .iter()
            .any(|prefix| lower.starts_with(prefix))
}

/// Removes tracking parameters and appends attribution parameters.
#[derive(Debug, Clone)]
pub struct QuerySanitizer {
    attribution: Vec<(String, String)>,
}

impl QuerySanitizer {
    /// Creates a sanitizer that tags links with `utm_source` and `utm_medium`.
    pub fn new(source: impl Into<String>, medium: impl Into<String>) -> Self {
        Self {
            attribution: vec![
                ("utm_source".to_string(), source.into()),
                ("utm_medium".to_string(), medium.into()),
            ],
        }
    }

    /// Returns a sanitized copy of `url`.
    ///
    /// Denylisted parameters are dropped first. Each attribution parameter is
    /// then appended only if no parameter with that name (ignoring case)
    /// survived, so the result carries exactly one canonical attribution.
    /// Remaining parameters keep their relative order.
    pub fn sanitize(&self, url: &Url) -> Url {
        let mut clean = url.clone();

        let mut pairs: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| !is_tracking_param(k))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        for (name, value) in &self.attribution {
            let present = pairs.iter().any(|(k, _)| k.eq_ignore_ascii_case(name));
            if !present {
                pairs.push((name.clone(), value.clone()));
            }
        }

        if pairs.is_empty() {
            clean.set_query(None);
        } else {
            clean.query_pairs_mut().clear().extend_pairs(pairs);
        }

        clean
    }
}

impl Default for QuerySanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_ATTRIBUTION_SOURCE, DEFAULT_ATTRIBUTION_MEDIUM)
    }
}
