//! Expansion of brand shortlinks to their canonical product URL.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, timeout};
use tracing::debug;
use url::Url;

use crate::domain::entities::ShortlinkRule;
use crate::domain::registry::PartnerRegistry;
use crate::infrastructure::http::HopFetcher;

/// Upper bound on redirect hops followed for a single shortlink.
pub const MAX_EXPANSION_HOPS: usize = 5;

/// Why an expansion stopped before reaching the brand root.
///
/// Never surfaced to clients; the last resolved URL is used instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpansionDegraded {
    #[error("hop request failed: {0}")]
    Fetch(String),

    #[error("hop timed out")]
    Timeout,

    #[error("expansion budget exhausted")]
    BudgetExhausted,

    #[error("unusable Location header: {0}")]
    BadLocation(String),

    #[error("hop limit of {MAX_EXPANSION_HOPS} reached before brand root")]
    HopLimit,
}

/// Result of expanding a shortlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Last successfully resolved URL.
    pub url: Url,
    /// Number of requests issued.
    pub hops: usize,
    pub degraded: Option<ExpansionDegraded>,
}

/// Follows a shortener's redirect chain one hop at a time.
pub struct ShortlinkExpander {
    fetcher: Arc<dyn HopFetcher>,
    registry: Arc<PartnerRegistry>,
    hop_timeout: Duration,
    budget: Duration,
}

impl ShortlinkExpander {
    /// Creates an expander.
    ///
    /// # Arguments
    ///
    /// - `fetcher` - issues single requests without following redirects
    /// - `registry` - decides when a hop has reached the brand root
    /// - `hop_timeout` - limit for each individual hop
    /// - `budget` - limit for the whole chain
    pub fn new(
        fetcher: Arc<dyn HopFetcher>,
        registry: Arc<PartnerRegistry>,
        hop_timeout: Duration,
        budget: Duration,
    ) -> Self {
        Self {
            fetcher,
            registry,
            hop_timeout,
            budget,
        }
    }

    /// Expands `start` according to `rule`.
    ///
    /// # Algorithm
    ///
    /// 1. Fetch the current URL and read its `Location` header
    /// 2. Resolve the location against the current URL (relative locations allowed)
    /// 3. Stop once the resolved host is the brand root or one of its subdomains
    /// 4. Otherwise repeat, for at most [`MAX_EXPANSION_HOPS`] requests
    ///
    /// A missing `Location` ends the chain normally. Network errors, timeouts
    /// and non-HTTP(S) locations end it early with [`Expansion::degraded`] set.
    /// In every case the last successfully resolved URL is returned.
    pub async fn expand(&self, start: &Url, rule: &ShortlinkRule) -> Expansion {
        let deadline = Instant::now() + self.budget;
        let mut current = start.clone();
        let mut hops = 0;

        let degraded = loop {
            if hops == MAX_EXPANSION_HOPS {
                break Some(ExpansionDegraded::HopLimit);
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break Some(ExpansionDegraded::BudgetExhausted);
            }

            hops += 1;
            let wait = remaining.min(self.hop_timeout);
            let location = match timeout(wait, self.fetcher.fetch_location(&current)).await {
                Ok(Ok(Some(location))) => location,
                Ok(Ok(None)) => break None,
                Ok(Err(e)) => break Some(ExpansionDegraded::Fetch(e.to_string())),
                Err(_) => break Some(ExpansionDegraded::Timeout),
            };

            let next = match current.join(&location) {
                Ok(next) if matches!(next.scheme(), "http" | "https") => next,
                _ => break Some(ExpansionDegraded::BadLocation(location)),
            };

            debug!("Shortlink hop {}: {} -> {}", hops, current, next);
            current = next;

            let host = current.host_str().unwrap_or_default();
            if self.registry.reaches_brand_root(rule, host) {
                break None;
            }
        };

        Expansion {
            url: current,
            hops,
            degraded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::{FetchError, FetchResult, MockHopFetcher};
    use async_trait::async_trait;

    fn expander(fetcher: impl HopFetcher + 'static) -> ShortlinkExpander {
        ShortlinkExpander::new(
            Arc::new(fetcher),
            Arc::new(PartnerRegistry::builtin()),
            Duration::from_millis(500),
            Duration::from_secs(2),
        )
    }

    fn amzn_rule() -> ShortlinkRule {
        ShortlinkRule::new("amzn.to", "amazon.de")
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_stops_at_brand_root() {
        let mut fetcher = MockHopFetcher::new();
        fetcher
            .expect_fetch_location()
            .times(1)
            .returning(|_| Ok(Some("https://www.amazon.de/dp/B000?ref=x".to_string())));

        let result = expander(fetcher)
            .expand(&url("https://amzn.to/abc"), &amzn_rule())
            .await;

        assert_eq!(result.url.as_str(), "https://www.amazon.de/dp/B000?ref=x");
        assert_eq!(result.hops, 1);
        assert_eq!(result.degraded, None);
    }

    #[tokio::test]
    async fn test_follows_relative_locations() {
        let mut fetcher = MockHopFetcher::new();
        fetcher
            .expect_fetch_location()
            .withf(|u: &Url| u.as_str() == "https://amzn.to/abc")
            .times(1)
            .returning(|_| Ok(Some("/d/xyz".to_string())));
        fetcher
            .expect_fetch_location()
            .withf(|u: &Url| u.as_str() == "https://amzn.to/d/xyz")
            .times(1)
            .returning(|_| Ok(Some("https://www.amazon.com/dp/B111".to_string())));

        let result = expander(fetcher)
            .expand(&url("https://amzn.to/abc"), &amzn_rule())
            .await;

        assert_eq!(result.url.as_str(), "https://www.amazon.com/dp/B111");
        assert_eq!(result.hops, 2);
    }

    #[tokio::test]
    async fn test_never_exceeds_hop_limit() {
        let mut fetcher = MockHopFetcher::new();
        fetcher
            .expect_fetch_location()
            .times(MAX_EXPANSION_HOPS)
            .returning(|_| Ok(Some("https://amzn.to/loop".to_string())));

        let result = expander(fetcher)
            .expand(&url("https://amzn.to/loop"), &amzn_rule())
            .await;

        assert_eq!(result.hops, MAX_EXPANSION_HOPS);
        assert_eq!(result.degraded, Some(ExpansionDegraded::HopLimit));
        assert_eq!(result.url.as_str(), "https://amzn.to/loop");
    }

    #[tokio::test]
    async fn test_missing_location_keeps_last_url() {
        let mut fetcher = MockHopFetcher::new();
        fetcher
            .expect_fetch_location()
            .withf(|u: &Url| u.path() == "/start")
            .times(1)
            .returning(|_| Ok(Some("https://amzn.to/step2".to_string())));
        fetcher
            .expect_fetch_location()
            .withf(|u: &Url| u.path() == "/step2")
            .times(1)
            .returning(|_| Ok(None));

        let result = expander(fetcher)
            .expand(&url("https://amzn.to/start"), &amzn_rule())
            .await;

        assert_eq!(result.url.as_str(), "https://amzn.to/step2");
        assert_eq!(result.hops, 2);
        assert_eq!(result.degraded, None);
    }

    #[tokio::test]
    async fn test_network_error_degrades() {
        let mut fetcher = MockHopFetcher::new();
        fetcher
            .expect_fetch_location()
            .times(1)
            .returning(|_| Err(FetchError::RequestError("connection refused".into())));

        let result = expander(fetcher)
            .expand(&url("https://amzn.to/start"), &amzn_rule())
            .await;

        assert_eq!(result.url.as_str(), "https://amzn.to/start");
        assert!(matches!(result.degraded, Some(ExpansionDegraded::Fetch(_))));
    }

    #[tokio::test]
    async fn test_non_http_location_degrades() {
        let mut fetcher = MockHopFetcher::new();
        fetcher
            .expect_fetch_location()
            .times(1)
            .returning(|_| Ok(Some("javascript:alert(1)".to_string())));

        let result = expander(fetcher)
            .expand(&url("https://amzn.to/start"), &amzn_rule())
            .await;

        assert_eq!(result.url.as_str(), "https://amzn.to/start");
        assert!(matches!(
            result.degraded,
            Some(ExpansionDegraded::BadLocation(_))
        ));
    }

    struct SlowFetcher;

    #[async_trait]
    impl HopFetcher for SlowFetcher {
        async fn fetch_location(&self, _url: &Url) -> FetchResult<Option<String>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Some("https://www.amazon.de/".to_string()))
        }
    }

    #[tokio::test]
    async fn test_slow_hop_times_out() {
        let expander = ShortlinkExpander::new(
            Arc::new(SlowFetcher),
            Arc::new(PartnerRegistry::builtin()),
            Duration::from_millis(50),
            Duration::from_millis(200),
        );

        let result = expander
            .expand(&url("https://amzn.to/start"), &amzn_rule())
            .await;

        assert_eq!(result.url.as_str(), "https://amzn.to/start");
        assert_eq!(result.degraded, Some(ExpansionDegraded::Timeout));
    }
}
