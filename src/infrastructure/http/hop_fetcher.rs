//! Single-hop redirect fetching.

use async_trait::async_trait;
use reqwest::header::LOCATION;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur while fetching a redirect hop.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP client error: {0}")]
    ClientError(String),
    #[error("Hop request failed: {0}")]
    RequestError(String),
    #[error("Hop request timed out")]
    Timeout,
}

/// Result type for hop fetches.
pub type FetchResult<T> = Result<T, FetchError>;

/// Fetches one URL without following redirects and reports its `Location`.
///
/// # Implementations
///
/// - [`ReqwestHopFetcher`] - Real HTTP client with redirects disabled
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HopFetcher: Send + Sync {
    /// Requests `url` once and returns the raw `Location` header value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(location))` when the response carries a `Location` header
    /// - `Ok(None)` when it does not (end of the chain)
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on network failures or timeouts.
    async fn fetch_location(&self, url: &Url) -> FetchResult<Option<String>>;
}

/// `reqwest`-based hop fetcher with automatic redirects turned off.
pub struct ReqwestHopFetcher {
    client: reqwest::Client,
}

impl ReqwestHopFetcher {
    /// Builds a fetcher whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientError`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .user_agent(concat!("affiliate-redirect/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::ClientError(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wraps a prebuilt client. It must not follow redirects itself.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HopFetcher for ReqwestHopFetcher {
    async fn fetch_location(&self, url: &Url) -> FetchResult<Option<String>> {
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::RequestError(e.to_string())
            }
        })?;

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(location)
    }
}
