//! Outbound HTTP used by shortlink expansion.
//!
//! Provides a [`HopFetcher`] trait with the [`ReqwestHopFetcher`] implementation.

mod hop_fetcher;

#[cfg(test)]
pub use hop_fetcher::MockHopFetcher;
pub use hop_fetcher::{FetchError, FetchResult, HopFetcher, ReqwestHopFetcher};
