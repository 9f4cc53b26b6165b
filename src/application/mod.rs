//! Application layer services implementing the redirect pipeline.
//!
//! Services combine the pure domain pieces (registry, link builder) with the
//! infrastructure seams (hop fetcher) and expose a single entry point to the
//! HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::redirect_service::RedirectService`] - Normalize, sanitize, expand, classify, build
//! - [`services::shortlink_expander::ShortlinkExpander`] - Bounded brand shortlink expansion

pub mod services;
