//! Utility functions for URL processing and request handling.
//!
//! This module provides helper functions used across the application:
//!
//! - [`url_normalizer`] - Parsing raw targets into absolute HTTP(S) URLs
//! - [`query_sanitizer`] - Tracking parameter removal and attribution tags
//! - [`response_format`] - JSON vs HTML negotiation from the `Accept` header

pub mod query_sanitizer;
pub mod response_format;
pub mod url_normalizer;
