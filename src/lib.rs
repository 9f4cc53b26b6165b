//! # Affiliate Redirect
//!
//! Redirect service that turns shared product links into affiliate-tracked
//! links for partner shops, built with Axum.
//!
//! ## Architecture
//!
//! The crate keeps the same layer separation throughout:
//!
//! - **Domain Layer** ([`domain`]) - Partner registry, affiliate link builder, decision events
//! - **Application Layer** ([`application`]) - The redirect pipeline and shortlink expansion
//! - **Infrastructure Layer** ([`infrastructure`]) - Outbound HTTP hops and decision sinks
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Request Pipeline
//!
//! Normalize → Sanitize → Expand (brand shortlinks only) → Classify → Build.
//! Only normalization can fail; every later stage degrades to passthrough.
//!
//! ## Quick Start
//!
//! ```bash
//! export AWIN_AFFILIATE_ID="999999"
//! export AMAZON_TAG="mytag-21"
//!
//! cargo run
//! curl -i "http://localhost:3000/r?u=https://www.zalando.de/some-product"
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{RedirectService, Resolution, UnmappedDomainPolicy};
    pub use crate::domain::affiliate::{AffiliateCredentials, AffiliateLinkBuilder};
    pub use crate::domain::entities::{Network, NetworkKind, PartnerEntry, ShortlinkRule};
    pub use crate::domain::registry::PartnerRegistry;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
