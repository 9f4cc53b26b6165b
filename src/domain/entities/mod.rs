//! Core domain entities for redirect resolution.
//!
//! Entities are plain data structures shared by the registry, the link
//! builder and the HTTP layer.
//!
//! # Entity Types
//!
//! - [`NetworkKind`] / [`Network`] - Affiliate network, with per-partner parameters
//! - [`PartnerEntry`] - A registry row mapping a shop domain to a network
//! - [`ShortlinkRule`] - A brand shortener and the root domain it expands to
//! - [`Classification`] - Result of matching a host against the registry

pub mod classification;
pub mod network;
pub mod partner;

pub use classification::Classification;
pub use network::{Network, NetworkKind};
pub use partner::{PartnerEntry, ShortlinkRule};
