//! Business logic services for the application layer.

pub mod redirect_service;
pub mod shortlink_expander;

pub use redirect_service::{RedirectService, Resolution, UnmappedDomainPolicy};
pub use shortlink_expander::{Expansion, ExpansionDegraded, MAX_EXPANSION_HOPS, ShortlinkExpander};
