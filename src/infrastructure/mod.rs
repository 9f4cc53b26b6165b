//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the network-facing seams used by the
//! redirect pipeline.
//!
//! # Modules
//!
//! - [`dispatch`] - Decision record forwarding (webhook and no-op sinks)
//! - [`http`] - Redirect hop fetching for shortlink expansion

pub mod dispatch;
pub mod http;
