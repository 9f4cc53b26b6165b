//! Domain layer containing the redirect decision model and logic.
//!
//! Everything here is independent of HTTP handling. The registry and link
//! builder are pure; the decision worker is the only asynchronous piece.
//!
//! # Architecture
//!
//! - [`entities`] - Networks, registry rows, classification results
//! - [`registry`] - Static partner registry and host classification
//! - [`affiliate`] - Per-network tracking URL construction
//! - [`decision_event`] - Structured decision record
//! - [`decision_worker`] - Background logging and forwarding of decisions
//!
//! # Decision Flow
//!
//! 1. HTTP handler resolves the target via [`crate::application::services::RedirectService`]
//! 2. [`decision_event::DecisionEvent`] is sent to a bounded channel (non-blocking)
//! 3. [`decision_worker::run_decision_worker`] logs it and forwards it once

pub mod affiliate;
pub mod decision_event;
pub mod decision_worker;
pub mod entities;
pub mod registry;
