//! Data Transfer Objects for API requests and responses.
//!
//! Query DTOs are deserialized by Axum's `Query` extractor; response DTOs are
//! serialized with Serde.

pub mod error_page;
pub mod health;
pub mod redirect;
pub mod whoami;
