//! HTTP request handlers.
//!
//! Each handler module corresponds to one endpoint.

pub mod error_page;
pub mod health;
pub mod index;
pub mod redirect;
pub mod whoami;

pub use error_page::error_page_handler;
pub use health::health_handler;
pub use index::index_handler;
pub use redirect::redirect_handler;
pub use whoami::whoami_handler;
