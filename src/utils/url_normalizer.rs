//! Target URL normalization.
//!
//! Turns the raw target string a client sends into an absolute HTTP(S) URL.

use url::Url;

/// Errors that can occur during target normalization.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed, got '{0}'")]
    UnsupportedProtocol(String),
}

/// Parses a raw target into an absolute URL.
///
/// # Rules
///
/// 1. **Parsing**: the input is parsed as an absolute URL; if that fails it is
///    retried with an `https://` prefix, so bare `shop.example/item` works
/// 2. **Protocol**: only HTTP and HTTPS are allowed
/// 3. **Host**: must be present (lowercased by the parser)
///
/// Query, path and fragment are preserved.
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidFormat`] when neither attempt parses.
/// Returns [`NormalizeError::UnsupportedProtocol`] for non-HTTP(S) schemes,
/// including `javascript:`, `data:` and `file:`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_target("www.zalando.de/foo").unwrap().as_str(),
///     "https://www.zalando.de/foo"
/// );
/// ```
pub fn normalize_target(input: &str) -> Result<Url, NormalizeError> {
    let input = input.trim();

    let url = match Url::parse(input) {
        Ok(url) => url,
        Err(first) => Url::parse(&format!("https://{input}"))
            .map_err(|_| NormalizeError::InvalidFormat(first.to_string()))?,
    };

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(NormalizeError::UnsupportedProtocol(other.to_string())),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(NormalizeError::InvalidFormat("missing host".to_string()));
    }

    Ok(url)
}
