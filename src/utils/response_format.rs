//! Response representation negotiation.

use axum::http::{HeaderMap, header};

/// Representation requested by the client for error and info responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Html,
    Json,
}

impl ResponseFormat {
    /// Picks JSON when the `Accept` header mentions `application/json`,
    /// HTML otherwise (including when the header is missing or not UTF-8).
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let wants_json = headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|accept| accept.to_ascii_lowercase().contains("application/json"));

        if wants_json { Self::Json } else { Self::Html }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_json_accept() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/plain;q=0.5"),
        );
        assert_eq!(ResponseFormat::from_headers(&headers), ResponseFormat::Json);
    }

    #[test]
    fn test_browser_accept_is_html() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,*/*;q=0.8"),
        );
        assert_eq!(ResponseFormat::from_headers(&headers), ResponseFormat::Html);
    }

    #[test]
    fn test_missing_accept_is_html() {
        assert_eq!(
            ResponseFormat::from_headers(&HeaderMap::new()),
            ResponseFormat::Html
        );
    }
}
