//! DTOs for the error page endpoint.

use url::form_urlencoded;

const MAX_REASON_LEN: usize = 64;
const MAX_HOST_LEN: usize = 253;

/// Query parameters accepted by `GET /error`.
#[derive(Debug, Default)]
pub struct ErrorPageQuery {
    pub reason: Option<String>,
    pub host: Option<String>,
}

impl ErrorPageQuery {
    /// Parses a raw query string; the first occurrence of a repeated key wins.
    pub fn from_query_string(raw: &str) -> Self {
        let mut query = Self::default();

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let slot = match key.as_ref() {
                "reason" => &mut query.reason,
                "host" => &mut query.host,
                _ => continue,
            };
            slot.get_or_insert_with(|| value.into_owned());
        }

        query
    }

    /// Reason code restricted to `[a-z0-9_]`, `"unknown"` when absent.
    pub fn reason(&self) -> String {
        let reason: String = self
            .reason
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .take(MAX_REASON_LEN)
            .collect();

        if reason.is_empty() {
            "unknown".to_string()
        } else {
            reason
        }
    }

    /// Host restricted to hostname characters, empty when absent.
    pub fn host(&self) -> String {
        self.host
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':'))
            .take(MAX_HOST_LEN)
            .collect()
    }
}
