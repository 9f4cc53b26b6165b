//! DTOs for the redirect endpoint.

use url::form_urlencoded;

/// Query parameters accepted by `GET /r`.
///
/// The target may arrive under any of `url`, `u` or `t`; the first non-empty
/// one in that order wins. Repeated keys keep their first non-empty value and
/// unknown keys are ignored, so parsing never rejects a request.
#[derive(Debug, Default)]
pub struct RedirectQuery {
    pub url: Option<String>,
    pub u: Option<String>,
    pub t: Option<String>,

    /// Client correlation id, echoed into the decision record.
    pub cid: Option<String>,
}

impl RedirectQuery {
    /// Parses a raw query string such as `u=https%3A%2F%2Fshop.example&cid=1`.
    pub fn from_query_string(raw: &str) -> Self {
        let mut query = Self::default();

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let slot = match key.as_ref() {
                "url" => &mut query.url,
                "u" => &mut query.u,
                "t" => &mut query.t,
                "cid" => &mut query.cid,
                _ => continue,
            };
            if slot.is_none() && !value.trim().is_empty() {
                *slot = Some(value.into_owned());
            }
        }

        query
    }

    /// Returns the raw target, or `None` if no parameter carries a value.
    pub fn target(&self) -> Option<&str> {
        [&self.url, &self.u, &self.t]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .map(str::trim)
            .find(|v| !v.is_empty())
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.cid.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }
}
