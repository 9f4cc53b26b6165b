//! User-facing error taxonomy and its HTTP representation.
//!
//! Every error maps to a status code and a stable reason code. Bodies never
//! contain internal details: JSON clients get `{ ok, service, reason, host }`,
//! browsers get a small HTML page.

use askama::Template;
use axum::{
    Json,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::utils::response_format::ResponseFormat;
use crate::utils::url_normalizer::NormalizeError;

/// Service name reported in error bodies.
pub const SERVICE_NAME: &str = "affiliate-redirect";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// None of the accepted target parameters was supplied.
    #[error("Missing target URL")]
    MissingTarget,

    /// The target did not parse, even with an `https://` prefix.
    #[error("Invalid target URL")]
    InvalidTarget,

    /// The target scheme is not HTTP or HTTPS.
    #[error("Target protocol is not allowed")]
    ProtocolNotAllowed,

    /// The host is not a partner and the unmapped-domain policy blocks it.
    #[error("Domain is not an allowed partner")]
    DomainNotAllowed { host: String },

    /// Caller-supplied error reason on the error page endpoint.
    #[error("Redirect not possible")]
    Reported { reason: String, host: String },

    #[error("Internal error")]
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingTarget
            | Self::InvalidTarget
            | Self::ProtocolNotAllowed
            | Self::Reported { .. } => StatusCode::BAD_REQUEST,
            Self::DomainNotAllowed { .. } => StatusCode::FORBIDDEN,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable reason code.
    pub fn reason(&self) -> &str {
        match self {
            Self::MissingTarget => "missing_url",
            Self::InvalidTarget => "invalid_url",
            Self::ProtocolNotAllowed => "bad_protocol",
            Self::DomainNotAllowed { .. } => "domain_not_allowed",
            Self::Reported { reason, .. } => reason,
            Self::Internal => "internal_error",
        }
    }

    /// Host the error relates to, if one was resolved.
    pub fn host(&self) -> Option<&str> {
        match self {
            Self::DomainNotAllowed { host } | Self::Reported { host, .. } if !host.is_empty() => {
                Some(host.as_str())
            }
            _ => None,
        }
    }

    /// Renders the error in the representation the client asked for.
    pub fn into_negotiated_response(self, format: ResponseFormat) -> Response {
        match format {
            ResponseFormat::Json => self.into_response(),
            ResponseFormat::Html => self.into_html_response(),
        }
    }

    fn into_html_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        let page = ErrorPageTemplate {
            reason: self.reason(),
            host: self.host().unwrap_or_default(),
            message: &message,
            status: status.as_u16(),
        };

        match page.render() {
            Ok(body) => (status, [(header::CACHE_CONTROL, "no-store")], Html(body)).into_response(),
            Err(e) => {
                error!("Failed to render error page: {}", e);
                (status, [(header::CACHE_CONTROL, "no-store")], message).into_response()
            }
        }
    }
}

impl From<NormalizeError> for AppError {
    fn from(e: NormalizeError) -> Self {
        match e {
            NormalizeError::InvalidFormat(_) => Self::InvalidTarget,
            NormalizeError::UnsupportedProtocol(_) => Self::ProtocolNotAllowed,
        }
    }
}

/// JSON error body.
#[derive(Serialize)]
pub struct ErrorBody<'a> {
    pub ok: bool,
    pub service: &'static str,
    pub reason: &'a str,
    pub host: &'a str,
    pub message: String,
}

/// Template for the HTML error page.
///
/// Renders `templates/error.html` with the reason code and, when known, the
/// host that could not be redirected.
#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPageTemplate<'a> {
    reason: &'a str,
    host: &'a str,
    message: &'a str,
    status: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            ok: false,
            service: SERVICE_NAME,
            reason: self.reason(),
            host: self.host().unwrap_or_default(),
            message: self.to_string(),
        };

        (status, [(header::CACHE_CONTROL, "no-store")], Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes() {
        assert_eq!(AppError::MissingTarget.reason(), "missing_url");
        assert_eq!(AppError::InvalidTarget.reason(), "invalid_url");
        assert_eq!(AppError::ProtocolNotAllowed.reason(), "bad_protocol");
        assert_eq!(
            AppError::DomainNotAllowed {
                host: "x.com".into()
            }
            .reason(),
            "domain_not_allowed"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::MissingTarget.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::ProtocolNotAllowed.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::DomainNotAllowed { host: "x".into() }.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_normalize_error() {
        assert!(matches!(
            AppError::from(NormalizeError::InvalidFormat("x".into())),
            AppError::InvalidTarget
        ));
        assert!(matches!(
            AppError::from(NormalizeError::UnsupportedProtocol("ftp".into())),
            AppError::ProtocolNotAllowed
        ));
    }

    #[test]
    fn test_host_only_when_known() {
        assert_eq!(AppError::InvalidTarget.host(), None);
        assert_eq!(
            AppError::DomainNotAllowed {
                host: "shop.example".into()
            }
            .host(),
            Some("shop.example")
        );
        assert_eq!(
            AppError::Reported {
                reason: "unknown".into(),
                host: String::new()
            }
            .host(),
            None
        );
    }

    #[test]
    fn test_html_response_status() {
        let response = AppError::ProtocolNotAllowed.into_negotiated_response(ResponseFormat::Html);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
        assert!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
    }
}
