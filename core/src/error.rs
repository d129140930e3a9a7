//! Error types for the App API client.
//!
//! # Design
//! Every non-200 response lands in `ApiError::Api`, 4xx and 5xx alike; the
//! caller owns any retry policy. Network failures keep the transport's own
//! error as the source instead of being folded into a status.

use crate::types::ErrorResponse;

/// Error raised by a `Transport` before any HTTP status was received.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `AppApi` and the `AppApiClient` parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a status other than 200.
    #[error("App API returned HTTP {status}: {raw}")]
    Api {
        status: u16,
        body: ErrorResponse,
        raw: String,
    },

    /// The request never produced a response.
    #[error(transparent)]
    Transport(TransportError),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// HTTP status of an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Messages from the parsed error body; empty for non-`Api` errors.
    pub fn messages(&self) -> Vec<&str> {
        match self {
            ApiError::Api { body, .. } => body.messages(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_status_and_body() {
        let err = ApiError::Api {
            status: 400,
            body: ErrorResponse {
                errors: vec!["bad request".to_string()],
                meta: None,
            },
            raw: r#"{"errors":["bad request"]}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"App API returned HTTP 400: {"errors":["bad request"]}"#
        );
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.messages(), vec!["bad request"]);
    }

    #[test]
    fn transport_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = ApiError::Transport(Box::new(io));
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(err.status(), None);
        assert!(err.messages().is_empty());
    }
}
