//! Error taxonomy for backend calls.

use thiserror::Error;

use crate::store::StoreError;

/// Message used when an error response carries neither `message` nor `error`.
pub const GENERIC_FAILURE: &str = "Request failed";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Network unreachable, DNS, TLS, connection reset... not classified further.
    #[error("Request could not be sent: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("{message} (HTTP {status})")]
    Http { status: u16, message: String },

    /// A 2xx body without the expected `data.<key>` entry.
    #[error("Response is missing data.{key}")]
    MissingKey { key: &'static str },

    /// `data.<key>` is present but has the wrong shape.
    #[error("Response data.{key} has an unexpected shape: {source}")]
    Decode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A multipart file part could not be built (e.g. malformed MIME type).
    #[error("Invalid attachment {file_name}: {source}")]
    Attachment {
        file_name: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to persist credentials: {0}")]
    Store(#[from] StoreError),

    /// The caller's cancellation token fired before the response arrived.
    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// HTTP status for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message. For `Http` errors this is the server's message.
    pub fn message(&self) -> String {
        match self {
            ApiError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Pull a human-readable message out of an error body.
///
/// `message` wins over `error`; empty strings and non-string values are
/// skipped. Falls back to [`GENERIC_FAILURE`].
pub fn extract_message(body: &serde_json::Value) -> String {
    ["message", "error"]
        .iter()
        .filter_map(|field| body.get(field).and_then(|v| v.as_str()))
        .find(|s| !s.is_empty())
        .unwrap_or(GENERIC_FAILURE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_message_prefers_message() {
        let body = json!({"message": "X", "error": "Y"});
        assert_eq!(extract_message(&body), "X");
    }

    #[test]
    fn test_extract_message_falls_back_to_error() {
        assert_eq!(extract_message(&json!({"error": "Y"})), "Y");
        assert_eq!(extract_message(&json!({"message": "", "error": "Y"})), "Y");
    }

    #[test]
    fn test_extract_message_generic_fallback() {
        assert_eq!(extract_message(&json!({})), GENERIC_FAILURE);
        assert_eq!(extract_message(&json!({"message": 42})), GENERIC_FAILURE);
        assert_eq!(extract_message(&json!(null)), GENERIC_FAILURE);
    }

    #[test]
    fn test_http_error_accessors() {
        let err = ApiError::Http {
            status: 401,
            message: "Not logged in".to_string(),
        };
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.message(), "Not logged in");
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Not logged in (HTTP 401)");
    }

    #[test]
    fn test_non_http_errors_have_no_status() {
        assert_eq!(ApiError::Cancelled.status(), None);
        assert_eq!(ApiError::MissingKey { key: "lessons" }.status(), None);
    }
}
