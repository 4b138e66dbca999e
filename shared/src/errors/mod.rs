//! Shared error types and error body structures

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Invalid configuration for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

/// Error body returned by the LMS backend on failed requests
///
/// Only `message` is relied upon; the other fields are kept for diagnostics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub status_code: Option<u16>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub success: Option<bool>,

    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

impl ErrorBody {
    /// Parse an error body, tolerating empty or non-JSON payloads
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Non-blank server message, if any
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_message() {
        let body = ErrorBody::parse(br#"{"statusCode":401,"message":"Unauthorized request","success":false}"#);
        assert_eq!(body.status_code, Some(401));
        assert_eq!(body.message(), Some("Unauthorized request"));
    }

    #[test]
    fn test_error_body_tolerates_garbage() {
        assert_eq!(ErrorBody::parse(b"<html>502</html>").message(), None);
        assert_eq!(ErrorBody::parse(b"").message(), None);
        assert_eq!(ErrorBody::parse(br#"{"message":"   "}"#).message(), None);
    }
}
