//! Error types raised by the API client, forms and console operations.

use std::collections::HashMap;

use lms_shared::ErrorBody;
use thiserror::Error;

/// Failure of a single backend call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No response was received (connection, DNS, timeout)
    #[error("Network error: {message}")]
    Network { message: String },

    /// The backend answered with a non-2xx status
    #[error("Request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    /// The response body could not be decoded
    #[error("Invalid response body: {message}")]
    Decode { message: String },

    /// The request could not be built (bad URL, unreadable upload)
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

pub const UNAUTHORIZED: u16 = 401;

impl ApiError {
    /// Build a status error from a failed response body
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        ApiError::Status {
            status,
            message: ErrorBody::parse(body).message().map(str::to_string),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        ApiError::Decode {
            message: message.into(),
        }
    }

    /// HTTP status of the failed response, if there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(UNAUTHORIZED)
    }

    /// Message supplied by the backend in the error body
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Human-readable message for a rejected operation
    pub fn rejection_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

/// Form input rejected by schema checks before any request was sent
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid form input: {errors}")]
pub struct FormError {
    pub errors: validator::ValidationErrors,
}

impl From<validator::ValidationErrors> for FormError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self { errors }
    }
}

impl FormError {
    /// Messages per field, for inline rendering next to each input
    pub fn field_messages(&self) -> HashMap<String, Vec<String>> {
        let mut fields: HashMap<String, Vec<String>> = HashMap::new();
        for (field, errors) in self.errors.field_errors() {
            let messages = fields.entry(field.to_string()).or_default();
            for error in errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                messages.push(message);
            }
        }
        fields
    }

    /// Whether a given field failed validation
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.field_errors().contains_key(field)
    }
}

/// Outcome of a console operation that did not complete
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsoleError {
    #[error(transparent)]
    Form(#[from] FormError),

    /// The backend call failed; `message` is what the slice stored
    #[error("{message}")]
    Rejected {
        message: String,
        #[source]
        source: ApiError,
    },
}

impl ConsoleError {
    pub fn rejected(source: ApiError, fallback: &str) -> Self {
        ConsoleError::Rejected {
            message: source.rejection_message(fallback),
            source,
        }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ConsoleError::Rejected { source, .. } => Some(source),
            ConsoleError::Form(_) => None,
        }
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Failure reading or writing the persisted session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed session data: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Session storage lock poisoned")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_extracts_message() {
        let error = ApiError::from_status(409, br#"{"message":"Email already registered"}"#);
        assert_eq!(error.status(), Some(409));
        assert_eq!(error.server_message(), Some("Email already registered"));
        assert_eq!(error.rejection_message("signup failed"), "Email already registered");
    }

    #[test]
    fn test_rejection_message_falls_back() {
        assert_eq!(
            ApiError::from_status(500, b"").rejection_message("Failed to fetch courses"),
            "Failed to fetch courses"
        );
        assert_eq!(
            ApiError::network("connection refused").rejection_message("Login failed"),
            "Login failed"
        );
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ApiError::from_status(401, b"{}").is_unauthorized());
        assert!(!ApiError::from_status(403, b"{}").is_unauthorized());
        assert!(!ApiError::network("reset").is_unauthorized());
    }

    #[test]
    fn test_console_error_message() {
        let error = ConsoleError::rejected(ApiError::from_status(400, b"{}"), "Enrollment failed");
        assert_eq!(error.to_string(), "Enrollment failed");
        assert_eq!(error.api_error().and_then(ApiError::status), Some(400));
    }

    #[test]
    fn test_session_error_from_sources() {
        let io: SessionError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into();
        assert!(matches!(io, SessionError::Io(_)));

        let serde: SessionError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(serde, SessionError::Serde(_)));
        assert!(serde.to_string().starts_with("Malformed session data"));
    }
}
