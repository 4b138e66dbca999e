//! API response envelope

use serde::{Deserialize, Serialize};

/// Standard envelope wrapping every successful backend response
///
/// `{ statusCode, success, message, data }`, every field optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub status_code: Option<u16>,

    #[serde(default)]
    pub success: Option<bool>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Wrap data in a successful envelope
    pub fn success(data: T) -> Self {
        Self {
            status_code: Some(200),
            success: Some(true),
            message: None,
            data: Some(data),
        }
    }

    /// Extract the data, consuming the envelope
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Map the data to a different type
    pub fn map<U, F>(self, f: F) -> ApiEnvelope<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiEnvelope {
            status_code: self.status_code,
            success: self.success,
            message: self.message,
            data: self.data.map(f),
        }
    }
}
