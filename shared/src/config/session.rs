//! Client-local session configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the cached session (current user, verify-flow ids) lives
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    /// JSON file backing the session cache; `None` keeps it in memory only
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
}

impl SessionConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        Self {
            storage_path: std::env::var("LMS_SESSION_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Session persisted to a file
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: Some(path.into()),
        }
    }

    /// Check if the session is kept in memory only
    pub fn is_in_memory(&self) -> bool {
        self.storage_path.is_none()
    }
}
