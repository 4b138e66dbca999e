//! Backend API configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// REST backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL every request path is joined onto (e.g. `http://localhost:4000/api/v1`)
    pub base_url: String,

    /// Path of the token refresh endpoint
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,

    /// Application route the user is sent to when the session cannot be refreshed
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// How many times a request may be replayed after a 401
    #[serde(default = "default_max_auth_retries")]
    pub max_auth_retries: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:4000/api/v1"),
            refresh_path: default_refresh_path(),
            login_path: default_login_path(),
            max_auth_retries: default_max_auth_retries(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Create a new API configuration for a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Override `defaults` with any `LMS_*` environment variables that are set
    pub fn from_env_with(defaults: Self) -> Self {
        Self {
            base_url: std::env::var("LMS_API_BASE_URL").unwrap_or(defaults.base_url),
            refresh_path: std::env::var("LMS_REFRESH_PATH").unwrap_or(defaults.refresh_path),
            login_path: std::env::var("LMS_LOGIN_PATH").unwrap_or(defaults.login_path),
            max_auth_retries: std::env::var("LMS_MAX_AUTH_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_auth_retries),
            timeout_secs: std::env::var("LMS_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            user_agent: defaults.user_agent,
        }
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check whether a request path targets the refresh endpoint
    pub fn is_refresh_path(&self, path: &str) -> bool {
        path.contains(self.refresh_path.as_str())
    }
}

/// Dashboard statistics stream configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamConfig {
    /// Stream path for the admin dashboard
    #[serde(default = "default_admin_stream")]
    pub admin_path: String,

    /// Stream path for the instructor dashboard
    #[serde(default = "default_instructor_stream")]
    pub instructor_path: String,

    /// Stream path for the student dashboard
    #[serde(default = "default_student_stream")]
    pub student_path: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            admin_path: default_admin_stream(),
            instructor_path: default_instructor_stream(),
            student_path: default_student_stream(),
        }
    }
}

/// Search and listing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Delay applied before a search term triggers a fetch, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Page size used for user listings
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            page_limit: default_page_limit(),
        }
    }
}

impl SearchConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            debounce_ms: std::env::var("LMS_SEARCH_DEBOUNCE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.debounce_ms),
            page_limit: std::env::var("LMS_PAGE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.page_limit),
        }
    }

    /// Debounce delay as a `Duration`
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn default_refresh_path() -> String {
    String::from("/users/refresh-token")
}

fn default_login_path() -> String {
    String::from("/login")
}

fn default_max_auth_retries() -> u32 {
    1
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("lms-console/{}", env!("CARGO_PKG_VERSION"))
}

fn default_admin_stream() -> String {
    String::from("/users/admin/stream")
}

fn default_instructor_stream() -> String {
    String::from("/users/instructor/stream")
}

fn default_student_stream() -> String {
    String::from("/users/user/stream")
}

fn default_debounce_ms() -> u64 {
    400
}

fn default_page_limit() -> u32 {
    10
}
