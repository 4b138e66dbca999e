//! # Infrastructure Layer
//!
//! Concrete implementations behind the seams defined in `lms_core`.
//!
//! ## Modules
//!
//! - **http**: reqwest transport with a cookie jar, bound to the API base URL
//! - **stream**: server-sent event stream for the dashboard statistics
//! - **search**: debouncer gating search-triggered fetches
//! - **session**: JSON file storage for the persisted session

pub mod http;
pub mod search;
pub mod session;
pub mod stream;

pub use http::ReqwestTransport;
pub use search::Debouncer;
pub use session::FileSessionStorage;
pub use stream::{DashboardStream, SseEvent, SseParser, StreamError};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Base URL is not a valid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
