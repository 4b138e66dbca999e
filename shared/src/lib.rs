//! Shared configuration and common types for the LMS console client
//!
//! This crate provides common functionality used across all workspace crates:
//! - Configuration types
//! - Error types and error body structures
//! - Response envelope and pagination types
//! - Validation helpers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    ApiConfig, AppConfig, Environment, LogFormat, LoggingConfig, SearchConfig, SessionConfig,
    StreamConfig,
};
pub use errors::{ConfigError, ErrorBody};
pub use types::{ApiEnvelope, Page, PaginationState, QueryParams};
pub use utils::validation;
