//! Common type definitions shared across the workspace

pub mod pagination;
pub mod response;

pub use pagination::{Page, PaginationState, QueryParams, DEFAULT_PAGE};
pub use response::ApiEnvelope;
