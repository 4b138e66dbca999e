//! Domain layer containing the entities the console mirrors from the backend.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
