//! Course authoring service module
//!
//! Listing with filters, the course editor, and module/lesson authoring.

mod service;

#[cfg(test)]
mod tests;

pub use service::CourseService;
