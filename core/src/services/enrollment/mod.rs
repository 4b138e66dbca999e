//! Enrollment service module

mod service;

#[cfg(test)]
mod tests;

pub use service::EnrollmentService;
