//! Tests for enrollment service

#[cfg(test)]
mod service_tests;
