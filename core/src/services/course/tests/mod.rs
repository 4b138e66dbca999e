//! Tests for course service
