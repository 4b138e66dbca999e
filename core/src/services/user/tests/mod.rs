//! Tests for user service
