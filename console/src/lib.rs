//! LMS console client
//!
//! Composition root for the workspace: loads [`lms_shared::AppConfig`],
//! installs the tracing subscriber, builds the reqwest transport and the
//! session cache, and exposes the console operations as [`ConsoleApp`].

pub mod app;
pub mod commands;
pub mod telemetry;

pub use app::ConsoleApp;
pub use commands::{Cli, Command};
pub use telemetry::init_tracing;
