//! # LMS Console Core
//!
//! Client-side core of the LMS administration console.
//! This crate contains the domain entities mirrored from the backend, the
//! refresh-aware API client and its transport seam, the session context,
//! the state store with its three slices, form schemas, and the services
//! implementing every console operation.

pub mod client;
pub mod domain;
pub mod errors;
pub mod forms;
pub mod services;
pub mod session;
pub mod store;
pub mod transport;

// Re-export commonly used types for convenience
pub use client::{ApiClient, Navigator};
pub use domain::*;
pub use errors::{ApiError, ConsoleError, ConsoleResult, FormError, SessionError};
pub use services::{AuthService, CourseService, EnrollmentService, Services, UserService};
pub use session::{MemorySessionStorage, PersistedSession, SessionContext, SessionStorage};
pub use store::{AsyncSlice, AsyncStatus, RootState, Store};
pub use transport::{ApiRequest, FileUpload, HttpTransport, Method, MultipartForm, RawResponse, RequestBody};
