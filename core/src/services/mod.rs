//! Console operations
//!
//! Every asynchronous operation follows the same lifecycle:
//! - the form (if any) is validated; a failure returns before the store is touched
//! - the owning slice is marked pending
//! - the request goes out through the API client, with no store lock held
//! - the slice merges the result or records the rejection message

pub mod auth;
pub mod course;
pub mod enrollment;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;

use crate::client::ApiClient;
use crate::errors::{ApiError, ConsoleError};
use crate::session::SessionContext;
use crate::store::{AsyncSlice, RootState, Store};
use crate::transport::HttpTransport;

pub use auth::AuthService;
pub use course::CourseService;
pub use enrollment::EnrollmentService;
pub use user::UserService;

/// All console operations over one client, store and session
pub struct Services<T: HttpTransport> {
    pub auth: AuthService<T>,
    pub users: UserService<T>,
    pub courses: CourseService<T>,
    pub enrollments: EnrollmentService<T>,
}

impl<T: HttpTransport> Services<T> {
    pub fn new(client: Arc<ApiClient<T>>, store: Store, session: SessionContext) -> Self {
        Self {
            auth: AuthService::new(client.clone(), store.clone(), session.clone()),
            users: UserService::new(client.clone(), store.clone()),
            courses: CourseService::new(client.clone(), store.clone()),
            enrollments: EnrollmentService::new(client, store),
        }
    }
}

/// Selects one slice of the root state
pub(crate) type SliceSelector<S> = fn(&mut RootState) -> &mut S;

pub(crate) async fn begin<S: AsyncSlice>(store: &Store, slice: SliceSelector<S>) {
    store.update(|state| slice(state).begin()).await;
}

/// Record a failed call on its slice and turn it into the caller's error
pub(crate) async fn reject<S: AsyncSlice>(
    store: &Store,
    slice: SliceSelector<S>,
    error: ApiError,
    fallback: &str,
) -> ConsoleError {
    let error = ConsoleError::rejected(error, fallback);
    warn!(error = %error, cause = ?error.api_error(), "Operation rejected");
    let message = error.to_string();
    store.update(|state| slice(state).reject(message)).await;
    error
}

/// Payload that is either a single record or a list of them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub(crate) fn into_first(self) -> Option<T> {
        match self {
            OneOrMany::Many(items) => items.into_iter().next(),
            OneOrMany::One(item) => Some(item),
        }
    }
}
