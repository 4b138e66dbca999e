//! Application state shared by every console operation.
//!
//! The root state is split into three slices (users, courses, enrollments),
//! each owning a request lifecycle status and an error message alongside its
//! data. Mutation goes through the slice reducers only; readers take
//! snapshots.

pub mod course_slice;
pub mod enrollment_slice;
pub mod user_slice;

use std::sync::Arc;

use tokio::sync::RwLock;

pub use course_slice::{CourseFilters, CourseState};
pub use enrollment_slice::EnrollmentState;
pub use user_slice::{UserFilters, UserState};

/// Lifecycle of the last request issued through a slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AsyncStatus {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

impl AsyncStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, AsyncStatus::Pending)
    }
}

/// Request lifecycle shared by every slice
pub trait AsyncSlice {
    fn status_mut(&mut self) -> &mut AsyncStatus;
    fn error_mut(&mut self) -> &mut Option<String>;

    /// A request started; any previous error is cleared
    fn begin(&mut self) {
        *self.status_mut() = AsyncStatus::Pending;
        *self.error_mut() = None;
    }

    fn fulfill(&mut self) {
        *self.status_mut() = AsyncStatus::Fulfilled;
    }

    fn reject(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        *self.status_mut() = AsyncStatus::Rejected;
        *self.error_mut() = Some(message.into());
    }
}

/// Every slice of the console state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    pub users: UserState,
    pub courses: CourseState,
    pub enrollments: EnrollmentState,
}

/// Cloneable handle to the root state
///
/// The lock is only held while a reducer runs; no network call ever happens
/// under it.
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: Arc<RwLock<RootState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: RootState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Apply a reducer to the root state
    pub async fn update<R>(&self, f: impl FnOnce(&mut RootState) -> R) -> R {
        let mut state = self.state.write().await;
        f(&mut state)
    }

    /// Read from the root state without cloning it
    pub async fn read<R>(&self, f: impl FnOnce(&RootState) -> R) -> R {
        let state = self.state.read().await;
        f(&state)
    }

    pub async fn snapshot(&self) -> RootState {
        self.state.read().await.clone()
    }

    pub async fn users(&self) -> UserState {
        self.read(|s| s.users.clone()).await
    }

    pub async fn courses(&self) -> CourseState {
        self.read(|s| s.courses.clone()).await
    }

    pub async fn enrollments(&self) -> EnrollmentState {
        self.read(|s| s.enrollments.clone()).await
    }
}
