//! Enrollment service implementation

use std::sync::Arc;

use lms_shared::ApiEnvelope;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::client::ApiClient;
use crate::domain::{Enrollment, EnrollmentStatus};
use crate::errors::{ApiError, ConsoleResult};
use crate::store::{EnrollmentState, RootState, Store};
use crate::transport::{ApiRequest, HttpTransport, RawResponse};

use crate::services::{begin, reject};

const ENROLLMENTS_PATH: &str = "/enrollments";

fn enrollments(state: &mut RootState) -> &mut EnrollmentState {
    &mut state.enrollments
}

/// Listing body: an envelope around the list, or the bare list
#[derive(Deserialize)]
#[serde(untagged)]
enum EnrollmentList {
    Bare(Vec<Enrollment>),
    Wrapped(ApiEnvelope<Vec<Enrollment>>),
}

impl EnrollmentList {
    fn parse(response: &RawResponse) -> Result<Vec<Enrollment>, ApiError> {
        let list: EnrollmentList =
            serde_json::from_slice(&response.body).map_err(|e| ApiError::decode(e.to_string()))?;
        Ok(match list {
            EnrollmentList::Bare(items) => items,
            EnrollmentList::Wrapped(envelope) => envelope.into_data().unwrap_or_default(),
        })
    }
}

pub struct EnrollmentService<T: HttpTransport> {
    client: Arc<ApiClient<T>>,
    store: Store,
}

impl<T: HttpTransport> EnrollmentService<T> {
    pub fn new(client: Arc<ApiClient<T>>, store: Store) -> Self {
        Self { client, store }
    }

    /// Fetch the enrollments visible to the signed-in user
    pub async fn fetch_enrollments(&self) -> ConsoleResult<()> {
        begin(&self.store, enrollments).await;

        let result = match self.client.send(&ApiRequest::get(ENROLLMENTS_PATH)).await {
            Ok(response) => EnrollmentList::parse(&response),
            Err(e) => Err(e),
        };
        match result {
            Ok(list) => {
                self.store
                    .update(|s| s.enrollments.enrollments_loaded(list))
                    .await;
                Ok(())
            }
            Err(e) => Err(reject(&self.store, enrollments, e, "Failed to fetch enrollments").await),
        }
    }

    pub async fn enroll_in_course(&self, course_id: &str) -> ConsoleResult<Option<Enrollment>> {
        begin(&self.store, enrollments).await;

        let request = ApiRequest::post(format!("{ENROLLMENTS_PATH}/enroll/{course_id}"));
        match self.client.fetch::<Enrollment>(&request).await {
            Ok(envelope) => {
                info!(course_id, "Enrolled in course");
                let enrollment = envelope.into_data();
                self.store
                    .update(|s| s.enrollments.enrolled(enrollment.clone()))
                    .await;
                Ok(enrollment)
            }
            Err(e) => Err(reject(&self.store, enrollments, e, "Enrollment failed").await),
        }
    }

    /// Mark a lesson complete and store the recomputed enrollment
    pub async fn update_progress(&self, course_id: &str, lesson_id: &str) -> ConsoleResult<Option<Enrollment>> {
        begin(&self.store, enrollments).await;

        let request = ApiRequest::put(format!("{ENROLLMENTS_PATH}/progress/{course_id}"))
            .with_json(json!({ "lessonId": lesson_id }));
        match self.client.fetch::<Enrollment>(&request).await {
            Ok(envelope) => {
                let enrollment = envelope.into_data();
                self.store
                    .update(|s| s.enrollments.progress_updated(enrollment.clone()))
                    .await;
                Ok(enrollment)
            }
            Err(e) => Err(reject(&self.store, enrollments, e, "Failed to update progress").await),
        }
    }

    pub async fn cancel_enrollment_by_admin(&self, user_id: &str, course_id: &str) -> ConsoleResult<()> {
        begin(&self.store, enrollments).await;

        let request = ApiRequest::patch(format!("{ENROLLMENTS_PATH}/cancel"))
            .with_json(json!({ "userId": user_id, "courseId": course_id }));
        match self.client.fetch::<Enrollment>(&request).await {
            Ok(envelope) => {
                info!(user_id, course_id, "Enrollment cancelled");
                let cancelled = envelope.into_data();
                self.store
                    .update(|s| {
                        s.enrollments
                            .enrollment_cancelled(cancelled.as_ref(), user_id, course_id)
                    })
                    .await;
                Ok(())
            }
            Err(e) => Err(reject(&self.store, enrollments, e, "Failed to cancel enrollment").await),
        }
    }

    pub async fn update_enrollment_status(
        &self,
        enrollment_id: &str,
        status: EnrollmentStatus,
    ) -> ConsoleResult<()> {
        begin(&self.store, enrollments).await;

        let request = ApiRequest::patch(format!("{ENROLLMENTS_PATH}/{enrollment_id}/status"))
            .with_json(json!({ "status": status }));
        match self.client.send(&request).await {
            Ok(_) => {
                info!(enrollment_id, %status, "Enrollment status updated");
                self.store
                    .update(|s| s.enrollments.enrollment_status_updated(enrollment_id, status))
                    .await;
                Ok(())
            }
            Err(e) => Err(reject(&self.store, enrollments, e, "Failed to update enrollment status").await),
        }
    }

    /// Flip an enrollment between active and cancelled
    ///
    /// Returns the status that was requested, or `None` when the enrollment
    /// is not loaded or already completed.
    pub async fn toggle_enrollment_status(&self, enrollment_id: &str) -> ConsoleResult<Option<EnrollmentStatus>> {
        let current = self
            .store
            .read(|s| s.enrollments.find(enrollment_id).map(|e| e.status))
            .await;
        let next = match current {
            Some(status) if status.toggled() != status => status.toggled(),
            _ => return Ok(None),
        };
        self.update_enrollment_status(enrollment_id, next).await?;
        Ok(Some(next))
    }

    pub async fn reset_status(&self) {
        self.store.update(|s| s.enrollments.reset_status()).await;
    }
}
