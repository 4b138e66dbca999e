//! Enrollment slice

use crate::domain::{Enrollment, EnrollmentStatus};

use super::{AsyncSlice, AsyncStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrollmentState {
    pub enrollments: Vec<Enrollment>,
    pub status: AsyncStatus,
    pub error: Option<String>,
}

impl AsyncSlice for EnrollmentState {
    fn status_mut(&mut self) -> &mut AsyncStatus {
        &mut self.status
    }

    fn error_mut(&mut self) -> &mut Option<String> {
        &mut self.error
    }
}

impl EnrollmentState {
    pub fn reset_status(&mut self) {
        self.status = AsyncStatus::Idle;
        self.error = None;
    }

    pub fn enrollments_loaded(&mut self, enrollments: Vec<Enrollment>) {
        self.enrollments = enrollments;
        self.fulfill();
    }

    /// Record a new enrollment, replacing a stale copy of it if present
    pub fn enrolled(&mut self, enrollment: Option<Enrollment>) {
        if let Some(enrollment) = enrollment {
            match self.enrollments.iter_mut().find(|e| e.id == enrollment.id) {
                Some(existing) => *existing = enrollment,
                None => self.enrollments.insert(0, enrollment),
            }
        }
        self.fulfill();
    }

    pub fn progress_updated(&mut self, enrollment: Option<Enrollment>) {
        if let Some(enrollment) = enrollment {
            if let Some(existing) = self.enrollments.iter_mut().find(|e| e.id == enrollment.id) {
                *existing = enrollment;
            }
        }
        self.fulfill();
    }

    /// Mark the cancelled enrollment; matched by id, or by user and course
    pub fn enrollment_cancelled(&mut self, cancelled: Option<&Enrollment>, user_id: &str, course_id: &str) {
        let target = self.enrollments.iter_mut().find(|e| match cancelled {
            Some(cancelled) => e.id == cancelled.id,
            None => e.user_id() == Some(user_id) && e.course_id() == Some(course_id),
        });
        if let Some(existing) = target {
            existing.status = EnrollmentStatus::Cancelled;
        }
        self.fulfill();
    }

    pub fn enrollment_status_updated(&mut self, enrollment_id: &str, status: EnrollmentStatus) {
        if let Some(existing) = self.enrollments.iter_mut().find(|e| e.id == enrollment_id) {
            existing.status = status;
        }
        self.fulfill();
    }

    pub fn find(&self, enrollment_id: &str) -> Option<&Enrollment> {
        self.enrollments.iter().find(|e| e.id == enrollment_id)
    }
}
