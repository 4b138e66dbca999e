//! Unit tests for enrollment service

use serde_json::json;

use crate::domain::EnrollmentStatus;
use crate::services::enrollment::EnrollmentService;
use crate::services::test_support::{enrollment_json, envelope, Harness};
use crate::store::AsyncStatus;
use crate::transport::mock::MockTransport;
use crate::transport::Method;

fn service(harness: &Harness) -> EnrollmentService<MockTransport> {
    EnrollmentService::new(harness.client.clone(), harness.store.clone())
}

fn two_enrollments() -> serde_json::Value {
    json!([
        enrollment_json("e1", "c1", "ACTIVE"),
        enrollment_json("e2", "c2", "ACTIVE")
    ])
}

#[tokio::test]
async fn test_fetch_accepts_wrapped_list() {
    let harness = Harness::new(MockTransport::new().respond(
        Method::Get,
        "/enrollments",
        200,
        envelope(two_enrollments()),
    ));
    let service = service(&harness);

    service.fetch_enrollments().await.unwrap();

    assert_eq!(harness.store.enrollments().await.enrollments.len(), 2);
}

#[tokio::test]
async fn test_fetch_accepts_bare_list() {
    let harness = Harness::new(MockTransport::new().respond(
        Method::Get,
        "/enrollments",
        200,
        two_enrollments(),
    ));
    let service = service(&harness);

    service.fetch_enrollments().await.unwrap();

    let state = harness.store.enrollments().await;
    assert_eq!(state.enrollments.len(), 2);
    assert_eq!(state.status, AsyncStatus::Fulfilled);
}

#[tokio::test]
async fn test_fetch_keeps_populated_user_and_course() {
    let harness = Harness::new(MockTransport::new().respond(
        Method::Get,
        "/enrollments",
        200,
        envelope(two_enrollments()),
    ));
    let service = service(&harness);

    service.fetch_enrollments().await.unwrap();

    let state = harness.store.enrollments().await;
    assert_eq!(state.status, AsyncStatus::Fulfilled);
    let first = &state.enrollments[0];
    assert_eq!(first.user_id(), Some("u1"));
    assert_eq!(first.student_name(), Some("User u1"));
    assert_eq!(first.course_id(), Some("c1"));
    assert_eq!(first.course_title(), Some("Course c1"));
}

#[tokio::test]
async fn test_admin_cancel_without_body_matches_populated_refs() {
    let harness = Harness::new(
        MockTransport::new()
            .respond(Method::Get, "/enrollments", 200, envelope(two_enrollments()))
            .respond(Method::Patch, "/enrollments/cancel", 200, envelope(json!(null))),
    );
    let service = service(&harness);
    service.fetch_enrollments().await.unwrap();

    service.cancel_enrollment_by_admin("u1", "c2").await.unwrap();

    let state = harness.store.enrollments().await;
    assert_eq!(state.enrollments[0].status, EnrollmentStatus::Active);
    assert_eq!(state.enrollments[1].status, EnrollmentStatus::Cancelled);
}

#[tokio::test]
async fn test_toggle_changes_only_target_status() {
    let harness = Harness::new(
        MockTransport::new()
            .respond(Method::Get, "/enrollments", 200, envelope(two_enrollments()))
            .respond(Method::Patch, "/enrollments/e2/status", 200, envelope(json!(null))),
    );
    let service = service(&harness);
    service.fetch_enrollments().await.unwrap();
    let before = harness.store.enrollments().await.enrollments;

    let next = service.toggle_enrollment_status("e2").await.unwrap();

    assert_eq!(next, Some(EnrollmentStatus::Cancelled));
    let request = harness.transport().last_request().unwrap();
    assert_eq!(request.json_body().unwrap(), &json!({"status": "CANCELLED"}));

    let after = harness.store.enrollments().await.enrollments;
    assert_eq!(after[0], before[0]);
    assert_eq!(after[1].status, EnrollmentStatus::Cancelled);
    assert_eq!(after[1].progress, before[1].progress);
    assert_eq!(after[1].course, before[1].course);

    let next = service.toggle_enrollment_status("e2").await.unwrap();
    assert_eq!(next, Some(EnrollmentStatus::Active));
    assert_eq!(
        harness.store.enrollments().await.enrollments[1].status,
        EnrollmentStatus::Active
    );
}

#[tokio::test]
async fn test_toggle_skips_completed() {
    let harness = Harness::new(MockTransport::new().respond(
        Method::Get,
        "/enrollments",
        200,
        envelope(json!([enrollment_json("e1", "c1", "COMPLETED")])),
    ));
    let service = service(&harness);
    service.fetch_enrollments().await.unwrap();

    assert_eq!(service.toggle_enrollment_status("e1").await.unwrap(), None);
    assert_eq!(harness.transport().requests().len(), 1);
}

#[tokio::test]
async fn test_admin_cancel_marks_enrollment() {
    let harness = Harness::new(
        MockTransport::new()
            .respond(Method::Get, "/enrollments", 200, envelope(two_enrollments()))
            .respond(
                Method::Patch,
                "/enrollments/cancel",
                200,
                envelope(enrollment_json("e1", "c1", "CANCELLED")),
            ),
    );
    let service = service(&harness);
    service.fetch_enrollments().await.unwrap();

    service.cancel_enrollment_by_admin("u1", "c1").await.unwrap();

    let request = harness.transport().last_request().unwrap();
    assert_eq!(
        request.json_body().unwrap(),
        &json!({"userId": "u1", "courseId": "c1"})
    );
    let state = harness.store.enrollments().await;
    assert_eq!(state.enrollments[0].status, EnrollmentStatus::Cancelled);
    assert_eq!(state.enrollments[1].status, EnrollmentStatus::Active);
}

#[tokio::test]
async fn test_enroll_unshifts_and_progress_replaces() {
    let mut progressed = enrollment_json("e3", "c3", "ACTIVE");
    progressed["progress"] = json!(50);
    let harness = Harness::new(
        MockTransport::new()
            .respond(Method::Get, "/enrollments", 200, envelope(two_enrollments()))
            .respond(
                Method::Post,
                "/enrollments/enroll/c3",
                201,
                envelope(enrollment_json("e3", "c3", "ACTIVE")),
            )
            .respond(Method::Put, "/enrollments/progress/c3", 200, envelope(progressed)),
    );
    let service = service(&harness);
    service.fetch_enrollments().await.unwrap();

    service.enroll_in_course("c3").await.unwrap();
    assert_eq!(harness.store.enrollments().await.enrollments[0].id, "e3");

    service.update_progress("c3", "l1").await.unwrap();
    let request = harness.transport().last_request().unwrap();
    assert_eq!(request.json_body().unwrap(), &json!({"lessonId": "l1"}));
    let state = harness.store.enrollments().await;
    assert_eq!(state.enrollments.len(), 3);
    assert_eq!(state.enrollments[0].progress, 50.0);
}

#[tokio::test]
async fn test_enroll_failure_message() {
    let harness = Harness::new(MockTransport::new().respond(
        Method::Post,
        "/enrollments/enroll/c1",
        409,
        json!({"message": "Already enrolled"}),
    ));
    let service = service(&harness);

    let error = service.enroll_in_course("c1").await.unwrap_err();

    assert_eq!(error.to_string(), "Already enrolled");
    service.reset_status().await;
    let state = harness.store.enrollments().await;
    assert_eq!(state.status, AsyncStatus::Idle);
    assert!(state.error.is_none());
}
