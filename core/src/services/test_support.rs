//! Builders shared by the service tests

use std::sync::Arc;

use lms_shared::ApiConfig;
use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::session::SessionContext;
use crate::store::Store;
use crate::transport::mock::MockTransport;

pub(crate) struct Harness {
    pub client: Arc<ApiClient<MockTransport>>,
    pub store: Store,
    pub session: SessionContext,
}

impl Harness {
    pub fn new(transport: MockTransport) -> Self {
        let session = SessionContext::in_memory();
        let client = Arc::new(ApiClient::new(
            transport,
            ApiConfig::default(),
            Arc::new(session.clone()),
        ));
        Self {
            client,
            store: Store::new(),
            session,
        }
    }

    pub fn transport(&self) -> &MockTransport {
        self.client.transport()
    }
}

pub(crate) fn envelope(data: Value) -> Value {
    json!({ "statusCode": 200, "success": true, "message": "OK", "data": data })
}

pub(crate) fn user_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "fullName": format!("User {id}"),
        "email": format!("{id}@lms.dev"),
        "role": "STUDENT",
        "status": status,
        "isEmailVerified": true
    })
}

pub(crate) fn course_json(id: &str, modules: Value) -> Value {
    json!({
        "_id": id,
        "title": format!("Course {id}"),
        "description": "A course about things",
        "price": 0,
        "isFree": true,
        "status": "DRAFT",
        "modules": modules
    })
}

pub(crate) fn module_json(id: &str, order: u32, lessons: Value) -> Value {
    json!({
        "_id": id,
        "title": format!("Module {id}"),
        "description": "Module body",
        "order": order,
        "lessons": lessons
    })
}

pub(crate) fn lesson_json(id: &str, order: u32) -> Value {
    json!({ "_id": id, "title": format!("Lesson {id}"), "order": order })
}

/// Enrollment as the listing endpoint sends it, with user and course populated
pub(crate) fn enrollment_json(id: &str, course_id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "userId": { "_id": "u1", "fullName": "User u1", "email": "u1@lms.dev" },
        "courseId": { "_id": course_id, "title": format!("Course {course_id}"), "thumbnail": null },
        "status": status,
        "progress": 0
    })
}
