//! Tests for the refresh-aware API client

use std::sync::{Arc, Mutex};

use lms_shared::ApiConfig;
use serde_json::{json, Value};

use crate::errors::ApiError;
use crate::transport::mock::MockTransport;
use crate::transport::{ApiRequest, Method, RawResponse};

use super::{ApiClient, Navigator};

const REFRESH: &str = "/users/refresh-token";

#[derive(Default)]
struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

fn client(transport: MockTransport) -> (ApiClient<MockTransport>, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::default());
    let client = ApiClient::new(transport, ApiConfig::default(), navigator.clone());
    (client, navigator)
}

#[tokio::test]
async fn test_success_passes_through_once() {
    let transport = MockTransport::new().respond(
        Method::Get,
        "/courses",
        200,
        json!({"data": {"docs": []}}),
    );
    let (client, navigator) = client(transport);

    let envelope = client
        .fetch::<Value>(&ApiRequest::get("/courses"))
        .await
        .unwrap();

    assert!(envelope.data.is_some());
    assert_eq!(client.transport().requests().len(), 1);
    assert!(navigator.routes().is_empty());
}

#[tokio::test]
async fn test_unauthorized_refreshes_and_replays_identical_request() {
    let transport = MockTransport::new()
        .respond(Method::Get, "/users", 401, json!({"message": "jwt expired"}))
        .respond(Method::Get, "/users", 200, json!({"data": {"docs": []}}))
        .respond(Method::Post, REFRESH, 200, json!({"success": true}));
    let (client, navigator) = client(transport);

    let request = ApiRequest::get("/users").with_query(
        lms_shared::QueryParams::new()
            .with("page", 2)
            .with("limit", 10)
            .with("role", "ADMIN"),
    );
    let result = client.send(&request).await;

    assert!(result.is_ok());
    let requests = client.transport().requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0], request);
    assert_eq!(requests[1].path, REFRESH);
    assert_eq!(requests[1].method, Method::Post);
    assert_eq!(requests[2], request);
    assert!(navigator.routes().is_empty());
}

#[tokio::test]
async fn test_replayed_request_is_not_retried_twice() {
    let transport = MockTransport::new()
        .respond(Method::Get, "/courses", 401, json!({}))
        .respond(Method::Post, REFRESH, 200, json!({}));
    let (client, navigator) = client(transport);

    let error = client.send(&ApiRequest::get("/courses")).await.unwrap_err();

    assert_eq!(error.status(), Some(401));
    assert_eq!(client.transport().count(Method::Get, "/courses"), 2);
    assert_eq!(client.transport().count(Method::Post, REFRESH), 1);
    assert!(navigator.routes().is_empty());
}

#[tokio::test]
async fn test_failed_refresh_redirects_once_and_surfaces_refresh_error() {
    let transport = MockTransport::new()
        .respond(Method::Get, "/enrollments", 401, json!({}))
        .respond(
            Method::Post,
            REFRESH,
            401,
            json!({"message": "Refresh token expired"}),
        );
    let (client, navigator) = client(transport);

    let error = client
        .send(&ApiRequest::get("/enrollments"))
        .await
        .unwrap_err();

    assert_eq!(error.server_message(), Some("Refresh token expired"));
    assert_eq!(navigator.routes(), vec!["/login".to_string()]);
    assert_eq!(client.transport().count(Method::Get, "/enrollments"), 1);
    assert_eq!(client.transport().count(Method::Post, REFRESH), 1);
}

#[tokio::test]
async fn test_refresh_network_failure_redirects() {
    let transport = MockTransport::new()
        .respond(Method::Get, "/courses/c1", 401, json!({}))
        .fail(Method::Post, REFRESH, "connection reset");
    let (client, navigator) = client(transport);

    let error = client.send(&ApiRequest::get("/courses/c1")).await.unwrap_err();

    assert!(matches!(error, ApiError::Network { .. }));
    assert_eq!(navigator.routes(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn test_direct_refresh_failure_does_not_recurse() {
    let transport = MockTransport::new().respond(Method::Post, REFRESH, 401, json!({}));
    let (client, navigator) = client(transport);

    let error = client.refresh_session().await.unwrap_err();

    assert!(error.is_unauthorized());
    assert_eq!(client.transport().requests().len(), 1);
    assert_eq!(navigator.routes().len(), 1);
}

#[tokio::test]
async fn test_other_errors_pass_through_without_refresh() {
    let transport = MockTransport::new()
        .respond(Method::Post, "/users/login", 400, json!({"message": "Invalid credentials"}))
        .fail(Method::Get, "/users", "dns error");
    let (client, navigator) = client(transport);

    let error = client
        .send(&ApiRequest::post("/users/login"))
        .await
        .unwrap_err();
    assert_eq!(error.rejection_message("Login failed"), "Invalid credentials");

    let error = client.send(&ApiRequest::get("/users")).await.unwrap_err();
    assert!(matches!(error, ApiError::Network { .. }));

    assert_eq!(client.transport().count(Method::Post, REFRESH), 0);
    assert!(navigator.routes().is_empty());
}

#[tokio::test]
async fn test_empty_body_decodes_without_data() {
    let transport = MockTransport::new().respond_raw(
        Method::Patch,
        "/users/u1/status",
        RawResponse::new(204, ""),
    );
    let (client, _) = client(transport);

    let envelope = client
        .fetch::<Value>(&ApiRequest::patch("/users/u1/status"))
        .await
        .unwrap();

    assert!(envelope.data.is_none());
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let transport = MockTransport::new().respond_raw(
        Method::Get,
        "/courses",
        RawResponse::new(200, "<html>"),
    );
    let (client, _) = client(transport);

    let error = client
        .fetch::<Value>(&ApiRequest::get("/courses"))
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::Decode { .. }));
}
