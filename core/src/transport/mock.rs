//! Scripted transport for testing

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::errors::ApiError;

use super::{ApiRequest, HttpTransport, Method, RawResponse};

type Route = (Method, String);

/// Mock transport answering from per-route queues
///
/// Each route pops its queued outcomes in order; the last one is repeated once
/// the queue is down to a single entry. Unscripted routes answer 404.
pub struct MockTransport {
    routes: Mutex<HashMap<Route, VecDeque<Result<RawResponse, ApiError>>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a JSON response for a route
    pub fn respond(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.push(method, path, Ok(RawResponse::json(status, &body)))
    }

    /// Queue a response with an arbitrary body
    pub fn respond_raw(self, method: Method, path: &str, response: RawResponse) -> Self {
        self.push(method, path, Ok(response))
    }

    /// Queue a transport failure for a route
    pub fn fail(self, method: Method, path: &str, message: &str) -> Self {
        self.push(method, path, Err(ApiError::network(message)))
    }

    fn push(self, method: Method, path: &str, outcome: Result<RawResponse, ApiError>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(outcome);
        self
    }

    /// Every request received, in order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received for a route
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());

        let mut routes = self.routes.lock().unwrap();
        let queue = match routes.get_mut(&(request.method, request.path.clone())) {
            Some(queue) => queue,
            None => return Ok(RawResponse::new(404, r#"{"message":"Route not scripted"}"#)),
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        }
    }
}
