//! reqwest implementation of the API transport
//!
//! One `reqwest::Client` with a cookie store is shared by every request so
//! the backend's HTTP-only access/refresh cookies are sent back on each call,
//! including the refresh call and the dashboard event streams. The request
//! timeout is applied per API call only, since event streams stay open.

use async_trait::async_trait;
use lms_core::errors::ApiError;
use lms_core::transport::{ApiRequest, FormPart, HttpTransport, Method, MultipartForm, RawResponse, RequestBody};
use lms_shared::ApiConfig;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

use crate::InfrastructureError;

/// Transport bound to the configured API base URL
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build the cookie-carrying client for `config`
    pub fn new(config: &ApiConfig) -> Result<Self, InfrastructureError> {
        // Reject a malformed base URL up front.
        Url::parse(&config.base_url)?;

        let client = Client::builder()
            .cookie_store(true)
            .connect_timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
        })
    }

    /// The underlying client; clones share the cookie jar
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    /// Absolute URL of a path below the base URL
    pub fn url_for(&self, path: &str) -> Result<Url, url::ParseError> {
        let separator = if path.starts_with('/') { "" } else { "/" };
        Url::parse(&format!("{}{}{}", self.base_url, separator, path))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let url = self.url_for(&request.path).map_err(|e| ApiError::InvalidRequest {
            message: format!("{}: {}", request.path, e),
        })?;

        let mut builder = self
            .client
            .request(method_of(request.method), url)
            .timeout(self.timeout);
        if !request.query.is_empty() {
            builder = builder.query(request.query.pairs());
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(body),
            RequestBody::Multipart(form) => builder.multipart(multipart_of(form)?),
        };

        let response = builder.send().await.map_err(|e| {
            error!(method = %request.method, path = %request.path, error = %e, "Request failed");
            ApiError::network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        debug!(status, len = body.len(), path = %request.path, "Received response");

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

fn method_of(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn multipart_of(form: &MultipartForm) -> Result<Form, ApiError> {
    let mut multipart = Form::new();
    for (name, part) in form.parts() {
        multipart = match part {
            FormPart::Text(value) => multipart.text(name.clone(), value.clone()),
            FormPart::File(file) => {
                let part = Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone())
                    .mime_str(&file.mime)
                    .map_err(|e| ApiError::InvalidRequest {
                        message: format!("{}: {}", file.file_name, e),
                    })?;
                multipart.part(name.clone(), part)
            }
        };
    }
    Ok(multipart)
}
