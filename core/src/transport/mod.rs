//! Transport abstraction between the API client and the HTTP stack.
//!
//! The client only deals in [`ApiRequest`] and [`RawResponse`]; a concrete
//! transport (reqwest in `lms_infra`, scripted doubles in tests) owns the
//! base URL, the cookie jar and the wire encoding.

use async_trait::async_trait;
use lms_shared::QueryParams;
use serde::Serialize;
use serde_json::Value;

use crate::errors::ApiError;

#[cfg(test)]
pub mod mock;

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file attached to a multipart request
///
/// Serializes as its metadata only, for validation error params.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct FileUpload {
    pub file_name: String,
    pub mime: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Uploads can be large videos; keep them out of debug logs.
impl std::fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// One part of a multipart form
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text(String),
    File(FileUpload),
}

/// Ordered multipart form body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    parts: Vec<(String, FormPart)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl ToString) -> Self {
        self.parts
            .push((name.to_string(), FormPart::Text(value.to_string())));
        self
    }

    /// Add a text part only when a value is present
    pub fn opt_text(self, name: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.text(name, value),
            None => self,
        }
    }

    pub fn file(mut self, name: &str, file: FileUpload) -> Self {
        self.parts.push((name.to_string(), FormPart::File(file)));
        self
    }

    /// Add a file part only when a file is present
    pub fn opt_file(self, name: &str, file: Option<FileUpload>) -> Self {
        match file {
            Some(file) => self.file(name, file),
            None => self,
        }
    }

    pub fn parts(&self) -> &[(String, FormPart)] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Value of a text part
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(n, part)| match part {
            FormPart::Text(value) if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.parts
            .iter()
            .any(|(n, part)| n == name && matches!(part, FormPart::File(_)))
    }
}

/// Body of an outgoing request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

/// A request relative to the configured base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the base URL, starting with `/`
    pub path: String,
    pub query: QueryParams,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn with_multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// JSON body, if this is a JSON request
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Multipart body, if this is a multipart request
    pub fn multipart_body(&self) -> Option<&MultipartForm> {
        match &self.body {
            RequestBody::Multipart(form) => Some(form),
            _ => None,
        }
    }
}

/// Status and raw body of a received response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Response with a JSON body
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one HTTP exchange; no retries, no interpretation of the status
///
/// Implementations forward credentials (cookies) on every request and map
/// transport-level failures to [`ApiError::Network`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builders() {
        let request = ApiRequest::post("/users/login").with_json(json!({"email": "a@b.com"}));
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.json_body().unwrap()["email"], "a@b.com");
        assert!(request.multipart_body().is_none());
    }

    #[test]
    fn test_multipart_optional_parts() {
        let form = MultipartForm::new()
            .text("title", "Intro")
            .opt_text("description", None::<String>)
            .opt_file("thumbnail", Some(FileUpload::new("t.png", "image/png", vec![1, 2, 3])));

        assert_eq!(form.parts().len(), 2);
        assert_eq!(form.text_value("title"), Some("Intro"));
        assert!(form.has_file("thumbnail"));
        assert!(!form.has_file("title"));
    }

    #[test]
    fn test_file_upload_debug_hides_bytes() {
        let upload = FileUpload::new("v.mp4", "video/mp4", vec![0; 4096]);
        let debug = format!("{:?}", upload);
        assert!(debug.contains("len: 4096"));
        assert!(!debug.contains("[0, 0"));
    }

    #[test]
    fn test_raw_response_success_range() {
        assert!(RawResponse::new(201, "").is_success());
        assert!(!RawResponse::new(401, "").is_success());
        assert!(!RawResponse::new(302, "").is_success());
    }
}
