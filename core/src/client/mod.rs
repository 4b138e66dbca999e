//! API client wrapping a transport with the session refresh policy.
//!
//! Every outgoing request is logged, then sent through the injected
//! [`HttpTransport`]. Failed responses go through one error hook:
//!
//! 1. a failure of the refresh endpoint itself redirects to the login route
//!    and is returned as is, so refreshing never recurses;
//! 2. a 401 on any other request triggers one refresh call and, when it
//!    succeeds, a replay of the identical request;
//! 3. everything else is returned unmodified.
//!
//! The number of replays already spent is passed explicitly down the call,
//! so a replayed request that answers 401 again is surfaced, not retried.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use lms_shared::{ApiConfig, ApiEnvelope};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::errors::ApiError;
use crate::transport::{ApiRequest, HttpTransport, RawResponse};

#[cfg(test)]
mod tests;

/// Moves the application to another route
///
/// Used by the client to send the user to the login page once the session
/// can no longer be refreshed.
pub trait Navigator: Send + Sync {
    fn redirect(&self, route: &str);
}

/// The console's single point of outbound REST communication
pub struct ApiClient<T: HttpTransport> {
    transport: T,
    config: ApiConfig,
    navigator: Arc<dyn Navigator>,
}

impl<T: HttpTransport> ApiClient<T> {
    /// Create a client over a transport already bound to `config.base_url`
    pub fn new(transport: T, config: ApiConfig, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            transport,
            config,
            navigator,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request, applying the refresh policy on failure
    pub async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        self.dispatch(request, 0).await
    }

    /// Send a request and decode the response envelope
    ///
    /// An empty success body decodes to an envelope without data.
    pub async fn fetch<D: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<ApiEnvelope<D>, ApiError> {
        let response = self.send(request).await?;
        decode_envelope(&response)
    }

    /// Ask the backend to rotate the session cookies
    pub async fn refresh_session(&self) -> Result<(), ApiError> {
        let request = ApiRequest::post(self.config.refresh_path.clone());
        self.dispatch(&request, 0).await.map(|_| ())
    }

    fn dispatch<'a>(
        &'a self,
        request: &'a ApiRequest,
        retries: u32,
    ) -> BoxFuture<'a, Result<RawResponse, ApiError>> {
        Box::pin(async move {
            debug!(method = %request.method, path = %request.path, retries, "Request");

            let error = match self.transport.execute(request).await {
                Ok(response) if response.is_success() => {
                    debug!(status = response.status, path = %request.path, "Response");
                    return Ok(response);
                }
                Ok(response) => ApiError::from_status(response.status, &response.body),
                Err(error) => error,
            };

            if self.config.is_refresh_path(&request.path) {
                warn!(error = %error, "Session refresh failed, redirecting to login");
                self.navigator.redirect(&self.config.login_path);
                return Err(error);
            }

            if error.is_unauthorized() && retries < self.config.max_auth_retries {
                info!(path = %request.path, "Access token rejected, refreshing session");
                let refresh = ApiRequest::post(self.config.refresh_path.clone());
                // A failed refresh has already redirected through the rule above.
                self.dispatch(&refresh, retries).await?;
                return self.dispatch(request, retries + 1).await;
            }

            Err(error)
        })
    }
}

fn decode_envelope<D: DeserializeOwned>(response: &RawResponse) -> Result<ApiEnvelope<D>, ApiError> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ApiEnvelope {
            status_code: Some(response.status),
            success: Some(true),
            message: None,
            data: None,
        });
    }
    serde_json::from_slice(&response.body).map_err(|e| ApiError::decode(e.to_string()))
}
