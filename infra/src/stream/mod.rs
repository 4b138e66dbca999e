//! Dashboard statistics stream
//!
//! Each dashboard view opens one server-sent event channel for its role.
//! Every `data:` frame carries a full statistics snapshot which replaces the
//! previous one. The channel is not resumed: a transport error, a non-2xx
//! answer or an undecodable frame ends it, and dropping the
//! [`DashboardStream`] tears the connection down.

mod parser;

use futures_util::StreamExt;
use lms_core::domain::{DashboardRole, DashboardSnapshot};
use lms_shared::StreamConfig;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

use crate::http::ReqwestTransport;

pub use parser::{SseEvent, SseParser};

/// Snapshots buffered between the reader task and the consumer
const CHANNEL_CAPACITY: usize = 16;

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Failed to open stream: {0}")]
    Connect(#[from] reqwest::Error),

    #[error("Stream rejected with status {0}")]
    Status(u16),

    #[error("Invalid stream URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Path of the stream feeding a dashboard
pub fn stream_path(config: &StreamConfig, role: DashboardRole) -> &str {
    match role {
        DashboardRole::Admin => &config.admin_path,
        DashboardRole::Instructor => &config.instructor_path,
        DashboardRole::Student => &config.student_path,
    }
}

/// Live statistics feed for one dashboard
#[derive(Debug)]
pub struct DashboardStream {
    role: DashboardRole,
    receiver: mpsc::Receiver<DashboardSnapshot>,
    reader: JoinHandle<()>,
}

impl DashboardStream {
    /// Open the stream for `role` with the transport's cookies
    pub async fn open(
        transport: &ReqwestTransport,
        config: &StreamConfig,
        role: DashboardRole,
    ) -> Result<Self, StreamError> {
        let url = transport.url_for(stream_path(config, role))?;
        Self::connect(transport.client(), url, role).await
    }

    pub async fn connect(client: Client, url: Url, role: DashboardRole) -> Result<Self, StreamError> {
        let response = client
            .get(url.clone())
            .header(ACCEPT, "text/event-stream")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Dashboard stream rejected");
            return Err(StreamError::Status(status.as_u16()));
        }
        info!(%url, %role, "Dashboard stream opened");

        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        let reader = tokio::spawn(async move {
            let mut parser = SseParser::new();
            let mut body = response.bytes_stream();

            while let Some(chunk) = body.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        warn!(%role, error = %e, "Dashboard stream failed, closing");
                        return;
                    }
                };
                for event in parser.feed(&chunk) {
                    let payload: Value = match event.json() {
                        Ok(payload) => payload,
                        Err(e) => {
                            warn!(%role, error = %e, "Undecodable dashboard frame, closing");
                            return;
                        }
                    };
                    debug!(%role, "Dashboard snapshot received");
                    if sender.send(DashboardSnapshot::new(role, payload)).await.is_err() {
                        return;
                    }
                }
            }
            info!(%role, "Dashboard stream ended");
        });

        Ok(Self {
            role,
            receiver,
            reader,
        })
    }

    pub fn role(&self) -> DashboardRole {
        self.role
    }

    /// Next snapshot, or `None` once the channel has closed
    pub async fn next(&mut self) -> Option<DashboardSnapshot> {
        self.receiver.recv().await
    }

    /// Whether the reader has stopped
    pub fn is_closed(&self) -> bool {
        self.reader.is_finished()
    }
}

impl Drop for DashboardStream {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
