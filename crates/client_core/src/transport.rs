use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::ApiErrorBody,
    protocol::{RecommendationRequest, RecommendationResult},
};
use thiserror::Error;
use tracing::debug;

/// Generic message shown when the service cannot be reached or returns
/// something unintelligible. Server-supplied `detail` text takes
/// precedence over this whenever it is present.
pub const NETWORK_FAILURE_MESSAGE: &str = "Unable to reach the recommendation service";

#[derive(Debug, Error)]
pub enum BackendError {
    /// Non-2xx response carrying a well-formed `{"detail": ...}` body.
    #[error("service rejected the request ({status}): {detail}")]
    Service { status: u16, detail: String },
    /// Non-2xx response whose body was not a recognizable error body.
    #[error("service returned unexpected status {0}")]
    Status(u16),
    #[error("request transport failed")]
    Transport(#[source] reqwest::Error),
    #[error("service returned a malformed response body")]
    InvalidResponse(#[source] reqwest::Error),
}

impl BackendError {
    /// The message surfaced via `SearchState::Failed`: the server's
    /// `detail` verbatim when one was supplied, otherwise the generic
    /// network-failure message.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Service { detail, .. } => detail.clone(),
            BackendError::Status(_) | BackendError::Transport(_) | BackendError::InvalidResponse(_) => {
                NETWORK_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

#[async_trait]
pub trait RecommendationBackend: Send + Sync {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResult, BackendError>;
}

/// The real transport: one JSON POST to `/api/recommendations` per
/// call, no retries.
pub struct HttpRecommendationBackend {
    http: Client,
    server_url: String,
    timeout: Option<Duration>,
}

impl HttpRecommendationBackend {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_url: server_url.into(),
            timeout: None,
        }
    }

    /// Optional hardening: bounds how long a single request may stay in
    /// flight. Without it a transport that never resolves leaves the
    /// session loading indefinitely.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl RecommendationBackend for HttpRecommendationBackend {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResult, BackendError> {
        let mut builder = self
            .http
            .post(format!("{}/api/recommendations", self.server_url))
            .json(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(BackendError::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return match response.json::<ApiErrorBody>().await {
                Ok(body) => Err(BackendError::Service {
                    status: status.as_u16(),
                    detail: body.detail,
                }),
                Err(err) => {
                    debug!(status = status.as_u16(), error = %err, "search: error body not parseable");
                    Err(BackendError::Status(status.as_u16()))
                }
            };
        }

        response
            .json::<RecommendationResult>()
            .await
            .map_err(BackendError::InvalidResponse)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
