//! HTTP transport for chat completion calls.

use crate::analysis::request::AnalysisRequest;
use crate::credentials::Credentials;
use crate::error::{sanitize_error_message, Result, VisionError};
use async_trait::async_trait;
use std::time::Duration;

/// Default upper bound on one round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Sends an analysis request and returns the raw 2xx response body.
///
/// Implementations make exactly one attempt.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Posts `request` to the chat completions endpoint of `credentials`.
    async fn send(&self, credentials: &Credentials, request: &AnalysisRequest) -> Result<String>;
}

/// `reqwest`-backed transport with a fixed timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Creates a transport whose calls fail with [`VisionError::Timeout`]
    /// after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| VisionError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, timeout })
    }

    /// Returns the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, err: reqwest::Error) -> VisionError {
        if err.is_timeout() {
            VisionError::Timeout(self.timeout)
        } else {
            VisionError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, credentials: &Credentials, request: &AnalysisRequest) -> Result<String> {
        let url = credentials.chat_completions_url();
        tracing::debug!(url = %url, model = %request.model, "posting analysis request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", credentials.api_key()))
            .header("Content-Type", "application/json")
            .json(&request.payload())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "analysis request rejected");
            return Err(VisionError::Api {
                status: status.as_u16(),
                message: sanitize_error_message(&text),
            });
        }

        Ok(text)
    }
}
