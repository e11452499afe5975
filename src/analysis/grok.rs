//! Grok (xAI) image analyzer.

use crate::analysis::request::AnalysisRequest;
use crate::analysis::response::extract_analysis;
use crate::analysis::transport::{HttpTransport, Transport, DEFAULT_TIMEOUT};
use crate::analysis::types::{AnalysisMetadata, AnalysisOptions, AnalysisResult};
use crate::credentials::{resolve_credentials, ConfigSource, EnvConfig};
use crate::error::Result;
use crate::raster::{encode_data_uri, ImageBuffer};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Builder for GrokAnalyzer.
#[derive(Clone)]
pub struct GrokAnalyzerBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Duration,
    config: Option<Arc<dyn ConfigSource>>,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for GrokAnalyzerBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            config: None,
            transport: None,
        }
    }
}

impl GrokAnalyzerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `XAI_API_KEY` on every call.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the base URL. Falls back to `XAI_BASE_URL`, then the xAI endpoint.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the round-trip timeout (default: 60s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the process environment as the fallback configuration.
    pub fn config(mut self, config: impl ConfigSource + 'static) -> Self {
        self.config = Some(Arc::new(config));
        self
    }

    /// Replaces the HTTP transport. The timeout setting is then unused.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the analyzer. Credentials are resolved per call, not here.
    pub fn build(self) -> Result<GrokAnalyzer> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(self.timeout)?),
        };

        Ok(GrokAnalyzer {
            api_key: self.api_key,
            base_url: self.base_url,
            config: self.config.unwrap_or_else(|| Arc::new(EnvConfig)),
            transport,
        })
    }
}

/// Describes images through the Grok chat completions API.
pub struct GrokAnalyzer {
    api_key: Option<String>,
    base_url: Option<String>,
    config: Arc<dyn ConfigSource>,
    transport: Arc<dyn Transport>,
}

impl GrokAnalyzer {
    /// Creates a new `GrokAnalyzerBuilder`.
    pub fn builder() -> GrokAnalyzerBuilder {
        GrokAnalyzerBuilder::new()
    }

    /// Analyzes `image` and returns the generated prompt.
    ///
    /// Credentials are resolved before anything else, so a missing key never
    /// reaches the network. Only the first frame of a batch is sent.
    pub async fn analyze(
        &self,
        image: &ImageBuffer,
        options: &AnalysisOptions,
    ) -> Result<AnalysisResult> {
        let start = Instant::now();

        let credentials = resolve_credentials(
            self.api_key.as_deref(),
            self.base_url.as_deref(),
            self.config.as_ref(),
        )?;

        let image_data_uri = encode_data_uri(image)?;
        let request = AnalysisRequest::from_options(options, image_data_uri);

        let body = self.transport.send(&credentials, &request).await?;
        let extracted = extract_analysis(&body)?;

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            model = %request.model,
            chars = extracted.content.len(),
            duration_ms,
            "image analysis complete"
        );
        tracing::debug!(prompt = %extracted.content, "generated prompt");

        Ok(AnalysisResult {
            prompt: extracted.content,
            metadata: AnalysisMetadata {
                model: extracted.model.or(Some(request.model)),
                finish_reason: extracted.finish_reason,
                usage: extracted.usage,
                duration_ms: Some(duration_ms),
            },
        })
    }
}
