//! Core types for image analysis.

use serde::{Deserialize, Serialize};

/// Default system prompt.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert at creating detailed, descriptive prompts for image generation models. Provide rich, specific details.";

/// Default user prompt.
pub const DEFAULT_USER_PROMPT: &str = "Describe this image in detail for use as a prompt for an image generation model. Focus on composition, style, colors, and main subjects.";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default completion length limit.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Grok vision model variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GrokVisionModel {
    /// Grok 4.1 Fast without extended reasoning.
    #[default]
    Grok41FastNonReasoning,
}

impl GrokVisionModel {
    /// Returns the API model identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grok41FastNonReasoning => "grok-4-1-fast-non-reasoning",
        }
    }
}

impl std::fmt::Display for GrokVisionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-facing settings for one analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Model identifier, passed to the API verbatim.
    pub model: String,
    /// System instructions. `None` sends no system message.
    pub system_prompt: Option<String>,
    /// The question asked about the image.
    pub user_prompt: String,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Completion length limit.
    pub max_tokens: Option<u32>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            model: GrokVisionModel::default().as_str().to_string(),
            system_prompt: Some(DEFAULT_SYSTEM_PROMPT.to_string()),
            user_prompt: DEFAULT_USER_PROMPT.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
        }
    }
}

impl AnalysisOptions {
    /// Creates options with the default model and prompts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the user prompt.
    pub fn with_user_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.user_prompt = prompt.into();
        self
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sends no system message.
    pub fn without_system_prompt(mut self) -> Self {
        self.system_prompt = None;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the completion length limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Token accounting reported by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt, image included.
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Tokens generated.
    #[serde(default)]
    pub completion_tokens: u32,
    /// Sum of both.
    #[serde(default)]
    pub total_tokens: u32,
}

/// Metadata about the analysis call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Model reported by the API, or the requested one.
    pub model: Option<String>,
    /// Why generation stopped.
    pub finish_reason: Option<String>,
    /// Token usage, when reported.
    pub usage: Option<TokenUsage>,
    /// Round-trip duration in milliseconds.
    pub duration_ms: Option<u64>,
}

/// A generated prompt and its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use = "the generated prompt should be used"]
pub struct AnalysisResult {
    /// Generated description. Never empty.
    pub prompt: String,
    /// Call metadata.
    pub metadata: AnalysisMetadata,
}
