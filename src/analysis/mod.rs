//! Image analysis through the Grok chat completions API.

mod grok;
mod request;
mod response;
mod transport;
mod types;

pub use grok::{GrokAnalyzer, GrokAnalyzerBuilder};
pub use request::{AnalysisRequest, ChatCompletionRequest};
pub use response::{extract_analysis, ExtractedAnalysis};
pub use transport::{HttpTransport, Transport, DEFAULT_TIMEOUT};
pub use types::{
    AnalysisMetadata, AnalysisOptions, AnalysisResult, GrokVisionModel, TokenUsage,
    DEFAULT_MAX_TOKENS, DEFAULT_SYSTEM_PROMPT, DEFAULT_TEMPERATURE, DEFAULT_USER_PROMPT,
};
