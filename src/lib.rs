#![warn(missing_docs)]
//! GrokVision - turn images into generation-ready prompts.
//!
//! This crate sends an in-memory image and a pair of prompts to the xAI
//! (Grok) vision API and returns the generated description, ready to feed an
//! image generation model.
//!
//! # Quick Start
//!
//! ```no_run
//! use grokvision::{AnalysisOptions, GrokAnalyzer, ImageBuffer};
//!
//! #[tokio::main]
//! async fn main() -> grokvision::Result<()> {
//!     let analyzer = GrokAnalyzer::builder().build()?;
//!     let image = ImageBuffer::solid_rgb(64, 64, [128, 128, 128]);
//!     let result = analyzer.analyze(&image, &AnalysisOptions::default()).await?;
//!     println!("{}", result.prompt);
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! - `XAI_API_KEY`: API key used when none is passed explicitly.
//! - `XAI_BASE_URL`: API base URL (default `https://api.x.ai/v1`).
//!
//! Both are read on every call, never cached.
//!
//! # Features
//!
//! - `cli`: the `grokvision` command-line interface

pub mod analysis;
pub mod credentials;
mod error;
pub mod raster;

pub use analysis::{
    AnalysisMetadata, AnalysisOptions, AnalysisRequest, AnalysisResult, GrokAnalyzer,
    GrokAnalyzerBuilder, GrokVisionModel, HttpTransport, Transport,
};
pub use credentials::{ConfigSource, Credentials, EnvConfig, StaticConfig};
pub use error::{Result, VisionError};
pub use raster::{ImageBuffer, ImageFormat, PixelData};

fn options_from_inputs(model: &str, user_prompt: &str, system_prompt: &str) -> AnalysisOptions {
    let mut options = AnalysisOptions::default();
    if !model.trim().is_empty() {
        options = options.with_model(model.trim());
    }
    if !user_prompt.trim().is_empty() {
        options = options.with_user_prompt(user_prompt);
    }
    if !system_prompt.trim().is_empty() {
        options = options.with_system_prompt(system_prompt);
    }
    options
}

/// Analyzes `image` and returns the generated prompt.
///
/// Empty arguments select defaults: an empty `api_key` falls back to
/// `XAI_API_KEY`, an empty `model` to `grok-4-1-fast-non-reasoning`, and
/// empty prompts to the built-in prompt-writing instructions.
pub async fn analyze(
    image: &ImageBuffer,
    api_key: &str,
    model: &str,
    user_prompt: &str,
    system_prompt: &str,
) -> Result<String> {
    let analyzer = GrokAnalyzer::builder().api_key(api_key).build()?;
    let options = options_from_inputs(model, user_prompt, system_prompt);
    Ok(analyzer.analyze(image, &options).await?.prompt)
}

/// Blocking form of [`analyze`] for synchronous hosts.
///
/// Drives the call on a private runtime, so it must not be called from
/// within an async context.
pub fn analyze_blocking(
    image: &ImageBuffer,
    api_key: &str,
    model: &str,
    user_prompt: &str,
    system_prompt: &str,
) -> Result<String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(analyze(image, api_key, model, user_prompt, system_prompt))
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, AnalysisResult, GrokAnalyzer};
    pub use crate::error::{Result, VisionError};
    pub use crate::raster::ImageBuffer;
}
