//! CLI for GrokVision - image to prompt via the Grok vision API.

use clap::Parser;
use grokvision::analysis::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT};
use grokvision::{AnalysisOptions, GrokAnalyzer, GrokVisionModel, ImageBuffer, ImageFormat};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grokvision")]
#[command(about = "Describe an image as a generation-ready prompt using Grok (xAI)")]
#[command(version)]
struct Cli {
    /// Image to analyze (PNG, JPEG, WebP or GIF)
    image: PathBuf,

    /// xAI API key (falls back to XAI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// API base URL (falls back to XAI_BASE_URL, then https://api.x.ai/v1)
    #[arg(long)]
    base_url: Option<String>,

    /// Model identifier
    #[arg(short, long, default_value_t = GrokVisionModel::default().to_string())]
    model: String,

    /// User prompt sent with the image
    #[arg(short, long)]
    prompt: Option<String>,

    /// System prompt
    #[arg(long, conflicts_with = "no_system_prompt")]
    system_prompt: Option<String>,

    /// Send no system prompt
    #[arg(long)]
    no_system_prompt: bool,

    /// Sampling temperature
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// Maximum tokens to generate
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let image = load_image(&cli.image)?;

    let mut options = AnalysisOptions::new()
        .with_model(&cli.model)
        .with_temperature(cli.temperature)
        .with_max_tokens(cli.max_tokens);
    if let Some(prompt) = &cli.prompt {
        options = options.with_user_prompt(prompt);
    }
    if cli.no_system_prompt {
        options = options.without_system_prompt();
    } else if let Some(system) = &cli.system_prompt {
        options = options.with_system_prompt(system);
    }

    let mut builder = GrokAnalyzer::builder().timeout(Duration::from_secs(cli.timeout));
    if let Some(key) = cli.api_key {
        builder = builder.api_key(key);
    }
    if let Some(url) = cli.base_url {
        builder = builder.base_url(url);
    }
    let analyzer = builder.build()?;

    let result = match analyzer.analyze(&image, &options).await {
        Ok(result) => result,
        Err(e) => anyhow::bail!("{e}\nhint: {}", e.hint()),
    };

    if cli.json {
        let output = serde_json::json!({
            "success": true,
            "image": cli.image.display().to_string(),
            "prompt": result.prompt,
            "model": result.metadata.model,
            "finish_reason": result.metadata.finish_reason,
            "usage": result.metadata.usage,
            "duration_ms": result.metadata.duration_ms,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let rule = "=".repeat(80);
        println!("\n{rule}\nGENERATED PROMPT PREVIEW\n{rule}");
        println!("{}", result.prompt);
        println!("{rule}\n");
        if let Some(duration) = result.metadata.duration_ms {
            eprintln!("Duration: {}ms", duration);
        }
    }

    Ok(())
}

fn load_image(path: &Path) -> anyhow::Result<ImageBuffer> {
    let bytes = std::fs::read(path)?;
    let Some(format) = ImageFormat::from_magic_bytes(&bytes) else {
        let accepted: Vec<_> = ImageFormat::ALL.iter().map(|f| f.extension()).collect();
        anyhow::bail!(
            "{}: unsupported image format (accepted: {})",
            path.display(),
            accepted.join(", ")
        );
    };
    tracing::debug!(path = %path.display(), %format, "loading image");

    let decoded = image::load_from_memory(&bytes)?;
    Ok(ImageBuffer::from_dynamic_image(&decoded))
}
