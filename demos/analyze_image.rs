//! Basic image analysis example.
//!
//! Run with: `cargo run --example analyze_image`
//!
//! Requires `XAI_API_KEY` environment variable.

use grokvision::{AnalysisOptions, GrokAnalyzer, ImageBuffer};

#[tokio::main]
async fn main() -> grokvision::Result<()> {
    let analyzer = GrokAnalyzer::builder().build()?;

    let image = ImageBuffer::solid_rgb(64, 64, [128, 128, 128]);
    let options = AnalysisOptions::new().with_user_prompt("Describe this image.");
    let result = analyzer.analyze(&image, &options).await?;

    println!("{}", result.prompt);
    println!(
        "model: {:?}, duration: {:?}ms",
        result.metadata.model, result.metadata.duration_ms
    );

    Ok(())
}
