//! PNG data URI encoding.

use crate::error::{Result, VisionError};
use crate::raster::types::{ImageBuffer, ImageFormat, PixelData};
use base64::Engine;

/// Encodes the first frame of `image` as a `data:image/png;base64,...` URI.
///
/// Batches are never merged: only frame 0 is sent.
pub fn encode_data_uri(image: &ImageBuffer) -> Result<String> {
    let png = encode_png(image)?;
    Ok(format!(
        "data:{};base64,{}",
        ImageFormat::Png.mime_type(),
        base64::engine::general_purpose::STANDARD.encode(&png)
    ))
}

/// Encodes the first frame of `image` as 8-bit RGB PNG bytes.
pub fn encode_png(image: &ImageBuffer) -> Result<Vec<u8>> {
    let rgb = first_frame_rgb8(image)?;

    let width = u32::try_from(image.width())
        .map_err(|_| VisionError::Encoding("image width exceeds u32".into()))?;
    let height = u32::try_from(image.height())
        .map_err(|_| VisionError::Encoding("image height exceeds u32".into()))?;

    let buffer = ::image::RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| VisionError::Encoding("pixel buffer does not match dimensions".into()))?;

    let mut png = Vec::new();
    buffer
        .write_to(&mut std::io::Cursor::new(&mut png), ::image::ImageFormat::Png)
        .map_err(|e| VisionError::Encoding(format!("PNG encoding failed: {e}")))?;
    Ok(png)
}

fn first_frame_rgb8(image: &ImageBuffer) -> Result<Vec<u8>> {
    if image.frames() == 0 || image.height() == 0 || image.width() == 0 {
        return Err(VisionError::Encoding(format!(
            "image has no pixels ({} frames, {}x{})",
            image.frames(),
            image.width(),
            image.height()
        )));
    }

    let channels = image.channels();
    if !matches!(channels, 1 | 3 | 4) {
        return Err(VisionError::Encoding(format!(
            "unsupported channel count {channels}, expected 1, 3 or 4"
        )));
    }

    if image.frames() > 1 {
        tracing::debug!(
            frames = image.frames(),
            "batched input, encoding first frame only"
        );
    }

    let len = image.frame_len();
    let bytes = match image.data() {
        PixelData::U8(data) => data[..len].to_vec(),
        PixelData::F32(data) => floats_to_u8(&data[..len]),
    };

    Ok(match channels {
        3 => bytes,
        4 => bytes
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect(),
        _ => bytes.iter().flat_map(|&v| [v, v, v]).collect(),
    })
}

/// Values already on a 0..=255 scale are detected by the frame maximum and
/// are not scaled again.
fn floats_to_u8(values: &[f32]) -> Vec<u8> {
    let max = values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(f32::NEG_INFINITY, f32::max);
    let scale = if max <= 1.0 { 255.0 } else { 1.0 };

    values
        .iter()
        .map(|&v| {
            if v.is_nan() {
                0
            } else {
                (v * scale).round().clamp(0.0, 255.0) as u8
            }
        })
        .collect()
}
