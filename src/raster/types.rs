//! Pixel buffers and image formats.

use crate::error::{Result, VisionError};
use serde::{Deserialize, Serialize};

/// Image formats accepted by the Grok vision API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG format (lossless). Always used for encoded uploads.
    #[default]
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format.
    WebP,
    /// GIF format.
    Gif,
}

impl ImageFormat {
    /// All accepted formats.
    pub const ALL: [ImageFormat; 4] = [Self::Png, Self::Jpeg, Self::WebP, Self::Gif];

    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
            Self::Gif => "gif",
        }
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    /// Attempts to detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(Self::Gif);
        }

        None
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Raw pixel storage.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    /// 8-bit values in 0..=255.
    U8(Vec<u8>),
    /// Floating-point values, normalized to 0.0..=1.0 or on a 0..=255 scale.
    F32(Vec<f32>),
}

impl PixelData {
    /// Number of stored values.
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::F32(v) => v.len(),
        }
    }

    /// Returns true if no values are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An in-memory raster laid out as frames × height × width × channels.
///
/// Shape is checked against the data length on construction. Channel count
/// and non-emptiness are checked by the codec.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    frames: usize,
    height: usize,
    width: usize,
    channels: usize,
    data: PixelData,
}

impl ImageBuffer {
    /// Creates a buffer from interleaved pixel data.
    pub fn new(
        frames: usize,
        height: usize,
        width: usize,
        channels: usize,
        data: PixelData,
    ) -> Result<Self> {
        let expected = frames
            .checked_mul(height)
            .and_then(|n| n.checked_mul(width))
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| VisionError::Encoding("image dimensions overflow".into()))?;

        if data.len() != expected {
            return Err(VisionError::Encoding(format!(
                "pixel data has {} values, shape {frames}x{height}x{width}x{channels} needs {expected}",
                data.len()
            )));
        }

        Ok(Self {
            frames,
            height,
            width,
            channels,
            data,
        })
    }

    /// Creates a single-frame buffer from 8-bit values.
    pub fn from_u8(height: usize, width: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        Self::new(1, height, width, channels, PixelData::U8(data))
    }

    /// Creates a single-frame buffer from floating-point values.
    pub fn from_f32(height: usize, width: usize, channels: usize, data: Vec<f32>) -> Result<Self> {
        Self::new(1, height, width, channels, PixelData::F32(data))
    }

    /// Creates a single-frame RGB buffer filled with one color.
    pub fn solid_rgb(height: usize, width: usize, rgb: [u8; 3]) -> Self {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(height * width * 3)
            .collect();
        Self {
            frames: 1,
            height,
            width,
            channels: 3,
            data: PixelData::U8(data),
        }
    }

    /// Converts a decoded image, keeping alpha when present.
    pub fn from_dynamic_image(image: &::image::DynamicImage) -> Self {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let (channels, data) = if image.color().has_alpha() {
            (4, image.to_rgba8().into_raw())
        } else {
            (3, image.to_rgb8().into_raw())
        };
        Self {
            frames: 1,
            height,
            width,
            channels,
            data: PixelData::U8(data),
        }
    }

    /// Number of frames in the batch.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Frame height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Frame width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Interleaved pixel data for all frames.
    pub fn data(&self) -> &PixelData {
        &self.data
    }

    /// Number of values in a single frame.
    pub fn frame_len(&self) -> usize {
        self.height * self.width * self.channels
    }
}
