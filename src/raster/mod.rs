//! In-memory images and their upload encoding.

mod codec;
mod types;

pub use codec::{encode_data_uri, encode_png};
pub use types::{ImageBuffer, ImageFormat, PixelData};
