//! PNG encoding using the `image` crate's PNG encoder.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::decode::{ChannelLayout, PixelBuffer};

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode a pixel buffer to PNG bytes.
///
/// Luma buffers become 8-bit grayscale PNGs, RGB and RGBA buffers keep
/// their channels.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (buffer.width, buffer.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * buffer.channels();
    if buffer.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: buffer.pixels.len(),
        });
    }

    let color = match buffer.layout {
        ChannelLayout::Luma => ExtendedColorType::L8,
        ChannelLayout::Rgb => ExtendedColorType::Rgb8,
        ChannelLayout::Rgba => ExtendedColorType::Rgba8,
    };

    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(&buffer.pixels, width, height, color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
