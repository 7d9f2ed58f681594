//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Pixkit types,
//! handling the conversion between Rust and JavaScript data representations.

use pixkit_core::{ChannelLayout, PixelBuffer, ToolkitError};
use wasm_bindgen::prelude::*;

/// An image buffer wrapper for JavaScript.
///
/// Pixels are row-major 8-bit samples in R, G, B (then A) order. `channels`
/// is 1 for grayscale, 3 for RGB or 4 for RGBA.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`. Keep images in WASM memory between
/// operations and only extract pixels when you need to draw them.
#[wasm_bindgen]
#[derive(Debug)]
pub struct JsPixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a new buffer from dimensions, channel count and pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> JsPixelBuffer {
        JsPixelBuffer {
            width,
            height,
            channels,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel.
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Get the number of bytes in the pixel buffer.
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {}
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            width: buffer.width,
            height: buffer.height,
            channels: buffer.channels() as u8,
            pixels: buffer.pixels,
        }
    }

    /// Convert back to a core buffer, checking the channel count and length.
    ///
    /// Note: This clones the pixel data.
    pub(crate) fn to_buffer(&self) -> Result<PixelBuffer, ToolkitError> {
        let layout = layout_from_channels(self.channels).ok_or_else(|| {
            ToolkitError::Processing(format!("unsupported channel count {}", self.channels))
        })?;

        let expected = self.width as usize * self.height as usize * layout.channels();
        if self.pixels.len() != expected {
            return Err(ToolkitError::Processing(format!(
                "expected {} bytes for {}x{}x{}, got {}",
                expected,
                self.width,
                self.height,
                self.channels,
                self.pixels.len()
            )));
        }

        Ok(PixelBuffer::new(
            self.width,
            self.height,
            layout,
            self.pixels.clone(),
        ))
    }

    /// Replace this buffer's contents in place.
    pub(crate) fn replace(&mut self, buffer: PixelBuffer) {
        *self = Self::from_buffer(buffer);
    }
}

pub(crate) fn layout_from_channels(channels: u8) -> Option<ChannelLayout> {
    match channels {
        1 => Some(ChannelLayout::Luma),
        3 => Some(ChannelLayout::Rgb),
        4 => Some(ChannelLayout::Rgba),
        _ => None,
    }
}

/// Map a core error onto a JavaScript string of the form `kind: message`.
pub(crate) fn to_js_error(err: ToolkitError) -> JsValue {
    JsValue::from_str(&format!("{}: {}", err.kind(), err))
}
