//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode to RGB with EXIF orientation applied
//! - [`decode_image_with_alpha`] - Decode keeping the alpha channel
//! - [`get_orientation`] - Read the EXIF orientation tag (1-8)
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@pixkit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::{to_js_error, JsPixelBuffer};
use pixkit_core::decode;
use pixkit_core::ToolkitError;
use wasm_bindgen::prelude::*;

/// Decode an image from bytes into a 3-channel buffer.
///
/// The EXIF orientation is applied, so pixel (0, 0) is the visual top-left.
///
/// # Errors
///
/// Returns a `decode_error` if the bytes are not a supported raster format.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    decode::decode(bytes)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| to_js_error(ToolkitError::from(e)))
}

/// Decode an image keeping its alpha channel.
///
/// Returns 4 channels for sources with alpha or grayscale sources, otherwise 3.
#[wasm_bindgen]
pub fn decode_image_with_alpha(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    decode::decode_preserving_alpha(bytes)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| to_js_error(ToolkitError::from(e)))
}

/// EXIF orientation value; 1 (normal) when the tag is missing.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_invalid() {
        let err = decode_image(&[0, 1, 2, 3]).err().unwrap();
        assert!(err.as_string().unwrap().starts_with("decode_error"));
    }

    #[wasm_bindgen_test]
    fn test_decode_empty() {
        assert!(decode_image(&[]).is_err());
        assert!(decode_image_with_alpha(&[]).is_err());
    }
}
