//! Image encoding WASM bindings.
//!
//! Every Pixkit result is returned as PNG, so this is the only encoder.
//!
//! ```typescript
//! import { encode_png } from '@pixkit/wasm';
//!
//! const pngBytes = encode_png(image);
//! const blob = new Blob([pngBytes], { type: 'image/png' });
//! ```

use crate::types::{to_js_error, JsPixelBuffer};
use pixkit_core::{encode, ToolkitError};
use wasm_bindgen::prelude::*;

/// Encode a buffer to PNG bytes.
///
/// # Errors
///
/// Returns an error if the pixel data does not match the dimensions or a
/// dimension is zero.
#[wasm_bindgen]
pub fn encode_png(image: &JsPixelBuffer) -> Result<Vec<u8>, JsValue> {
    encode_bytes(image).map_err(to_js_error)
}

fn encode_bytes(image: &JsPixelBuffer) -> Result<Vec<u8>, ToolkitError> {
    let buffer = image.to_buffer()?;
    Ok(encode::encode_png(&buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixkit_core::decode::decode_preserving_alpha;

    #[test]
    fn test_encode_produces_png() {
        let img = JsPixelBuffer::new(3, 2, 3, vec![200u8; 18]);
        let bytes = encode_bytes(&img).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_keeps_alpha() {
        let pixels = vec![10, 20, 30, 40, 50, 60, 70, 80];
        let img = JsPixelBuffer::new(2, 1, 4, pixels.clone());
        let decoded = decode_preserving_alpha(&encode_bytes(&img).unwrap()).unwrap();
        assert_eq!(decoded.pixels, pixels);
    }

    #[test]
    fn test_encode_errors() {
        let empty = JsPixelBuffer::new(0, 0, 3, vec![]);
        assert_eq!(encode_bytes(&empty).unwrap_err().kind(), "encode_error");

        let short = JsPixelBuffer::new(4, 4, 3, vec![0u8; 10]);
        assert_eq!(encode_bytes(&short).unwrap_err().kind(), "processing_error");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_png_error_is_string() {
        let err = encode_png(&JsPixelBuffer::new(0, 0, 3, vec![])).err().unwrap();
        assert!(err.as_string().unwrap().starts_with("encode_error"));
    }
}
