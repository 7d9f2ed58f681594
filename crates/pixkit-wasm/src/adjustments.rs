//! Tone adjustment WASM bindings.
//!
//! Out-of-range values are clamped by the core, never rejected: brightness
//! to [-100, 100] and the contrast gain `1 + contrast` to [0.05, 4].

use crate::types::{to_js_error, JsPixelBuffer};
use pixkit_core::adjustments;
use wasm_bindgen::prelude::*;

/// Add `brightness` to every color sample.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const brighter = adjust_brightness(image, 40);
/// ```
#[wasm_bindgen]
pub fn adjust_brightness(image: &JsPixelBuffer, brightness: f64) -> Result<JsPixelBuffer, JsValue> {
    let src = image.to_buffer().map_err(to_js_error)?;
    Ok(JsPixelBuffer::from_buffer(adjustments::adjust_brightness(
        &src, brightness,
    )))
}

/// Multiply every color sample by `1 + contrast`.
#[wasm_bindgen]
pub fn adjust_contrast(image: &JsPixelBuffer, contrast: f64) -> Result<JsPixelBuffer, JsValue> {
    let src = image.to_buffer().map_err(to_js_error)?;
    Ok(JsPixelBuffer::from_buffer(adjustments::adjust_contrast(
        &src, contrast,
    )))
}
