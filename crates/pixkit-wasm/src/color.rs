//! Color-vision deficiency simulation bindings.

use crate::types::{to_js_error, JsPixelBuffer};
use pixkit_core::color::{simulate_color_blindness, ColorBlindMode};
use pixkit_core::ToolkitError;
use wasm_bindgen::prelude::*;

/// Simulate how an image looks with a color-vision deficiency.
///
/// `mode` is `"red_green"` or `"blue_green"`. The result always has 3
/// channels unless the input had alpha, which is kept.
///
/// # Errors
///
/// Returns an `unsupported_mode` error for any other mode name.
#[wasm_bindgen]
pub fn simulate_color_vision(image: &JsPixelBuffer, mode: &str) -> Result<JsPixelBuffer, JsValue> {
    simulate(image, mode).map_err(to_js_error)
}

/// Names accepted by [`simulate_color_vision`].
#[wasm_bindgen]
pub fn color_vision_modes() -> Vec<String> {
    ColorBlindMode::ALL
        .iter()
        .map(|m| m.as_str().to_string())
        .collect()
}

fn simulate(image: &JsPixelBuffer, mode: &str) -> Result<JsPixelBuffer, ToolkitError> {
    let mode: ColorBlindMode = mode.parse()?;
    let src = image.to_buffer()?;
    Ok(JsPixelBuffer::from_buffer(simulate_color_blindness(&src, mode)))
}
