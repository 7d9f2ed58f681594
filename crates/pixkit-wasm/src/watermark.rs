//! Watermark compositing bindings.

use crate::types::{to_js_error, JsPixelBuffer};
use pixkit_core::composite::{composite, OverlaySpec, DEFAULT_OPACITY};
use pixkit_core::geometry::NormalizedPoint;
use pixkit_core::ToolkitError;
use wasm_bindgen::prelude::*;

/// Blend `overlay` into `base`, centred on (`anchor_x`, `anchor_y`).
///
/// The anchor is normalized to [0, 1]. The overlay is shrunk to at most 30%
/// of the base in each dimension. Overlays with alpha blend by their alpha
/// channel; others use `opacity` (default 0.7). `base` is modified in place.
///
/// # Example (TypeScript)
///
/// ```typescript
/// apply_watermark(photo, logo, 0.9, 0.9, undefined);
/// ```
#[wasm_bindgen]
pub fn apply_watermark(
    base: &mut JsPixelBuffer,
    overlay: &JsPixelBuffer,
    anchor_x: f64,
    anchor_y: f64,
    opacity: Option<f64>,
) -> Result<(), JsValue> {
    watermark(base, overlay, NormalizedPoint::new(anchor_x, anchor_y), opacity).map_err(to_js_error)
}

fn watermark(
    base: &mut JsPixelBuffer,
    overlay: &JsPixelBuffer,
    anchor: NormalizedPoint,
    opacity: Option<f64>,
) -> Result<(), ToolkitError> {
    let mut target = base.to_buffer()?;
    let spec = OverlaySpec::new(overlay.to_buffer()?, anchor)
        .with_opacity(opacity.unwrap_or(DEFAULT_OPACITY));
    composite(&mut target, &spec)?;
    base.replace(target);
    Ok(())
}
