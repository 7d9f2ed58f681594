//! WASM bindings for geometric operations.
//!
//! Rotation with canvas expansion and document scanning from four corner
//! points.

use crate::types::{to_js_error, JsPixelBuffer};
use pixkit_core::geometry::{NormalizedPoint, Quadrilateral};
use pixkit_core::transform::{compute_rotated_bounds, rectify, rotate, OrderedCorners};
use pixkit_core::{apply_scan_effect, ToolkitError};
use wasm_bindgen::prelude::*;

/// Rotate an image around its center.
///
/// Positive angles are counter-clockwise. The canvas grows to fit the whole
/// rotated image and uncovered areas repeat the nearest edge pixel.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = rotate_image(sourceImage, 15.0);
/// ```
#[wasm_bindgen]
pub fn rotate_image(image: &JsPixelBuffer, angle_degrees: f64) -> Result<JsPixelBuffer, JsValue> {
    let src = image.to_buffer().map_err(to_js_error)?;
    Ok(JsPixelBuffer::from_buffer(rotate(&src, angle_degrees)))
}

/// Canvas size after rotating a `width` x `height` image, as `[w, h]`.
#[wasm_bindgen]
pub fn rotated_size(width: u32, height: u32, angle_degrees: f64) -> Vec<u32> {
    let (w, h) = compute_rotated_bounds(width, height, angle_degrees);
    vec![w, h]
}

/// Rectify the region inside four corners and apply the scan look.
///
/// `points` is an array of exactly four `{x, y}` objects in [0, 1], in any
/// order. The result is rotated by `rotation` degrees afterwards.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const page = scan_document(photo, [
///   { x: 0.1, y: 0.05 }, { x: 0.9, y: 0.08 },
///   { x: 0.92, y: 0.95 }, { x: 0.07, y: 0.9 },
/// ], 0);
/// ```
#[wasm_bindgen]
pub fn scan_document(
    image: &JsPixelBuffer,
    points: JsValue,
    rotation: f64,
) -> Result<JsPixelBuffer, JsValue> {
    let points: Vec<NormalizedPoint> = serde_wasm_bindgen::from_value(points).map_err(|e| {
        to_js_error(ToolkitError::InvalidSelection(format!(
            "malformed points payload: {e}"
        )))
    })?;
    scan_with_points(image, &points, rotation).map_err(to_js_error)
}

pub(crate) fn scan_with_points(
    image: &JsPixelBuffer,
    points: &[NormalizedPoint],
    rotation: f64,
) -> Result<JsPixelBuffer, ToolkitError> {
    let selection = Quadrilateral::from_points(points)?;
    let src = image.to_buffer()?;

    let corners = OrderedCorners::from_quadrilateral(&selection, src.width, src.height);
    let rectified = rectify(&src, &corners)?;
    let scanned = apply_scan_effect(&rectified)?;
    Ok(JsPixelBuffer::from_buffer(rotate(&scanned, rotation)))
}
