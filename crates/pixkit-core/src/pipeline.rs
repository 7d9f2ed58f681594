//! Byte-in, byte-out operations.
//!
//! Each function decodes its input, runs one short chain of transforms and
//! returns PNG bytes. Nothing is shared between calls.

use tracing::{debug, instrument};

use crate::adjustments::{adjust_brightness, adjust_contrast};
use crate::color::{simulate_color_blindness, ColorBlindMode};
use crate::composite::{composite, OverlaySpec, DEFAULT_OPACITY};
use crate::decode::{decode, decode_preserving_alpha, PixelBuffer};
use crate::encode::encode_png;
use crate::error::Result;
use crate::geometry::{NormalizedPoint, Quadrilateral};
use crate::scan::apply_scan_effect;
use crate::transform::{rectify, rotate, OrderedCorners};

/// Simulate a color-vision deficiency, then rotate by `rotation` degrees.
///
/// # Errors
///
/// `UnsupportedMode` for a mode other than `red_green` or `blue_green`,
/// `Decode` for unreadable input.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn process_color_blind(bytes: &[u8], mode: &str, rotation: f64) -> Result<Vec<u8>> {
    let mode: ColorBlindMode = mode.parse()?;
    let image = decode(bytes)?;
    let simulated = simulate_color_blindness(&image, mode);
    finish(rotate(&simulated, rotation))
}

/// Rectify a document selection, apply the scan look, then rotate.
///
/// # Errors
///
/// `DegenerateSelection` when the selection encloses no usable area,
/// `Decode` for unreadable input.
#[instrument(skip(bytes, selection), fields(len = bytes.len()))]
pub fn process_document_scan(
    bytes: &[u8],
    selection: &Quadrilateral,
    rotation: f64,
) -> Result<Vec<u8>> {
    let image = decode(bytes)?;
    let corners = OrderedCorners::from_quadrilateral(selection, image.width, image.height);
    debug!(?corners, "Corners ordered");

    let rectified = rectify(&image, &corners)?;
    let scanned = apply_scan_effect(&rectified)?;
    finish(rotate(&scanned, rotation))
}

/// [`process_document_scan`] with the corners given as a JSON array of
/// `{"x": .., "y": ..}` objects.
///
/// # Errors
///
/// `InvalidSelection` for malformed JSON or a point count other than 4.
#[instrument(skip(bytes, payload), fields(len = bytes.len()))]
pub fn process_document_scan_json(bytes: &[u8], payload: &str, rotation: f64) -> Result<Vec<u8>> {
    let selection = Quadrilateral::from_json(payload)?;
    process_document_scan(bytes, &selection, rotation)
}

/// Rotate by `angle` degrees, counter-clockwise, expanding the canvas.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn process_rotation(bytes: &[u8], angle: f64) -> Result<Vec<u8>> {
    let image = decode(bytes)?;
    finish(rotate(&image, angle))
}

/// Add `brightness` (clamped to [-100, 100]) to every color sample.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn process_brightness(bytes: &[u8], brightness: f64) -> Result<Vec<u8>> {
    let image = decode(bytes)?;
    finish(adjust_brightness(&image, brightness))
}

/// Scale every color sample by `1 + contrast` (gain clamped to [0.05, 4]).
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn process_contrast(bytes: &[u8], contrast: f64) -> Result<Vec<u8>> {
    let image = decode(bytes)?;
    finish(adjust_contrast(&image, contrast))
}

/// Composite `overlay` onto `base` centred at `anchor`.
///
/// `opacity` applies only to overlays without alpha and defaults to
/// [`DEFAULT_OPACITY`].
///
/// # Errors
///
/// `InvalidOverlay` for an overlay with no pixels, `Decode` if either input
/// is unreadable.
#[instrument(skip(base, overlay), fields(base_len = base.len(), overlay_len = overlay.len()))]
pub fn process_watermark(
    base: &[u8],
    overlay: &[u8],
    anchor: NormalizedPoint,
    opacity: Option<f64>,
) -> Result<Vec<u8>> {
    let mut image = decode(base)?;
    let overlay = decode_preserving_alpha(overlay)?;

    let spec = OverlaySpec::new(overlay, anchor).with_opacity(opacity.unwrap_or(DEFAULT_OPACITY));
    composite(&mut image, &spec)?;
    finish(image)
}

fn finish(image: PixelBuffer) -> Result<Vec<u8>> {
    let bytes = encode_png(&image)?;
    debug!(
        width = image.width,
        height = image.height,
        encoded = bytes.len(),
        "Result encoded"
    );
    Ok(bytes)
}
