//! Image rotation with canvas expansion.
//!
//! The rotation uses inverse mapping: for each pixel in the output image,
//! we calculate which source position it came from and interpolate there.
//!
//! For rotation by angle θ (positive = counter-clockwise) about the source
//! center `c`, with the output center `c'`, the inverse transform is:
//! ```text
//! src_x = (dst_x - c'x) * cos θ - (dst_y - c'y) * sin θ + cx
//! src_y = (dst_x - c'x) * sin θ + (dst_y - c'y) * cos θ + cy
//! ```

use tracing::debug;

use super::sample::sample_bilinear_replicate;
use crate::decode::PixelBuffer;

/// Compute the dimensions of the bounding box for a rotated image.
///
/// `new_w = h*|sin θ| + w*|cos θ|` and `new_h = h*|cos θ| + w*|sin θ|`,
/// truncated to whole pixels and never smaller than 1.
///
/// # Example
///
/// ```
/// use pixkit_core::transform::compute_rotated_bounds;
///
/// // 90-degree rotation swaps dimensions
/// let (w, h) = compute_rotated_bounds(100, 50, 90.0);
/// assert_eq!(w, 50);
/// assert_eq!(h, 100);
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    let new_w = (h * sin + w * cos) as u32;
    let new_h = (h * cos + w * sin) as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image about its center, expanding the canvas to fit.
///
/// An angle of exactly zero returns an identical copy without resampling.
/// Otherwise every output pixel is bilinearly sampled from the source and
/// positions outside the source replicate its edge pixels. Works for every
/// channel layout.
pub fn rotate(image: &PixelBuffer, angle_degrees: f64) -> PixelBuffer {
    let angle_degrees = if angle_degrees.is_finite() {
        angle_degrees
    } else {
        debug!(angle_degrees, "Non-finite rotation angle treated as zero");
        0.0
    };

    if angle_degrees == 0.0 || image.is_empty() {
        return image.clone();
    }

    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, angle_degrees);

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = image.width as f64 / 2.0;
    let src_cy = image.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let channels = image.channels();
    let mut output = vec![0u8; dst_w as usize * dst_h as usize * channels];

    for dst_y in 0..dst_h {
        let dy = dst_y as f64 - dst_cy;
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 - dst_cx;

            let src_x = dx * cos - dy * sin + src_cx;
            let src_y = dx * sin + dy * cos + src_cy;

            let idx = (dst_y as usize * dst_w as usize + dst_x as usize) * channels;
            sample_bilinear_replicate(image, src_x, src_y, &mut output[idx..idx + channels]);
        }
    }

    debug!(
        angle_degrees,
        src_w = image.width,
        src_h = image.height,
        dst_w,
        dst_h,
        "Rotated image"
    );

    PixelBuffer::new(dst_w, dst_h, image.layout, output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
