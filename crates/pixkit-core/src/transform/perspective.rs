//! Quadrilateral ordering and perspective rectification.
//!
//! A document selection arrives as four unordered corners. They are put in
//! canonical order (top-left, top-right, bottom-right, bottom-left) and the
//! enclosed region is warped onto an axis-aligned rectangle.

use imageproc::geometric_transformations::Projection;
use tracing::debug;

use super::sample::sample_bilinear_replicate;
use crate::decode::PixelBuffer;
use crate::error::{Result, ToolkitError};
use crate::geometry::Quadrilateral;

/// Four corners in pixel coordinates, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderedCorners {
    pub top_left: (f64, f64),
    pub top_right: (f64, f64),
    pub bottom_right: (f64, f64),
    pub bottom_left: (f64, f64),
}

impl OrderedCorners {
    /// Scale a normalized selection to an image of the given size and order it.
    pub fn from_quadrilateral(quad: &Quadrilateral, width: u32, height: u32) -> Self {
        order_corners(quad.to_pixels(width, height))
    }

    /// Corners as an array in canonical order.
    pub fn to_array(&self) -> [(f64, f64); 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Width and height of the axis-aligned bounding box.
    pub fn extent(&self) -> (f64, f64) {
        let corners = self.to_array();
        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for (x, y) in corners {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        (max_x - min_x, max_y - min_y)
    }

    /// Absolute polygon area by the shoelace formula.
    fn area(&self) -> f64 {
        let c = self.to_array();
        let twice: f64 = (0..4)
            .map(|i| {
                let (x0, y0) = c[i];
                let (x1, y1) = c[(i + 1) % 4];
                x0 * y1 - x1 * y0
            })
            .sum();
        twice.abs() / 2.0
    }
}

/// Put four points in canonical corner order.
///
/// Top-left has the smallest `x + y` and bottom-right the largest. Top-right
/// has the smallest `y - x` and bottom-left the largest. Ties go to the
/// earliest point. The heuristic assumes a convex, roughly axis-aligned
/// quadrilateral; heavily skewed input may assign one point to two corners.
pub fn order_corners(points: [(f64, f64); 4]) -> OrderedCorners {
    let sum = |p: &(f64, f64)| p.0 + p.1;
    let diff = |p: &(f64, f64)| p.1 - p.0;

    OrderedCorners {
        top_left: points[arg_min(&points, sum)],
        top_right: points[arg_min(&points, diff)],
        bottom_right: points[arg_max(&points, sum)],
        bottom_left: points[arg_max(&points, diff)],
    }
}

fn arg_min(points: &[(f64, f64); 4], key: impl Fn(&(f64, f64)) -> f64) -> usize {
    let mut best = 0;
    for i in 1..points.len() {
        if key(&points[i]) < key(&points[best]) {
            best = i;
        }
    }
    best
}

fn arg_max(points: &[(f64, f64); 4], key: impl Fn(&(f64, f64)) -> f64) -> usize {
    let mut best = 0;
    for i in 1..points.len() {
        if key(&points[i]) > key(&points[best]) {
            best = i;
        }
    }
    best
}

/// Warp the region enclosed by `corners` onto a rectangle.
///
/// The output is as wide and tall as the corners' bounding box. Source
/// positions are bilinearly sampled with edge replication.
///
/// # Errors
///
/// `ToolkitError::DegenerateSelection` if the bounding box rounds to zero
/// in either dimension, or the corners enclose no area so no perspective
/// mapping exists.
pub fn rectify(image: &PixelBuffer, corners: &OrderedCorners) -> Result<PixelBuffer> {
    let (extent_w, extent_h) = corners.extent();

    if extent_w.round() == 0.0 || extent_h.round() == 0.0 || !corners.area().is_normal() {
        return Err(ToolkitError::DegenerateSelection {
            width: extent_w,
            height: extent_h,
        });
    }

    let out_w = extent_w.max(1.0) as u32;
    let out_h = extent_h.max(1.0) as u32;

    let dest: [(f32, f32); 4] = [
        (0.0, 0.0),
        (out_w as f32, 0.0),
        (out_w as f32, out_h as f32),
        (0.0, out_h as f32),
    ];
    let src = corners.to_array().map(|(x, y)| (x as f32, y as f32));

    // Maps output positions back into the source image.
    let projection = Projection::from_control_points(dest, src).ok_or(
        ToolkitError::DegenerateSelection {
            width: extent_w,
            height: extent_h,
        },
    )?;

    let channels = image.channels();
    let mut output = vec![0u8; out_w as usize * out_h as usize * channels];

    for y in 0..out_h {
        for x in 0..out_w {
            let (sx, sy) = projection * (x as f32, y as f32);
            let idx = (y as usize * out_w as usize + x as usize) * channels;
            sample_bilinear_replicate(
                image,
                sx as f64,
                sy as f64,
                &mut output[idx..idx + channels],
            );
        }
    }

    debug!(
        top_left = ?corners.top_left,
        top_right = ?corners.top_right,
        bottom_right = ?corners.bottom_right,
        bottom_left = ?corners.bottom_left,
        out_w,
        out_h,
        "Rectified selection"
    );

    Ok(PixelBuffer::new(out_w, out_h, image.layout, output))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
