//! Watermark compositing.
//!
//! An overlay is shrunk to at most 30% of the base image in each dimension,
//! centred on a normalized anchor point, and alpha-blended into the base:
//! `result = a * overlay + (1 - a) * base`, truncated to integer samples.
//! The blend weight `a` is the overlay's own alpha channel when it has one,
//! otherwise a uniform opacity. Grayscale overlays count as opaque.
//!
//! Unlike the other transforms, [`composite`] writes into the base buffer.

use tracing::debug;

use crate::decode::{resize_to_fit_within, ChannelLayout, FilterType, PixelBuffer};
use crate::error::{Result, ToolkitError};
use crate::geometry::NormalizedPoint;

/// Largest share of the base width and height an overlay may cover.
pub const OVERLAY_MAX_FRACTION: f64 = 0.3;

/// Opacity used for overlays without an alpha channel.
pub const DEFAULT_OPACITY: f64 = 0.7;

/// An overlay image and where to put it.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySpec {
    pub overlay: PixelBuffer,
    /// Where the overlay's centre lands on the base image.
    pub anchor: NormalizedPoint,
    /// Uniform blend weight for RGB overlays. RGBA overlays use their alpha
    /// and grayscale overlays are opaque.
    pub opacity: f64,
}

impl OverlaySpec {
    pub fn new(overlay: PixelBuffer, anchor: NormalizedPoint) -> Self {
        Self {
            overlay,
            anchor,
            opacity: DEFAULT_OPACITY,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Maximum overlay size for a base image: `trunc(side * 0.3)` per axis.
pub fn overlay_bounds(base_width: u32, base_height: u32) -> (u32, u32) {
    (
        (base_width as f64 * OVERLAY_MAX_FRACTION) as u32,
        (base_height as f64 * OVERLAY_MAX_FRACTION) as u32,
    )
}

/// Shrink `overlay` to fit the base's overlay bounds, preserving aspect ratio.
///
/// Overlays that already fit are returned unchanged; overlays are never
/// enlarged.
///
/// # Errors
///
/// `ToolkitError::InvalidOverlay` for an overlay without pixels.
pub fn fit_overlay(overlay: &PixelBuffer, base_width: u32, base_height: u32) -> Result<PixelBuffer> {
    if overlay.is_empty() {
        return Err(ToolkitError::InvalidOverlay(
            "overlay image has no pixels".to_string(),
        ));
    }

    let (max_w, max_h) = overlay_bounds(base_width, base_height);
    resize_to_fit_within(overlay, max_w, max_h, FilterType::Triangle)
        .map_err(|e| ToolkitError::Processing(format!("overlay resize failed: {e}")))
}

/// Top-left corner for an overlay of the given size centred on `anchor`.
///
/// The centre is `trunc(anchor * base)`; the origin is rounded half to even
/// and then clamped so the overlay stays inside the base.
pub fn overlay_placement(
    base: (u32, u32),
    overlay: (u32, u32),
    anchor: NormalizedPoint,
) -> (u32, u32) {
    let anchor = anchor.clamped();
    let axis = |base: u32, size: u32, t: f64| -> u32 {
        let center = (t * base as f64) as i64;
        let origin = (center as f64 - size as f64 / 2.0).round_ties_even() as i64;
        let max_origin = (base as i64 - size as i64).max(0);
        origin.clamp(0, max_origin) as u32
    };
    (
        axis(base.0, overlay.0, anchor.x),
        axis(base.1, overlay.1, anchor.y),
    )
}

/// Blend an overlay into `base` in place.
///
/// Only the rectangle under the placed overlay changes. The base keeps its
/// layout; an alpha channel in the base is left as is.
///
/// # Errors
///
/// `ToolkitError::InvalidOverlay` for an overlay without pixels.
pub fn composite(base: &mut PixelBuffer, spec: &OverlaySpec) -> Result<()> {
    let fitted = fit_overlay(&spec.overlay, base.width, base.height)?;
    let (x0, y0) = overlay_placement(
        (base.width, base.height),
        (fitted.width, fitted.height),
        spec.anchor,
    );

    let opacity = if spec.opacity.is_finite() {
        spec.opacity.clamp(0.0, 1.0)
    } else {
        DEFAULT_OPACITY
    };
    if opacity != spec.opacity {
        debug!(requested = spec.opacity, applied = opacity, "Overlay opacity clamped");
    }
    let opacity = opacity as f32;

    let w = fitted.width.min(base.width - x0);
    let h = fitted.height.min(base.height - y0);
    let base_color = match base.layout {
        ChannelLayout::Rgba => 3,
        layout => layout.channels(),
    };

    for oy in 0..h {
        for ox in 0..w {
            let src = fitted.pixel(ox, oy);
            let (rgb, alpha) = match fitted.layout {
                ChannelLayout::Luma => ([src[0]; 3], 1.0),
                ChannelLayout::Rgb => ([src[0], src[1], src[2]], opacity),
                ChannelLayout::Rgba => ([src[0], src[1], src[2]], src[3] as f32 / 255.0),
            };

            let dst = base.pixel_mut(x0 + ox, y0 + oy);
            if base_color == 1 {
                let luma = crate::luminance::rgb_to_luma(rgb[0], rgb[1], rgb[2]);
                dst[0] = blend(luma, dst[0], alpha);
            } else {
                for (d, &o) in dst[..3].iter_mut().zip(rgb.iter()) {
                    *d = blend(o, *d, alpha);
                }
            }
        }
    }

    debug!(
        x = x0,
        y = y0,
        width = w,
        height = h,
        "Overlay composited"
    );
    Ok(())
}

#[inline]
fn blend(overlay: u8, base: u8, alpha: f32) -> u8 {
    (alpha * overlay as f32 + (1.0 - alpha) * base as f32).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::filled(width, height, ChannelLayout::Rgb, &[200, 100, 50])
    }

    fn region_matches(img: &PixelBuffer, x0: u32, y0: u32, w: u32, h: u32, px: &[u8]) -> bool {
        (y0..y0 + h).all(|y| (x0..x0 + w).all(|x| img.pixel(x, y) == px))
    }

    #[test]
    fn test_overlay_bounds() {
        assert_eq!(overlay_bounds(100, 50), (30, 15));
        assert_eq!(overlay_bounds(3, 3), (0, 0));
    }

    #[test]
    fn test_small_overlay_is_not_resized() {
        let overlay = PixelBuffer::filled(20, 10, ChannelLayout::Rgb, &[1, 2, 3]);
        let fitted = fit_overlay(&overlay, 100, 100).unwrap();
        assert_eq!(fitted, overlay);
    }

    #[test]
    fn test_large_overlay_is_capped() {
        let overlay = PixelBuffer::filled(200, 100, ChannelLayout::Rgba, &[1, 2, 3, 4]);
        let fitted = fit_overlay(&overlay, 100, 100).unwrap();
        // Width binds: scale 30/200, height 100 * 0.15 = 15
        assert_eq!((fitted.width, fitted.height), (30, 15));
        assert_eq!(fitted.layout, ChannelLayout::Rgba);
    }

    #[test]
    fn test_tiny_base_yields_one_pixel_overlay() {
        let overlay = PixelBuffer::filled(8, 8, ChannelLayout::Rgb, &[9, 9, 9]);
        let fitted = fit_overlay(&overlay, 2, 2).unwrap();
        assert_eq!((fitted.width, fitted.height), (1, 1));
    }

    #[test]
    fn test_empty_overlay_is_rejected() {
        let overlay = PixelBuffer::new(0, 0, ChannelLayout::Rgba, vec![]);
        let err = fit_overlay(&overlay, 100, 100).unwrap_err();
        assert_eq!(err.kind(), "invalid_overlay");
    }

    #[test]
    fn test_placement_centres_on_anchor() {
        let origin = overlay_placement((100, 80), (20, 10), NormalizedPoint::new(0.5, 0.5));
        assert_eq!(origin, (40, 35));
    }

    #[test]
    fn test_placement_rounds_half_to_even() {
        // centre 50 - 7 / 2 = 46.5 -> 46; centre 40 - 5 / 2 = 37.5 -> 38
        let origin = overlay_placement((100, 80), (7, 5), NormalizedPoint::new(0.5, 0.5));
        assert_eq!(origin, (46, 38));
    }

    #[test]
    fn test_placement_clamps_at_corners() {
        let size = (30, 20);
        assert_eq!(
            overlay_placement((100, 80), size, NormalizedPoint::new(0.0, 0.0)),
            (0, 0)
        );
        assert_eq!(
            overlay_placement((100, 80), size, NormalizedPoint::new(1.0, 1.0)),
            (70, 60)
        );
        assert_eq!(
            overlay_placement((100, 80), size, NormalizedPoint::new(-3.0, 9.0)),
            (0, 60)
        );
    }

    #[test]
    fn test_opaque_alpha_overlay_replaces_region() {
        let mut img = base(100, 100);
        let overlay = PixelBuffer::filled(10, 10, ChannelLayout::Rgba, &[0, 255, 0, 255]);
        let spec = OverlaySpec::new(overlay, NormalizedPoint::new(0.5, 0.5)).with_opacity(0.1);

        composite(&mut img, &spec).unwrap();
        assert!(region_matches(&img, 45, 45, 10, 10, &[0, 255, 0]));
        assert_eq!(img.pixel(44, 50), &[200, 100, 50]);
        assert_eq!(img.pixel(55, 50), &[200, 100, 50]);
    }

    #[test]
    fn test_full_opacity_without_alpha_replaces_region() {
        let mut img = base(100, 100);
        let overlay = PixelBuffer::filled(10, 10, ChannelLayout::Rgb, &[7, 8, 9]);
        let spec = OverlaySpec::new(overlay, NormalizedPoint::new(0.0, 0.0)).with_opacity(1.0);

        composite(&mut img, &spec).unwrap();
        assert!(region_matches(&img, 0, 0, 10, 10, &[7, 8, 9]));
        assert_eq!(img.pixel(10, 10), &[200, 100, 50]);
    }

    #[test]
    fn test_default_opacity_blends_and_truncates() {
        let mut img = base(100, 100);
        let overlay = PixelBuffer::filled(10, 10, ChannelLayout::Rgb, &[0, 0, 0]);
        let spec = OverlaySpec::new(overlay, NormalizedPoint::new(0.5, 0.5));

        composite(&mut img, &spec).unwrap();
        // 0.3 * 200 = 60, 0.3 * 100 = 30, 0.3 * 50 = 15, each truncated
        let px = img.pixel(50, 50);
        assert!((59..=60).contains(&px[0]));
        assert!((29..=30).contains(&px[1]));
        assert!((14..=15).contains(&px[2]));
    }

    #[test]
    fn test_transparent_pixels_leave_base() {
        let mut img = base(50, 50);
        let overlay = PixelBuffer::filled(5, 5, ChannelLayout::Rgba, &[255, 255, 255, 0]);
        let spec = OverlaySpec::new(overlay, NormalizedPoint::new(0.5, 0.5));

        composite(&mut img, &spec).unwrap();
        assert_eq!(img, base(50, 50));
    }

    #[test]
    fn test_opacity_is_clamped() {
        let overlay = PixelBuffer::filled(4, 4, ChannelLayout::Rgb, &[10, 20, 30]);
        let mut over = base(40, 40);
        let mut one = base(40, 40);
        composite(&mut over, &OverlaySpec::new(overlay.clone(), NormalizedPoint::default()).with_opacity(5.0)).unwrap();
        composite(&mut one, &OverlaySpec::new(overlay.clone(), NormalizedPoint::default()).with_opacity(1.0)).unwrap();
        assert_eq!(over, one);

        let mut under = base(40, 40);
        composite(&mut under, &OverlaySpec::new(overlay, NormalizedPoint::default()).with_opacity(-1.0)).unwrap();
        assert_eq!(under, base(40, 40));
    }

    #[test]
    fn test_grayscale_overlay_is_opaque_gray() {
        let mut img = base(20, 20);
        let overlay = PixelBuffer::filled(2, 2, ChannelLayout::Luma, &[90]);
        let spec = OverlaySpec::new(overlay, NormalizedPoint::new(0.5, 0.5)).with_opacity(0.2);
        composite(&mut img, &spec).unwrap();
        assert_eq!(img.pixel(10, 10), &[90, 90, 90]);
    }

    #[test]
    fn test_composite_mutates_base_in_place() {
        let mut img = base(30, 30);
        let before = img.clone();
        let overlay = PixelBuffer::filled(3, 3, ChannelLayout::Rgb, &[0, 0, 0]);
        composite(&mut img, &OverlaySpec::new(overlay, NormalizedPoint::new(0.5, 0.5))).unwrap();

        // Same allocation size, only the overlay rectangle differs.
        assert_eq!(img.pixels.len(), before.pixels.len());
        let changed = img
            .pixels
            .chunks_exact(3)
            .zip(before.pixels.chunks_exact(3))
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(changed, 9);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
