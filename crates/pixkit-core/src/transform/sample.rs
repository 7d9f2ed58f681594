//! Shared pixel sampling for the geometric transforms.

use crate::decode::PixelBuffer;

/// Sample a pixel using bilinear interpolation, replicating edge pixels.
///
/// Neighbor coordinates outside the image are clamped to the nearest edge,
/// so points outside the source never produce black or transparent samples.
/// `out` must hold `image.channels()` samples.
pub(crate) fn sample_bilinear_replicate(image: &PixelBuffer, x: f64, y: f64, out: &mut [u8]) {
    let max_x = image.width as i64 - 1;
    let max_y = image.height as i64 - 1;

    // Cells outside [-1, size] all sample the same edge. Bounding them keeps
    // `x0 + 1` from overflowing for huge or infinite coordinates.
    let x0 = x.floor().clamp(-1.0, image.width as f64);
    let y0 = y.floor().clamp(-1.0, image.height as f64);
    let fx = (x - x0).clamp(0.0, 1.0);
    let fy = (y - y0).clamp(0.0, 1.0);

    let (x0, y0) = (x0 as i64, y0 as i64);
    let cx0 = x0.clamp(0, max_x) as u32;
    let cx1 = (x0 + 1).clamp(0, max_x) as u32;
    let cy0 = y0.clamp(0, max_y) as u32;
    let cy1 = (y0 + 1).clamp(0, max_y) as u32;

    let p00 = image.pixel(cx0, cy0);
    let p10 = image.pixel(cx1, cy0);
    let p01 = image.pixel(cx0, cy1);
    let p11 = image.pixel(cx1, cy1);

    for (i, sample) in out.iter_mut().enumerate() {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        *sample = v.clamp(0.0, 255.0).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ChannelLayout;

    fn gradient() -> PixelBuffer {
        // 2x2 luma: 0 100 / 100 200
        PixelBuffer::new(2, 2, ChannelLayout::Luma, vec![0, 100, 100, 200])
    }

    #[test]
    fn test_exact_pixel_positions() {
        let img = gradient();
        let mut out = [0u8];
        sample_bilinear_replicate(&img, 1.0, 1.0, &mut out);
        assert_eq!(out, [200]);
        sample_bilinear_replicate(&img, 0.0, 1.0, &mut out);
        assert_eq!(out, [100]);
    }

    #[test]
    fn test_interpolates_between_pixels() {
        let img = gradient();
        let mut out = [0u8];
        sample_bilinear_replicate(&img, 0.5, 0.5, &mut out);
        assert_eq!(out, [100]);
        sample_bilinear_replicate(&img, 0.5, 0.0, &mut out);
        assert_eq!(out, [50]);
    }

    #[test]
    fn test_outside_replicates_edges() {
        let img = gradient();
        let mut out = [0u8];
        sample_bilinear_replicate(&img, -10.0, -10.0, &mut out);
        assert_eq!(out, [0]);
        sample_bilinear_replicate(&img, 50.0, 50.0, &mut out);
        assert_eq!(out, [200]);
        sample_bilinear_replicate(&img, 30.0, 0.0, &mut out);
        assert_eq!(out, [100]);
    }

    #[test]
    fn test_extreme_coordinates_replicate_edges() {
        let img = gradient();
        let mut out = [0u8];
        sample_bilinear_replicate(&img, f64::INFINITY, 0.0, &mut out);
        assert_eq!(out, [100]);
        sample_bilinear_replicate(&img, f64::NEG_INFINITY, 1.0, &mut out);
        assert_eq!(out, [100]);
        sample_bilinear_replicate(&img, 1e19, 1e19, &mut out);
        assert_eq!(out, [200]);
        sample_bilinear_replicate(&img, -1e300, f64::INFINITY, &mut out);
        assert_eq!(out, [100]);
        // NaN has no defined neighbour; it only has to stay in bounds.
        sample_bilinear_replicate(&img, f64::NAN, f64::NAN, &mut out);
    }
}
