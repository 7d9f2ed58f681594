//! Final compositing and sharpening of the scan cascade.

use image::{GrayImage, Luma};

use super::border::reflect101;

/// 3x3 sharpening kernel: centre 5, four neighbours -1.
pub const SHARPEN_KERNEL: [[i32; 3]; 3] = [[0, -1, 0], [-1, 5, -1], [0, -1, 0]];

/// Combine the foreground mask with the stretched luminance.
///
/// Background (mask 0) becomes pure white. Foreground takes the luminance
/// and is subtracted from a zero background with saturation, so
/// `out = sat(white_where_background - luma_where_foreground)`.
pub fn flatten(luma: &GrayImage, mask: &GrayImage) -> GrayImage {
    debug_assert_eq!(luma.dimensions(), mask.dimensions());

    let mut output = luma.clone();
    for ((out, l), m) in output.pixels_mut().zip(luma.pixels()).zip(mask.pixels()) {
        let background: u8 = if m[0] == 0 { 255 } else { 0 };
        let text: u8 = if m[0] != 0 { l[0] } else { 0 };
        out[0] = background.saturating_sub(text);
    }
    output
}

/// Convolve with [`SHARPEN_KERNEL`], mirroring borders and saturating.
pub fn sharpen(image: &GrayImage) -> GrayImage {
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let mut acc = 0i32;
        for (ky, row) in SHARPEN_KERNEL.iter().enumerate() {
            for (kx, &k) in row.iter().enumerate() {
                if k == 0 {
                    continue;
                }
                let sx = reflect101(x as i64 + kx as i64 - 1, width);
                let sy = reflect101(y as i64 + ky as i64 - 1, height);
                acc += k * image.get_pixel(sx, sy)[0] as i32;
            }
        }
        Luma([acc.clamp(0, 255) as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_background_is_white() {
        let luma = GrayImage::from_raw(4, 1, vec![10, 90, 200, 255]).unwrap();
        let mask = GrayImage::from_raw(4, 1, vec![0, 0, 255, 255]).unwrap();
        let out = flatten(&luma, &mask);
        assert_eq!(out.get_pixel(0, 0)[0], 255);
        assert_eq!(out.get_pixel(1, 0)[0], 255);
    }

    #[test]
    fn test_flatten_foreground_is_black() {
        let luma = GrayImage::from_raw(3, 1, vec![0, 120, 250]).unwrap();
        let mask = GrayImage::from_pixel(3, 1, Luma([255]));
        let out = flatten(&luma, &mask);
        assert!(out.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_sharpen_uniform_is_unchanged() {
        let img = GrayImage::from_pixel(5, 4, Luma([123]));
        assert_eq!(sharpen(&img), img);
    }

    #[test]
    fn test_sharpen_boosts_isolated_pixel() {
        let mut img = GrayImage::from_pixel(5, 5, Luma([100]));
        img.put_pixel(2, 2, Luma([140]));
        let out = sharpen(&img);
        // 5 * 140 - 4 * 100 = 300, saturated
        assert_eq!(out.get_pixel(2, 2)[0], 255);
        // 5 * 100 - 3 * 100 - 140 = 60
        assert_eq!(out.get_pixel(2, 1)[0], 60);
        assert_eq!(out.get_pixel(0, 0)[0], 100);
    }

    #[test]
    fn test_sharpen_mirrors_borders() {
        // Column 1 mirrors into column -1, so the left edge sees 200 twice.
        let img = GrayImage::from_raw(3, 1, vec![100, 200, 100]).unwrap();
        let out = sharpen(&img);
        // 5 * 100 - 200 - 200 - 100 - 100 = -100 -> 0
        assert_eq!(out.get_pixel(0, 0)[0], 0);
    }
}
