//! Luminance conversion using ITU-R BT.601 coefficients.
//!
//! The scan cascade works on a single luminance channel. Conversion uses
//! 14-bit fixed-point weights so results are exact integers:
//! `Y = (4899 R + 9617 G + 1868 B + 8192) >> 14`.

use crate::decode::{ChannelLayout, PixelBuffer};

const SHIFT: u32 = 14;
const FIXED_R: u32 = 4899;
const FIXED_G: u32 = 9617;
const FIXED_B: u32 = 1868;

/// Calculate luminance from u8 RGB values (0 to 255).
#[inline]
pub fn rgb_to_luma(r: u8, g: u8, b: u8) -> u8 {
    let sum = FIXED_R * r as u32 + FIXED_G * g as u32 + FIXED_B * b as u32 + (1 << (SHIFT - 1));
    (sum >> SHIFT) as u8
}

/// Convert a buffer to single-channel luminance.
///
/// Alpha is discarded. A luma buffer is returned as a copy.
pub fn to_luma(image: &PixelBuffer) -> PixelBuffer {
    let pixels = match image.layout {
        ChannelLayout::Luma => image.pixels.clone(),
        layout => image
            .pixels
            .chunks_exact(layout.channels())
            .map(|p| rgb_to_luma(p[0], p[1], p[2]))
            .collect(),
    };
    PixelBuffer::new(image.width, image.height, ChannelLayout::Luma, pixels)
}

/// Expand a luma buffer to three identical RGB channels.
pub fn luma_to_rgb(image: &PixelBuffer) -> PixelBuffer {
    debug_assert_eq!(image.layout, ChannelLayout::Luma);
    let pixels = image.pixels.iter().flat_map(|&v| [v, v, v]).collect();
    PixelBuffer::new(image.width, image.height, ChannelLayout::Rgb, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_weights_sum_to_one() {
        assert_eq!(FIXED_R + FIXED_G + FIXED_B, 1 << SHIFT);
    }

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(rgb_to_luma(255, 255, 255), 255);
        assert_eq!(rgb_to_luma(0, 0, 0), 0);
    }

    #[test]
    fn test_luminance_gray_preserves_value() {
        for v in 0..=255u8 {
            assert_eq!(rgb_to_luma(v, v, v), v);
        }
    }

    #[test]
    fn test_luminance_primaries() {
        // 0.299 * 255 = 76.2, 0.587 * 255 = 149.7, 0.114 * 255 = 29.1
        assert_eq!(rgb_to_luma(255, 0, 0), 76);
        assert_eq!(rgb_to_luma(0, 255, 0), 150);
        assert_eq!(rgb_to_luma(0, 0, 255), 29);
    }

    #[test]
    fn test_fixed_point_matches_float() {
        for r in [0u8, 64, 128, 192, 255] {
            for g in [0u8, 64, 128, 192, 255] {
                for b in [0u8, 64, 128, 192, 255] {
                    let float = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
                    let fixed = rgb_to_luma(r, g, b);
                    assert!(
                        (fixed as f32 - float).abs() <= 1.0,
                        "({}, {}, {}): fixed {} float {}",
                        r, g, b, fixed, float
                    );
                }
            }
        }
    }

    #[test]
    fn test_to_luma_drops_alpha() {
        let img = PixelBuffer::filled(2, 2, ChannelLayout::Rgba, &[255, 0, 0, 10]);
        let gray = to_luma(&img);
        assert_eq!(gray.layout, ChannelLayout::Luma);
        assert_eq!(gray.pixels, vec![76; 4]);
    }

    #[test]
    fn test_luma_to_rgb() {
        let gray = PixelBuffer::new(2, 1, ChannelLayout::Luma, vec![5, 200]);
        let rgb = luma_to_rgb(&gray);
        assert_eq!(rgb.pixels, vec![5, 5, 5, 200, 200, 200]);
        assert_eq!(to_luma(&rgb), gray);
    }
}
