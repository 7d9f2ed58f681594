//! Linear tone adjustments: brightness and contrast.
//!
//! Both are special cases of `output = clamp(round(input * alpha + beta), 0, 255)`
//! applied to every color sample. Caller values are clamped into a safe
//! operating range rather than rejected:
//!
//! | Adjustment | alpha                        | beta                  |
//! |------------|------------------------------|-----------------------|
//! | Brightness | 1                            | clamp(b, -100, 100)   |
//! | Contrast   | clamp(1 + c, 0.05, 4.0)      | 0                     |

use tracing::debug;

use crate::decode::PixelBuffer;

/// Allowed brightness offset range.
pub const BRIGHTNESS_RANGE: (f64, f64) = (-100.0, 100.0);

/// Allowed contrast gain range, after adding 1 to the caller's value.
pub const CONTRAST_GAIN_RANGE: (f64, f64) = (0.05, 4.0);

/// Apply `input * alpha + beta` to every color sample.
///
/// Results are rounded half to even and saturated to [0, 255]. The alpha
/// channel of an RGBA image is left untouched.
pub fn adjust_tone(image: &PixelBuffer, alpha: f64, beta: f64) -> PixelBuffer {
    let lut = build_lut(alpha, beta);
    let channels = image.channels();
    let color_channels = if image.layout.has_alpha() {
        channels - 1
    } else {
        channels
    };

    let mut output = image.clone();
    for px in output.pixels.chunks_exact_mut(channels) {
        for sample in &mut px[..color_channels] {
            *sample = lut[*sample as usize];
        }
    }
    output
}

/// Shift brightness by `brightness`, clamped to [`BRIGHTNESS_RANGE`].
pub fn adjust_brightness(image: &PixelBuffer, brightness: f64) -> PixelBuffer {
    let beta = clamp_param(brightness, 0.0, BRIGHTNESS_RANGE);
    if beta != brightness {
        debug!(requested = brightness, applied = beta, "Brightness clamped");
    }
    adjust_tone(image, 1.0, beta)
}

/// Scale contrast by `1 + contrast`, clamped to [`CONTRAST_GAIN_RANGE`].
///
/// Zero keeps the original image; `0.2` is +20%, `-0.3` is -30%.
pub fn adjust_contrast(image: &PixelBuffer, contrast: f64) -> PixelBuffer {
    let requested = 1.0 + contrast;
    let gain = clamp_param(requested, 1.0, CONTRAST_GAIN_RANGE);
    if gain != requested {
        debug!(requested, applied = gain, "Contrast gain clamped");
    }
    adjust_tone(image, gain, 0.0)
}

/// Clamp to `range`, mapping non-finite values to `neutral`.
fn clamp_param(value: f64, neutral: f64, range: (f64, f64)) -> f64 {
    if value.is_finite() {
        value.clamp(range.0, range.1)
    } else {
        neutral
    }
}

fn build_lut(alpha: f64, beta: f64) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = (i as f64 * alpha + beta).round_ties_even().clamp(0.0, 255.0) as u8;
    }
    lut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ChannelLayout;

    fn gray_ramp() -> PixelBuffer {
        let pixels: Vec<u8> = (0..=255u8).flat_map(|v| [v, v, v]).collect();
        PixelBuffer::new(256, 1, ChannelLayout::Rgb, pixels)
    }

    #[test]
    fn test_identity_parameters() {
        let img = gray_ramp();
        assert_eq!(adjust_tone(&img, 1.0, 0.0), img);
        assert_eq!(adjust_brightness(&img, 0.0), img);
        assert_eq!(adjust_contrast(&img, 0.0), img);
    }

    #[test]
    fn test_brightness_offsets_and_saturates() {
        let img = PixelBuffer::new(1, 1, ChannelLayout::Rgb, vec![10, 128, 250]);
        let out = adjust_brightness(&img, 20.0);
        assert_eq!(out.pixels, vec![30, 148, 255]);

        let out = adjust_brightness(&img, -20.0);
        assert_eq!(out.pixels, vec![0, 108, 230]);
    }

    #[test]
    fn test_brightness_is_clamped() {
        let img = PixelBuffer::new(1, 1, ChannelLayout::Rgb, vec![0, 100, 200]);
        assert_eq!(adjust_brightness(&img, 500.0), adjust_brightness(&img, 100.0));
        assert_eq!(adjust_brightness(&img, -500.0), adjust_brightness(&img, -100.0));
        assert_eq!(adjust_brightness(&img, f64::NAN), img);
    }

    #[test]
    fn test_contrast_scales_and_rounds() {
        let img = PixelBuffer::new(1, 1, ChannelLayout::Rgb, vec![10, 100, 200]);
        let out = adjust_contrast(&img, 0.25);
        // 12.5 rounds to even
        assert_eq!(out.pixels, vec![12, 125, 250]);
    }

    #[test]
    fn test_contrast_gain_is_clamped() {
        let img = PixelBuffer::new(1, 1, ChannelLayout::Rgb, vec![20, 40, 60]);
        // Gain floors at 0.05 so the image never goes fully black.
        let out = adjust_contrast(&img, -5.0);
        assert_eq!(out.pixels, vec![1, 2, 3]);
        assert_eq!(adjust_contrast(&img, 10.0), adjust_contrast(&img, 3.0));
    }

    #[test]
    fn test_alpha_channel_untouched() {
        let img = PixelBuffer::filled(2, 2, ChannelLayout::Rgba, &[100, 100, 100, 50]);
        let out = adjust_brightness(&img, 60.0);
        assert!(out.pixels.chunks_exact(4).all(|p| p == [160, 160, 160, 50]));
    }

    #[test]
    fn test_luma_buffer() {
        let img = PixelBuffer::filled(2, 1, ChannelLayout::Luma, &[40]);
        let out = adjust_tone(&img, 2.0, 5.0);
        assert_eq!(out.pixels, vec![85, 85]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::decode::ChannelLayout;
    use proptest::prelude::*;

    proptest! {
        /// Property: raising brightness never darkens any sample.
        #[test]
        fn prop_brightness_monotonic(
            pixels in prop::collection::vec(any::<u8>(), 3 * 16),
            low in -150.0f64..150.0,
            delta in 0.0f64..100.0,
        ) {
            let img = PixelBuffer::new(4, 4, ChannelLayout::Rgb, pixels);
            let darker = adjust_brightness(&img, low);
            let brighter = adjust_brightness(&img, low + delta);
            for (a, b) in darker.pixels.iter().zip(brighter.pixels.iter()) {
                prop_assert!(b >= a);
            }
        }

        /// Property: raising contrast never darkens any sample.
        #[test]
        fn prop_contrast_monotonic(
            value in any::<u8>(),
            low in -2.0f64..4.0,
            delta in 0.0f64..2.0,
        ) {
            let img = PixelBuffer::new(1, 1, ChannelLayout::Luma, vec![value]);
            let a = adjust_contrast(&img, low).pixels[0];
            let b = adjust_contrast(&img, low + delta).pixels[0];
            prop_assert!(b >= a);
        }
    }
}
