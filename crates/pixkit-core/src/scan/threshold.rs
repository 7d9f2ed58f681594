//! Histogram stretch and Gaussian adaptive binarization.

use image::{GrayImage, Luma};

use super::border::replicate;

/// Linearly stretch intensities so the darkest pixel becomes 0 and the
/// brightest 255. A flat image has no range to stretch and becomes all 0.
pub fn normalize_min_max(image: &GrayImage) -> GrayImage {
    let (min, max) = image
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));

    let scale = if max > min {
        255.0 / (max - min) as f32
    } else {
        0.0
    };
    let shift = -(min as f32) * scale;

    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = (i as f32 * scale + shift).round_ties_even().clamp(0.0, 255.0) as u8;
    }

    let mut output = image.clone();
    for p in output.pixels_mut() {
        p[0] = lut[p[0] as usize];
    }
    output
}

/// Normalized 1-D Gaussian kernel of odd length `size`.
///
/// `sigma <= 0` derives it from the size as `0.3 * ((size - 1) / 2 - 1) + 0.8`.
pub fn gaussian_kernel(size: u32, sigma: f64) -> Vec<f64> {
    let sigma = if sigma > 0.0 {
        sigma
    } else {
        0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8
    };
    let scale = -0.5 / (sigma * sigma);
    let center = (size as f64 - 1.0) * 0.5;

    let raw: Vec<f64> = (0..size)
        .map(|i| {
            let x = i as f64 - center;
            (scale * x * x).exp()
        })
        .collect();
    let sum: f64 = raw.iter().sum();
    raw.into_iter().map(|v| v / sum).collect()
}

/// Separable Gaussian blur with replicated borders, rounded to u8.
fn gaussian_blur(image: &GrayImage, kernel: &[f64]) -> GrayImage {
    let (width, height) = image.dimensions();
    let half = (kernel.len() / 2) as i64;

    let mut horizontal = vec![0f64; (width * height) as usize];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for (k, &w) in kernel.iter().enumerate() {
                let sx = replicate(x as i64 + k as i64 - half, width);
                acc += w * image.get_pixel(sx, y)[0] as f64;
            }
            horizontal[(y * width + x) as usize] = acc;
        }
    }

    GrayImage::from_fn(width, height, |x, y| {
        let mut acc = 0.0;
        for (k, &w) in kernel.iter().enumerate() {
            let sy = replicate(y as i64 + k as i64 - half, height);
            acc += w * horizontal[(sy * width + x) as usize];
        }
        Luma([acc.round().clamp(0.0, 255.0) as u8])
    })
}

/// Inverted binary threshold against a Gaussian-weighted local mean.
///
/// A pixel is foreground (255) when it is darker than its `block_size`
/// neighbourhood mean by at least `bias` levels (rounded down), otherwise
/// background (0).
pub fn adaptive_threshold_inverted(image: &GrayImage, block_size: u32, bias: f64) -> GrayImage {
    let kernel = gaussian_kernel(block_size, 0.0);
    let mean = gaussian_blur(image, &kernel);
    let bias = bias.floor() as i32;

    let mut output = image.clone();
    for (p, m) in output.pixels_mut().zip(mean.pixels()) {
        let diff = p[0] as i32 - m[0] as i32;
        p[0] = if diff > -bias { 0 } else { 255 };
    }
    output
}
