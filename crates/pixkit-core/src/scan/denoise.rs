//! Edge-preserving denoise filters: non-local means and bilateral.

use image::{GrayImage, Luma};

use super::border::{pad_reflect101, reflect101};

/// Weights below this fraction of the centre weight are dropped.
const WEIGHT_THRESHOLD: f64 = 0.001;

/// Non-local means denoise.
///
/// Every pixel becomes a weighted mean of the pixels in a
/// `search_window`-wide neighbourhood, each weighted by
/// `exp(-d / h^2)` where `d` is the mean squared difference between the
/// `template_window`-wide patches around the two pixels. The mean over the
/// patch is approximated by a shift to the nearest power of two and weights
/// are 32-bit fixed point, so results are exact integers.
pub fn non_local_means(
    image: &GrayImage,
    h: f32,
    template_window: u32,
    search_window: u32,
) -> GrayImage {
    let (width, height) = image.dimensions();
    let template_half = (template_window / 2) as i64;
    let search_half = (search_window / 2) as i64;
    let template_size = (template_half * 2 + 1) as usize;
    let search_size = (search_half * 2 + 1) as u64;

    let border = (search_half + template_half) as u32;
    let padded = pad_reflect101(image, border, border, border, border);
    let pw = padded.width() as usize;
    let p = padded.as_raw();

    // Fixed-point scale chosen so the weighted sum over the search window
    // never overflows i32.
    let max_estimate = search_size * search_size * 255;
    let fixed_point_mult = (i32::MAX as u64 / max_estimate) as f64;

    let template_sq = template_size * template_size;
    let shift = nearest_power_of_two(template_sq);
    let almost_to_actual = (1u64 << shift) as f64 / template_sq as f64;
    let max_dist = 255.0 * 255.0;
    let table_len = (max_dist / almost_to_actual + 1.0) as usize;
    let weights: Vec<u64> = (0..table_len)
        .map(|almost| {
            let dist = almost as f64 * almost_to_actual;
            let w = (-dist / (h as f64 * h as f64)).exp();
            let weight = (fixed_point_mult * w).round_ties_even();
            if weight < WEIGHT_THRESHOLD * fixed_point_mult {
                0
            } else {
                weight as u64
            }
        })
        .collect();

    let (w, hgt) = (width as usize, height as usize);
    let mut estimate = vec![0u64; w * hgt];
    let mut weight_sum = vec![0u64; w * hgt];

    // Patch distances for one offset are box sums of squared differences
    // over the region the template windows touch.
    let (rw, rh) = (w + 2 * template_half as usize, hgt + 2 * template_half as usize);
    let stride = rw + 1;
    let mut integral = vec![0u64; stride * (rh + 1)];
    let base = (border as i64 - template_half) as usize;

    for oy in -search_half..=search_half {
        for ox in -search_half..=search_half {
            for ry in 0..rh {
                let row_a = (base + ry) * pw + base;
                let row_b = (((base + ry) as i64 + oy) as usize * pw + base) as i64 + ox;
                let mut running = 0u64;
                for rx in 0..rw {
                    let a = p[row_a + rx] as i64;
                    let b = p[(row_b + rx as i64) as usize] as i64;
                    running += ((a - b) * (a - b)) as u64;
                    integral[(ry + 1) * stride + rx + 1] = integral[ry * stride + rx + 1] + running;
                }
            }

            for y in 0..hgt {
                for x in 0..w {
                    let (x1, y1) = (x + template_size, y + template_size);
                    let dist = integral[y1 * stride + x1] + integral[y * stride + x]
                        - integral[y * stride + x1]
                        - integral[y1 * stride + x];
                    let weight = weights[(dist >> shift) as usize];
                    if weight == 0 {
                        continue;
                    }
                    let sy = (y as i64 + border as i64 + oy) as usize;
                    let sx = (x as i64 + border as i64 + ox) as usize;
                    let idx = y * w + x;
                    estimate[idx] += weight * p[sy * pw + sx] as u64;
                    weight_sum[idx] += weight;
                }
            }
        }
    }

    GrayImage::from_fn(width, height, |x, y| {
        let idx = y as usize * w + x as usize;
        let ws = weight_sum[idx].max(1);
        Luma([((estimate[idx] + ws / 2) / ws).min(255) as u8])
    })
}

/// Smallest `p` with `2^p >= value`.
fn nearest_power_of_two(value: usize) -> u32 {
    let mut p = 0;
    while (1usize << p) < value {
        p += 1;
    }
    p
}

/// Bilateral filter over a circular window of the given diameter.
///
/// Each neighbour is weighted by a spatial Gaussian of its distance and a
/// range Gaussian of its intensity difference. Borders are mirrored.
pub fn bilateral(
    image: &GrayImage,
    diameter: u32,
    sigma_color: f64,
    sigma_space: f64,
) -> GrayImage {
    let sigma_color = if sigma_color <= 0.0 { 1.0 } else { sigma_color };
    let sigma_space = if sigma_space <= 0.0 { 1.0 } else { sigma_space };
    let radius = match diameter {
        0 => (sigma_space * 1.5).round() as i64,
        d => (d / 2) as i64,
    };
    let radius = radius.max(1);

    let color_coeff = -0.5 / (sigma_color * sigma_color);
    let space_coeff = -0.5 / (sigma_space * sigma_space);

    let color_weight: Vec<f32> = (0..256)
        .map(|i| ((i * i) as f64 * color_coeff).exp() as f32)
        .collect();

    let mut taps: Vec<(i64, i64, f32)> = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r = ((dx * dx + dy * dy) as f64).sqrt();
            if r > radius as f64 {
                continue;
            }
            taps.push((dx, dy, (r * r * space_coeff).exp() as f32));
        }
    }

    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let center = image.get_pixel(x, y)[0] as i32;
        let mut sum = 0.0f32;
        let mut wsum = 0.0f32;
        for &(dx, dy, space) in &taps {
            let sx = reflect101(x as i64 + dx, width);
            let sy = reflect101(y as i64 + dy, height);
            let v = image.get_pixel(sx, sy)[0] as i32;
            let w = space * color_weight[(v - center).unsigned_abs() as usize];
            sum += v as f32 * w;
            wsum += w;
        }
        Luma([(sum / wsum).round_ties_even().clamp(0.0, 255.0) as u8])
    })
}
