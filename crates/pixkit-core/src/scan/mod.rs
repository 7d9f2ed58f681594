//! Scan enhancement cascade.
//!
//! Turns a rectified photo of a page into a flat, high-contrast "scanned"
//! look. The stages run in a fixed order with fixed constants:
//!
//! 1. Luminance conversion
//! 2. Contrast-limited adaptive histogram equalization
//! 3. Non-local means denoise, then a bilateral pass
//! 4. Min-max stretch to [0, 255]
//! 5. Gaussian adaptive threshold into an inverted foreground mask
//! 6. Morphological closing of the mask
//! 7. White background minus masked foreground
//! 8. Sharpening
//! 9. Expansion back to RGB

mod border;
pub mod clahe;
pub mod denoise;
pub mod flatten;
pub mod morphology;
pub mod threshold;

use image::GrayImage;
use tracing::{debug, instrument};

use crate::decode::PixelBuffer;
use crate::error::{Result, ToolkitError};
use crate::luminance::{luma_to_rgb, to_luma};
use morphology::Rect;

/// Numeric constants for every cascade stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanTuning {
    /// Per-bin clip limit, relative to a flat histogram.
    pub clahe_clip_limit: f64,
    /// Tiles across and down.
    pub clahe_tile_grid: (u32, u32),
    /// Non-local means filter strength.
    pub nlm_strength: f32,
    pub nlm_template_window: u32,
    pub nlm_search_window: u32,
    pub bilateral_diameter: u32,
    pub bilateral_sigma_color: f64,
    pub bilateral_sigma_space: f64,
    /// Side of the Gaussian neighbourhood used for the local mean.
    pub threshold_block_size: u32,
    /// Levels below the local mean a pixel must fall to count as ink.
    pub threshold_bias: f64,
    pub closing_element: Rect,
    pub closing_iterations: u32,
}

/// The cascade's fixed tuning.
pub const SCAN_TUNING: ScanTuning = ScanTuning {
    clahe_clip_limit: 3.0,
    clahe_tile_grid: (8, 8),
    nlm_strength: 8.0,
    nlm_template_window: 7,
    nlm_search_window: 21,
    bilateral_diameter: 5,
    bilateral_sigma_color: 60.0,
    bilateral_sigma_space: 70.0,
    threshold_block_size: 11,
    threshold_bias: 6.0,
    closing_element: Rect {
        width: 2,
        height: 2,
    },
    closing_iterations: 1,
};

/// Run the cascade on a grayscale image.
pub fn enhance_gray(gray: &GrayImage, tuning: &ScanTuning) -> GrayImage {
    let (width, height) = gray.dimensions();

    let equalized =
        clahe::equalize_adaptive(gray, tuning.clahe_clip_limit, tuning.clahe_tile_grid);
    debug!(width, height, "Adaptive equalization complete");

    let denoised = denoise::non_local_means(
        &equalized,
        tuning.nlm_strength,
        tuning.nlm_template_window,
        tuning.nlm_search_window,
    );
    let smoothed = denoise::bilateral(
        &denoised,
        tuning.bilateral_diameter,
        tuning.bilateral_sigma_color,
        tuning.bilateral_sigma_space,
    );
    debug!("Denoise complete");

    let normalized = threshold::normalize_min_max(&smoothed);
    let mask = threshold::adaptive_threshold_inverted(
        &normalized,
        tuning.threshold_block_size,
        tuning.threshold_bias,
    );
    let mask = morphology::close(&mask, tuning.closing_element, tuning.closing_iterations);
    debug!("Foreground mask complete");

    let flattened = flatten::flatten(&normalized, &mask);
    flatten::sharpen(&flattened)
}

/// Apply the scan look to a color image.
///
/// # Errors
///
/// `ToolkitError::Processing` if the buffer is empty or its sample count does
/// not match its dimensions.
#[instrument(skip(image), fields(width = image.width, height = image.height))]
pub fn apply_scan_effect(image: &PixelBuffer) -> Result<PixelBuffer> {
    if image.is_empty() {
        return Err(ToolkitError::Processing(
            "cannot enhance an empty image".to_string(),
        ));
    }

    let luma = to_luma(image);
    let gray = GrayImage::from_raw(luma.width, luma.height, luma.pixels).ok_or_else(|| {
        ToolkitError::Processing(format!(
            "pixel data does not match {}x{}",
            image.width, image.height
        ))
    })?;

    let enhanced = enhance_gray(&gray, &SCAN_TUNING);
    let result = PixelBuffer::from_gray_image(enhanced);

    debug!("Scan effect applied");
    Ok(luma_to_rgb(&result))
}
