//! Image resizing for overlay scaling.
//!
//! All functions return new `PixelBuffer` instances without modifying the input.

use super::{DecodeError, FilterType, PixelBuffer};

/// Resize an image to exact dimensions, keeping its channel layout.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for a zero target dimension and
/// `DecodeError::CorruptedFile` if the source samples don't match its size.
pub fn resize(
    image: &PixelBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<PixelBuffer, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let dynamic = image
        .to_dynamic()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel data does not match dimensions".to_string()))?;

    let resized = dynamic.resize_exact(width, height, filter);

    Ok(PixelBuffer::from_dynamic(resized, image.layout))
}

/// Shrink an image so it fits inside `max_width` x `max_height`.
///
/// The aspect ratio is preserved and images are never enlarged: if the
/// source already fits it is returned unchanged.
pub fn resize_to_fit_within(
    image: &PixelBuffer,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<PixelBuffer, DecodeError> {
    let (new_width, new_height) =
        calculate_fit_dimensions(image.width, image.height, max_width, max_height);

    if new_width == image.width && new_height == image.height {
        return Ok(image.clone());
    }

    resize(image, new_width, new_height, filter)
}

/// Calculate the downscaled size that fits within the given bounds.
///
/// `scale = min(1, max_w / w, max_h / h)`; each scaled side is truncated and
/// kept at least 1 pixel.
pub fn calculate_fit_dimensions(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }

    let scale = 1.0f64
        .min(max_width as f64 / width as f64)
        .min(max_height as f64 / height as f64);

    if scale >= 1.0 {
        return (width, height);
    }

    let new_width = ((width as f64 * scale) as u32).max(1);
    let new_height = ((height as f64 * scale) as u32).max(1);
    (new_width, new_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ChannelLayout;

    fn create_test_image(width: u32, height: u32, layout: ChannelLayout) -> PixelBuffer {
        let channels = layout.channels();
        let mut pixels = Vec::with_capacity(width as usize * height as usize * channels);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                if channels >= 3 {
                    pixels.push(((y * 255) / height.max(1)) as u8);
                    pixels.push(128);
                }
                if channels == 4 {
                    pixels.push(200);
                }
            }
        }
        PixelBuffer::new(width, height, layout, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50, ChannelLayout::Rgb);
        let resized = resize(&img, 50, 25, FilterType::Triangle).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_keeps_alpha_layout() {
        let img = create_test_image(40, 40, ChannelLayout::Rgba);
        let resized = resize(&img, 10, 10, FilterType::Lanczos3).unwrap();

        assert_eq!(resized.layout, ChannelLayout::Rgba);
        assert_eq!(resized.pixels.len(), 10 * 10 * 4);
        // Uniform alpha survives the filter.
        assert!(resized.pixels.chunks_exact(4).all(|p| p[3] == 200));
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50, ChannelLayout::Rgb);

        assert!(resize(&img, 0, 50, FilterType::Triangle).is_err());
        assert!(resize(&img, 50, 0, FilterType::Triangle).is_err());
    }

    #[test]
    fn test_fit_within_never_upscales() {
        let img = create_test_image(20, 10, ChannelLayout::Rgb);
        let fitted = resize_to_fit_within(&img, 300, 300, FilterType::Lanczos3).unwrap();

        assert_eq!((fitted.width, fitted.height), (20, 10));
        assert_eq!(fitted.pixels, img.pixels);
    }

    #[test]
    fn test_fit_within_constrained_by_width() {
        let img = create_test_image(200, 100, ChannelLayout::Rgb);
        let fitted = resize_to_fit_within(&img, 60, 60, FilterType::Lanczos3).unwrap();

        assert_eq!((fitted.width, fitted.height), (60, 30));
    }

    #[test]
    fn test_fit_within_constrained_by_height() {
        let img = create_test_image(100, 200, ChannelLayout::Rgb);
        let fitted = resize_to_fit_within(&img, 60, 60, FilterType::Lanczos3).unwrap();

        assert_eq!((fitted.width, fitted.height), (30, 60));
    }

    #[test]
    fn test_calculate_fit_dimensions_truncates() {
        // scale = 30 / 70 = 0.428..., 50 * 0.428 = 21.4 -> 21
        assert_eq!(calculate_fit_dimensions(70, 50, 30, 30), (30, 21));
    }

    #[test]
    fn test_calculate_fit_dimensions_minimum_one() {
        assert_eq!(calculate_fit_dimensions(1000, 10, 1, 1), (1, 1));
        assert_eq!(calculate_fit_dimensions(100, 100, 0, 0), (1, 1));
    }

    #[test]
    fn test_calculate_fit_dimensions_zero_input() {
        assert_eq!(calculate_fit_dimensions(0, 0, 256, 256), (0, 0));
    }
}
