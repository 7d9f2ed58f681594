//! Core types for image decoding.

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The byte stream is not a recognized raster format.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Channel layout of a [`PixelBuffer`].
///
/// Channel order is always R, G, B (then A). Nothing in this crate stores
/// BGR data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelLayout {
    /// Single luminance channel, used by intermediate scan stages.
    Luma,
    /// Opaque color.
    Rgb,
    /// Color with a straight (non-premultiplied) alpha channel.
    Rgba,
}

impl ChannelLayout {
    /// Number of 8-bit samples per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Luma => 1,
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    #[inline]
    pub fn has_alpha(self) -> bool {
        self == ChannelLayout::Rgba
    }
}

/// A rectangular grid of 8-bit pixels.
///
/// Each transform consumes a buffer by reference and returns a new one;
/// the compositor is the only stage that writes into an existing buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Samples per pixel and their meaning.
    pub layout: ChannelLayout,
    /// Row-major samples, `width * height * layout.channels()` bytes.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new PixelBuffer with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, layout: ChannelLayout, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * layout.channels(),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            layout,
            pixels,
        }
    }

    /// Create a buffer where every pixel has the value `pixel`.
    ///
    /// `pixel` must hold exactly `layout.channels()` samples.
    pub fn filled(width: u32, height: u32, layout: ChannelLayout, pixel: &[u8]) -> Self {
        debug_assert_eq!(pixel.len(), layout.channels());
        let count = width as usize * height as usize;
        let pixels = pixel
            .iter()
            .copied()
            .cycle()
            .take(count * layout.channels())
            .collect();
        Self::new(width, height, layout, pixels)
    }

    /// Create a red-green-blue buffer from an image::RgbImage.
    pub fn from_rgb_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, ChannelLayout::Rgb, img.into_raw())
    }

    /// Create an RGBA buffer from an image::RgbaImage.
    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, ChannelLayout::Rgba, img.into_raw())
    }

    /// Create a luminance buffer from an image::GrayImage.
    pub fn from_gray_image(img: GrayImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, ChannelLayout::Luma, img.into_raw())
    }

    /// Convert to a DynamicImage of the matching layout.
    ///
    /// Returns `None` when the sample count does not match the dimensions.
    pub fn to_dynamic(&self) -> Option<DynamicImage> {
        let (w, h, data) = (self.width, self.height, self.pixels.clone());
        match self.layout {
            ChannelLayout::Luma => GrayImage::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
            ChannelLayout::Rgb => RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
            ChannelLayout::Rgba => RgbaImage::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
        }
    }

    /// Build a buffer from a DynamicImage in the requested layout.
    pub fn from_dynamic(img: DynamicImage, layout: ChannelLayout) -> Self {
        match layout {
            ChannelLayout::Luma => Self::from_gray_image(img.into_luma8()),
            ChannelLayout::Rgb => Self::from_rgb_image(img.into_rgb8()),
            ChannelLayout::Rgba => Self::from_rgba_image(img.into_rgba8()),
        }
    }

    /// Number of samples per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Borrow the samples of the pixel at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels();
        let idx = (y as usize * self.width as usize + x as usize) * c;
        &self.pixels[idx..idx + c]
    }

    /// Mutably borrow the samples of the pixel at (x, y).
    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let c = self.channels();
        let idx = (y as usize * self.width as usize + x as usize) * c;
        &mut self.pixels[idx..idx + c]
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
