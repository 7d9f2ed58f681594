//! Morphological closing of a binary mask.
//!
//! The structuring element is a `w x h` rectangle anchored at
//! `(w / 2, h / 2)`, so an even-sized element reaches further up and left
//! than down and right. Samples outside the image are ignored.

use image::{GrayImage, Luma};

/// A rectangular structuring element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Offsets covered by the element, relative to the anchor.
    fn offsets(self) -> (std::ops::RangeInclusive<i64>, std::ops::RangeInclusive<i64>) {
        let (ax, ay) = ((self.width / 2) as i64, (self.height / 2) as i64);
        (
            -ax..=self.width as i64 - 1 - ax,
            -ay..=self.height as i64 - 1 - ay,
        )
    }
}

fn rank_filter(
    image: &GrayImage,
    element: Rect,
    pick: fn(u8, u8) -> u8,
    init: u8,
) -> GrayImage {
    let (width, height) = image.dimensions();
    let (xs, ys) = element.offsets();

    GrayImage::from_fn(width, height, |x, y| {
        let mut acc = init;
        for dy in ys.clone() {
            let sy = y as i64 + dy;
            if sy < 0 || sy >= height as i64 {
                continue;
            }
            for dx in xs.clone() {
                let sx = x as i64 + dx;
                if sx < 0 || sx >= width as i64 {
                    continue;
                }
                acc = pick(acc, image.get_pixel(sx as u32, sy as u32)[0]);
            }
        }
        Luma([acc])
    })
}

/// Maximum over the structuring element.
pub fn dilate(image: &GrayImage, element: Rect) -> GrayImage {
    rank_filter(image, element, u8::max, u8::MIN)
}

/// Minimum over the structuring element.
pub fn erode(image: &GrayImage, element: Rect) -> GrayImage {
    rank_filter(image, element, u8::min, u8::MAX)
}

/// Dilate then erode, `iterations` times each.
///
/// Closes gaps narrower than the element without growing solid regions.
pub fn close(image: &GrayImage, element: Rect, iterations: u32) -> GrayImage {
    let mut out = image.clone();
    for _ in 0..iterations {
        out = dilate(&out, element);
    }
    for _ in 0..iterations {
        out = erode(&out, element);
    }
    out
}
