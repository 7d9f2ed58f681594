//! Border extrapolation shared by the neighbourhood filters.

use image::{GrayImage, Luma};

/// Map a possibly out-of-range index into `0..len` by mirroring about the
/// edge pixels without repeating them (`gfedcb|abcdefgh|gfedcba`).
#[inline]
pub(crate) fn reflect101(index: i64, len: u32) -> u32 {
    if len <= 1 {
        return 0;
    }
    let n = len as i64;
    let mut i = index;
    while i < 0 || i >= n {
        i = if i < 0 { -i } else { 2 * n - 2 - i };
    }
    i as u32
}

/// Map a possibly out-of-range index into `0..len` by repeating the edge
/// pixel (`aaaaaa|abcdefgh|hhhhhhh`).
#[inline]
pub(crate) fn replicate(index: i64, len: u32) -> u32 {
    index.clamp(0, len as i64 - 1) as u32
}

/// Grow an image by mirrored borders.
pub(crate) fn pad_reflect101(
    image: &GrayImage,
    top: u32,
    bottom: u32,
    left: u32,
    right: u32,
) -> GrayImage {
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width + left + right, height + top + bottom, |x, y| {
        let sx = reflect101(x as i64 - left as i64, width);
        let sy = reflect101(y as i64 - top as i64, height);
        Luma([image.get_pixel(sx, sy)[0]])
    })
}
