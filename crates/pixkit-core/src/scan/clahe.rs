//! Contrast-limited adaptive histogram equalization.
//!
//! The image is split into a grid of tiles. Each tile gets its own
//! equalization table built from a clipped histogram, and every pixel is
//! mapped through a bilinear blend of the four nearest tile tables.

use image::{GrayImage, Luma};

use super::border::pad_reflect101;

const HIST_SIZE: usize = 256;

/// Equalize `image` tile by tile.
///
/// `clip_limit` is relative to a flat histogram: a tile of `n` pixels allows
/// at most `max(1, trunc(clip_limit * n / 256))` pixels per bin, with the
/// excess spread evenly over all bins. When the size is not a multiple of
/// the grid, the tables are computed over a mirrored extension of the image.
pub fn equalize_adaptive(image: &GrayImage, clip_limit: f64, grid: (u32, u32)) -> GrayImage {
    let (width, height) = image.dimensions();
    let (tiles_x, tiles_y) = (grid.0.max(1), grid.1.max(1));

    let padded;
    let source = if width % tiles_x == 0 && height % tiles_y == 0 {
        image
    } else {
        padded = pad_reflect101(
            image,
            0,
            tiles_y - height % tiles_y,
            0,
            tiles_x - width % tiles_x,
        );
        &padded
    };

    let tile_w = source.width() / tiles_x;
    let tile_h = source.height() / tiles_y;
    let tile_area = (tile_w * tile_h) as usize;

    let limit = if clip_limit > 0.0 {
        ((clip_limit * tile_area as f64 / HIST_SIZE as f64) as usize).max(1)
    } else {
        0
    };

    let mut luts = Vec::with_capacity((tiles_x * tiles_y) as usize);
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            luts.push(tile_lut(source, tx * tile_w, ty * tile_h, tile_w, tile_h, limit));
        }
    }

    interpolate(image, &luts, (tiles_x, tiles_y), (tile_w, tile_h))
}

/// Equalization table for one tile.
fn tile_lut(
    source: &GrayImage,
    x0: u32,
    y0: u32,
    tile_w: u32,
    tile_h: u32,
    limit: usize,
) -> [u8; HIST_SIZE] {
    let mut hist = [0usize; HIST_SIZE];
    for y in y0..y0 + tile_h {
        for x in x0..x0 + tile_w {
            hist[source.get_pixel(x, y)[0] as usize] += 1;
        }
    }

    if limit > 0 {
        let mut clipped = 0;
        for bin in hist.iter_mut() {
            if *bin > limit {
                clipped += *bin - limit;
                *bin = limit;
            }
        }

        let batch = clipped / HIST_SIZE;
        let mut residual = clipped - batch * HIST_SIZE;
        for bin in hist.iter_mut() {
            *bin += batch;
        }

        if residual != 0 {
            let step = (HIST_SIZE / residual).max(1);
            let mut i = 0;
            while i < HIST_SIZE && residual > 0 {
                hist[i] += 1;
                i += step;
                residual -= 1;
            }
        }
    }

    let scale = (HIST_SIZE - 1) as f32 / (tile_w * tile_h) as f32;
    let mut lut = [0u8; HIST_SIZE];
    let mut sum = 0usize;
    for (entry, &count) in lut.iter_mut().zip(hist.iter()) {
        sum += count;
        *entry = (sum as f32 * scale).round_ties_even().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Tile index pair and blend weight for one coordinate.
#[inline]
fn neighbours(pos: u32, inv_tile: f32, tiles: u32) -> (usize, usize, f32) {
    let f = pos as f32 * inv_tile - 0.5;
    let lo = f.floor();
    let weight = f - lo;
    let lo = lo as i64;
    let first = lo.max(0) as usize;
    let second = (lo + 1).min(tiles as i64 - 1) as usize;
    (first, second, weight)
}

fn interpolate(
    image: &GrayImage,
    luts: &[[u8; HIST_SIZE]],
    tiles: (u32, u32),
    tile_size: (u32, u32),
) -> GrayImage {
    let (width, height) = image.dimensions();
    let inv_tw = 1.0 / tile_size.0 as f32;
    let inv_th = 1.0 / tile_size.1 as f32;

    let columns: Vec<(usize, usize, f32)> = (0..width)
        .map(|x| neighbours(x, inv_tw, tiles.0))
        .collect();

    let mut output = GrayImage::new(width, height);
    for y in 0..height {
        let (ty1, ty2, ya) = neighbours(y, inv_th, tiles.1);
        let row1 = ty1 * tiles.0 as usize;
        let row2 = ty2 * tiles.0 as usize;

        for x in 0..width {
            let v = image.get_pixel(x, y)[0] as usize;
            let (tx1, tx2, xa) = columns[x as usize];

            let top = luts[row1 + tx1][v] as f32 * (1.0 - xa) + luts[row1 + tx2][v] as f32 * xa;
            let bottom = luts[row2 + tx1][v] as f32 * (1.0 - xa) + luts[row2 + tx2][v] as f32 * xa;
            let res = top * (1.0 - ya) + bottom * ya;

            output.put_pixel(x, y, Luma([res.round_ties_even().clamp(0.0, 255.0) as u8]));
        }
    }
    output
}
