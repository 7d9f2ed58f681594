//! Image decoding for the Pixkit pipeline.
//!
//! This module provides functionality for:
//! - Decoding standard raster formats (JPEG, PNG, WebP, BMP, TIFF)
//! - Applying the EXIF orientation so geometry sees the photo upright
//! - Resizing buffers in any channel layout
//!
//! Every pipeline starts here. All operations are synchronous; the caller
//! decides which thread they run on.

mod reader;
mod resize;
mod types;

pub use image::imageops::FilterType;
pub use reader::{decode, decode_preserving_alpha, get_orientation};
pub use resize::{calculate_fit_dimensions, resize, resize_to_fit_within};
pub use types::{ChannelLayout, DecodeError, Orientation, PixelBuffer};
