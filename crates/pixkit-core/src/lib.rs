//! Pixkit Core - Image processing library
//!
//! This crate provides the pixel pipeline behind Pixkit: EXIF-aware
//! decoding, rotation and perspective rectification, the document scan
//! look, color-vision simulation, tone adjustment, watermark compositing
//! and PNG encoding.
//!
//! The [`pipeline`] functions are the byte-in/byte-out entry points. The
//! individual transforms are public for callers that already hold a
//! [`PixelBuffer`].

pub mod adjustments;
pub mod color;
pub mod composite;
pub mod decode;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod luminance;
pub mod pipeline;
pub mod scan;
pub mod transform;

pub use adjustments::{adjust_brightness, adjust_contrast, adjust_tone};
pub use color::{apply_color_matrix, simulate_color_blindness, ColorBlindMode, ColorMatrix};
pub use composite::{composite, fit_overlay, overlay_placement, OverlaySpec};
pub use decode::{decode, decode_preserving_alpha, ChannelLayout, PixelBuffer};
pub use encode::encode_png;
pub use error::{Result, ToolkitError};
pub use geometry::{NormalizedPoint, Quadrilateral};
pub use pipeline::{
    process_brightness, process_color_blind, process_contrast, process_document_scan,
    process_document_scan_json, process_rotation, process_watermark,
};
pub use scan::apply_scan_effect;
pub use transform::{compute_rotated_bounds, order_corners, rectify, rotate, OrderedCorners};
