//! Crate-level error taxonomy.
//!
//! Component errors (`DecodeError`, `EncodeError`) convert into
//! [`ToolkitError`] with `?`, so every pipeline operation returns one closed
//! error type. Out-of-range numeric inputs are clamped and never reach here.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Every failure a pipeline operation can report.
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// The input bytes could not be decoded as a supported image.
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// The requested color-transform mode is not registered.
    #[error("unsupported mode: {0}")]
    UnsupportedMode(String),

    /// The corner payload is malformed or does not hold exactly 4 points.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// The selection collapses to nothing after conversion to pixels.
    #[error("selection too small: {width:.2}x{height:.2} pixels")]
    DegenerateSelection { width: f64, height: f64 },

    /// The overlay image has no pixels.
    #[error("invalid overlay: {0}")]
    InvalidOverlay(String),

    /// The result could not be serialized.
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),

    /// Any other internal failure.
    #[error("processing failed: {0}")]
    Processing(String),
}

impl ToolkitError {
    /// Stable identifier for the transport layer to map onto its own codes.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolkitError::Decode(_) => "decode_error",
            ToolkitError::UnsupportedMode(_) => "unsupported_mode",
            ToolkitError::InvalidSelection(_) => "invalid_selection",
            ToolkitError::DegenerateSelection { .. } => "degenerate_selection",
            ToolkitError::InvalidOverlay(_) => "invalid_overlay",
            ToolkitError::Encode(_) => "encode_error",
            ToolkitError::Processing(_) => "processing_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolkitError>;
