//! Normalized coordinates supplied by callers.
//!
//! Points arrive as fractions of the image size, `(0, 0)` top-left and
//! `(1, 1)` bottom-right. Out-of-range values are clamped, not rejected.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolkitError};

/// A position relative to image width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates clamped to [0, 1].
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }

    /// Pixel coordinates for an image of the given size, after clamping.
    pub fn to_pixels(self, width: u32, height: u32) -> (f64, f64) {
        let p = self.clamped();
        (p.x * width as f64, p.y * height as f64)
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Exactly four corner points of a document, in any order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrilateral {
    points: [NormalizedPoint; 4],
}

impl Quadrilateral {
    /// Build a quadrilateral from a caller-supplied point list.
    ///
    /// # Errors
    ///
    /// `ToolkitError::InvalidSelection` if there are not exactly 4 points or
    /// a coordinate is not a finite number.
    pub fn from_points(points: &[NormalizedPoint]) -> Result<Self> {
        let points: [NormalizedPoint; 4] = points.try_into().map_err(|_| {
            ToolkitError::InvalidSelection(format!(
                "expected 4 corner points, got {}",
                points.len()
            ))
        })?;

        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(ToolkitError::InvalidSelection(format!(
                "corner coordinates must be finite, got ({}, {})",
                bad.x, bad.y
            )));
        }

        Ok(Self { points })
    }

    /// Parse a JSON array of `{"x": .., "y": ..}` objects.
    pub fn from_json(payload: &str) -> Result<Self> {
        let points: Vec<NormalizedPoint> = serde_json::from_str(payload)
            .map_err(|e| ToolkitError::InvalidSelection(format!("malformed points payload: {e}")))?;
        Self::from_points(&points)
    }

    pub fn points(&self) -> &[NormalizedPoint; 4] {
        &self.points
    }

    /// Corner positions in pixels for an image of the given size.
    pub fn to_pixels(&self, width: u32, height: u32) -> [(f64, f64); 4] {
        self.points.map(|p| p.to_pixels(width, height))
    }
}
