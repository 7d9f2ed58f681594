//! Color-vision-deficiency simulation with fixed 3x3 matrices.
//!
//! Each pixel's R, G, B samples are treated as a column vector and
//! multiplied by the mode's matrix (row = output channel). Results are
//! clamped to [0, 255] and truncated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decode::{ChannelLayout, PixelBuffer};
use crate::error::ToolkitError;

/// A 3x3 linear color transform, row-major, rows are output channels.
pub type ColorMatrix = [[f32; 3]; 3];

/// Red-green deficiency simulation.
pub const RED_GREEN_MATRIX: ColorMatrix = [
    [0.567, 0.433, 0.0],
    [0.558, 0.442, 0.0],
    [0.0, 0.242, 0.758],
];

/// Blue-green deficiency simulation.
pub const BLUE_GREEN_MATRIX: ColorMatrix = [
    [0.95, 0.05, 0.0],
    [0.0, 0.433, 0.567],
    [0.0, 0.475, 0.525],
];

/// Supported simulation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBlindMode {
    RedGreen,
    BlueGreen,
}

impl ColorBlindMode {
    /// All supported modes.
    pub const ALL: [ColorBlindMode; 2] = [ColorBlindMode::RedGreen, ColorBlindMode::BlueGreen];

    /// Wire name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorBlindMode::RedGreen => "red_green",
            ColorBlindMode::BlueGreen => "blue_green",
        }
    }

    pub fn matrix(self) -> &'static ColorMatrix {
        match self {
            ColorBlindMode::RedGreen => &RED_GREEN_MATRIX,
            ColorBlindMode::BlueGreen => &BLUE_GREEN_MATRIX,
        }
    }
}

impl fmt::Display for ColorBlindMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorBlindMode {
    type Err = ToolkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorBlindMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ToolkitError::UnsupportedMode(s.to_string()))
    }
}

/// Apply a 3x3 color matrix to every pixel.
///
/// Alpha is carried through unchanged. Luma input is expanded to RGB first,
/// since the transform mixes channels.
pub fn apply_color_matrix(image: &PixelBuffer, matrix: &ColorMatrix) -> PixelBuffer {
    let (layout, src_channels) = match image.layout {
        ChannelLayout::Luma => (ChannelLayout::Rgb, 1),
        other => (other, other.channels()),
    };
    let dst_channels = layout.channels();

    let mut output = Vec::with_capacity(image.pixel_count() * dst_channels);
    for px in image.pixels.chunks_exact(src_channels) {
        let rgb = if src_channels == 1 {
            [px[0] as f32; 3]
        } else {
            [px[0] as f32, px[1] as f32, px[2] as f32]
        };

        for row in matrix {
            let v = row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2];
            output.push(v.clamp(0.0, 255.0) as u8);
        }
        if layout.has_alpha() {
            output.push(px[3]);
        }
    }

    debug!(
        width = image.width,
        height = image.height,
        "Applied color matrix"
    );

    PixelBuffer::new(image.width, image.height, layout, output)
}

/// Simulate the named deficiency.
pub fn simulate_color_blindness(image: &PixelBuffer, mode: ColorBlindMode) -> PixelBuffer {
    apply_color_matrix(image, mode.matrix())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: output keeps dimensions and sample count.
        #[test]
        fn prop_preserves_shape(
            pixels in prop::collection::vec(any::<u8>(), 3 * 12),
            red_green in any::<bool>(),
        ) {
            let mode = if red_green { ColorBlindMode::RedGreen } else { ColorBlindMode::BlueGreen };
            let img = PixelBuffer::new(4, 3, ChannelLayout::Rgb, pixels);
            let out = simulate_color_blindness(&img, mode);
            prop_assert_eq!((out.width, out.height), (4, 3));
            prop_assert_eq!(out.pixels.len(), img.pixels.len());
        }

        /// Property: each output channel never exceeds the brightest input channel.
        #[test]
        fn prop_output_bounded_by_input(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let img = PixelBuffer::new(1, 1, ChannelLayout::Rgb, vec![r, g, b]);
            let max_in = r.max(g).max(b);
            for mode in ColorBlindMode::ALL {
                let out = simulate_color_blindness(&img, mode);
                prop_assert!(out.pixels.iter().all(|&v| v <= max_in));
            }
        }
    }
}
