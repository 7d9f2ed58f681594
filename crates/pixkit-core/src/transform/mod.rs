//! Geometric transforms: rotation and perspective rectification.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Corners are in pixel coordinates, already scaled from normalized input
//! - Origin is top-left corner

mod perspective;
mod rotation;
mod sample;

pub use perspective::{order_corners, rectify, OrderedCorners};
pub use rotation::{compute_rotated_bounds, rotate};
