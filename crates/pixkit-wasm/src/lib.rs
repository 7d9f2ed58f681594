//! Pixkit WASM - WebAssembly bindings for Pixkit
//!
//! This crate exposes the pixkit-core transforms to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `types` - `JsPixelBuffer`, the image wrapper passed across the boundary
//! - `decode` - Decoding with EXIF orientation, optionally keeping alpha
//! - `encode` - PNG encoding
//! - `transform` - Rotation and document scanning
//! - `color` - Color-vision deficiency simulation
//! - `adjustments` - Brightness and contrast
//! - `watermark` - Overlay compositing
//!
//! Errors are thrown as strings of the form `kind: message`, where `kind`
//! is a stable identifier such as `decode_error` or `invalid_selection`.
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, scan_document, encode_png } from '@pixkit/wasm';
//!
//! await init();
//!
//! const photo = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const page = scan_document(photo, corners, 0);
//! const png = encode_png(page);
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod color;
mod decode;
mod encode;
mod transform;
mod types;
mod watermark;

// Re-export public types
pub use adjustments::{adjust_brightness, adjust_contrast};
pub use color::{color_vision_modes, simulate_color_vision};
pub use decode::{decode_image, decode_image_with_alpha, get_orientation};
pub use encode::encode_png;
pub use transform::{rotate_image, rotated_size, scan_document};
pub use types::JsPixelBuffer;
pub use watermark::apply_watermark;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
