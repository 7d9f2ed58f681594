//! Image encoding for Pixkit.
//!
//! Every operation returns its result as PNG bytes. PNG is lossless, so
//! `decode(encode_png(buffer))` reproduces the buffer exactly.

mod png;

pub use png::{encode_png, EncodeError};
