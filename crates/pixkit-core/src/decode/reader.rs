//! Raster decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use tracing::debug;

use super::{ChannelLayout, DecodeError, Orientation, PixelBuffer};

/// Decode an image from bytes into a 3-channel RGB buffer.
///
/// The embedded EXIF orientation is applied before returning, so the
/// buffer's top-left pixel is the visual top-left of the photo. Any alpha
/// channel in the source is discarded.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognized
/// raster format, `DecodeError::CorruptedFile` if decoding fails part way.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let img = decode_oriented(bytes)?;
    Ok(PixelBuffer::from_dynamic(img, ChannelLayout::Rgb))
}

/// Decode an image from bytes, keeping its alpha channel.
///
/// Sources with an alpha channel come back as RGBA. Grayscale sources are
/// promoted to fully opaque RGBA. Opaque color sources come back as RGB so
/// the caller can tell "no alpha" apart from "alpha everywhere 255".
pub fn decode_preserving_alpha(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let img = decode_oriented(bytes)?;
    let color = img.color();
    let layout = if color.has_alpha() || !color.has_color() {
        ChannelLayout::Rgba
    } else {
        ChannelLayout::Rgb
    };
    Ok(PixelBuffer::from_dynamic(img, layout))
}

/// Decode bytes and apply the EXIF orientation.
fn decode_oriented(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    debug!(
        width = img.width(),
        height = img.height(),
        ?orientation,
        "Decoded source image"
    );

    Ok(apply_orientation(img, orientation))
}

/// Extract EXIF orientation from encoded bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

/// Extract the EXIF orientation value from encoded bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}
