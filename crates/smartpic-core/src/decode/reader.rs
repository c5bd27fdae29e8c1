//! Image decoding with EXIF orientation handling.
//!
//! The format is sniffed from the bytes, so PNG, JPEG, WebP, GIF and BMP are
//! all accepted through the same entry point. Browsers honour EXIF
//! orientation when they decode, so we do too.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use tracing::debug;

use super::{Bitmap, DecodeError, Orientation};

/// Decode image bytes into an RGBA bitmap, applying EXIF orientation.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are empty or no known
/// format signature matches.
/// Returns `DecodeError::CorruptedFile` if the format is recognized but the
/// data cannot be decoded.
pub fn decode_image(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    let bitmap = Bitmap::from_rgba_image(apply_orientation(img, orientation).into_rgba8());

    if bitmap.is_empty() {
        return Err(DecodeError::EmptyImage {
            width: bitmap.width,
            height: bitmap.height,
        });
    }

    debug!(
        width = bitmap.width,
        height = bitmap.height,
        ?orientation,
        "decoded image"
    );
    Ok(bitmap)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Returns `Orientation::Normal` when there is no EXIF block or no
/// orientation tag in it.
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
