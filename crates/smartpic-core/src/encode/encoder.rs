//! Bitmap encoding through the `image` crate's codecs.
//!
//! PNG and WebP keep the alpha channel. JPEG has none, so transparent pixels
//! are composited onto black first, which is what browsers do when a canvas
//! is exported as JPEG.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::{debug, warn};

use super::{EncodeError, ExportFormat, ExportSettings};
use crate::decode::Bitmap;

/// Encode a bitmap according to `settings`.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for zero-sized bitmaps,
/// `EncodeError::InvalidPixelData` when the buffer does not match the
/// dimensions, and `EncodeError::EncodingFailed` when the codec rejects it.
pub fn encode_bitmap(bitmap: &Bitmap, settings: &ExportSettings) -> Result<Vec<u8>, EncodeError> {
    let Bitmap {
        width,
        height,
        ref pixels,
    } = *bitmap;

    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = Bitmap::buffer_len(width, height);
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let format = settings.format;
    let mut buffer = Cursor::new(Vec::new());

    let result = match format {
        ExportFormat::Png => PngEncoder::new(&mut buffer).write_image(
            pixels,
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        ExportFormat::Jpeg => {
            let rgb = flatten_onto_black(pixels);
            JpegEncoder::new_with_quality(&mut buffer, settings.quality_percent()).write_image(
                &rgb,
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
        ExportFormat::WebP => WebPEncoder::new_lossless(&mut buffer).write_image(
            pixels,
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
    };

    if let Err(e) = result {
        warn!(%format, error = %e, "encoder rejected bitmap");
        return Err(EncodeError::EncodingFailed {
            format,
            reason: e.to_string(),
        });
    }

    let bytes = buffer.into_inner();
    debug!(%format, width, height, size = bytes.len(), "encoded bitmap");
    Ok(bytes)
}

/// Drop alpha by compositing each pixel over opaque black.
fn flatten_onto_black(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let alpha = px[3] as u32;
        for &c in &px[..3] {
            rgb.push(((c as u32 * alpha + 127) / 255) as u8);
        }
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_image;

    fn settings(format: ExportFormat, quality: f32) -> ExportSettings {
        ExportSettings::new(format, quality)
    }

    #[test]
    fn test_encode_png_signature() {
        let bitmap = Bitmap::filled(16, 8, [10, 20, 30, 255]);
        let bytes = encode_bitmap(&bitmap, &settings(ExportFormat::Png, 1.0)).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let bitmap = Bitmap::filled(16, 16, [128, 128, 128, 255]);
        let bytes = encode_bitmap(&bitmap, &settings(ExportFormat::Jpeg, 0.9)).unwrap();

        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
        assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_webp_riff_header() {
        let bitmap = Bitmap::filled(4, 4, [0, 0, 255, 128]);
        let bytes = encode_bitmap(&bitmap, &settings(ExportFormat::WebP, 0.5)).unwrap();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
    }

    #[test]
    fn test_png_preserves_pixels_exactly() {
        let mut bitmap = Bitmap::blank(3, 2);
        bitmap.set_pixel(1, 1, [1, 2, 3, 4]);

        let bytes = encode_bitmap(&bitmap, &settings(ExportFormat::Png, 1.0)).unwrap();
        assert_eq!(decode_image(&bytes).unwrap(), bitmap);
    }

    #[test]
    fn test_webp_preserves_pixels_exactly() {
        let bitmap = Bitmap::filled(5, 3, [200, 100, 50, 255]);
        let bytes = encode_bitmap(&bitmap, &settings(ExportFormat::WebP, 0.1)).unwrap();
        assert_eq!(decode_image(&bytes).unwrap(), bitmap);
    }

    #[test]
    fn test_jpeg_half_quality_white_canvas_dimensions() {
        let bitmap = Bitmap::filled(10, 10, [255, 255, 255, 255]);
        let bytes = encode_bitmap(&bitmap, &settings(ExportFormat::Jpeg, 0.5)).unwrap();

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (10, 10));
    }

    #[test]
    fn test_jpeg_quality_affects_size() {
        let mut bitmap = Bitmap::blank(64, 64);
        for y in 0..64 {
            for x in 0..64 {
                bitmap.set_pixel(x, y, [(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8, 255]);
            }
        }

        let low = encode_bitmap(&bitmap, &settings(ExportFormat::Jpeg, 0.1)).unwrap();
        let high = encode_bitmap(&bitmap, &settings(ExportFormat::Jpeg, 1.0)).unwrap();
        assert!(high.len() > low.len());
    }

    #[test]
    fn test_invalid_dimensions() {
        let bitmap = Bitmap::new(0, 10, vec![]);
        let result = encode_bitmap(&bitmap, &ExportSettings::default());
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_invalid_pixel_data() {
        let bitmap = Bitmap {
            width: 10,
            height: 10,
            pixels: vec![0u8; 10 * 9 * 4],
        };
        let result = encode_bitmap(&bitmap, &ExportSettings::default());
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 400,
                actual: 360
            })
        ));
    }

    #[test]
    fn test_flatten_onto_black() {
        let rgb = flatten_onto_black(&[255, 255, 255, 255, 255, 128, 0, 128, 90, 90, 90, 0]);
        assert_eq!(rgb, vec![255, 255, 255, 128, 64, 0, 0, 0, 0]);
    }
}
