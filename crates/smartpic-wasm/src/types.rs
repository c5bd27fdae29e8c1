//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core SmartPic
//! types, handling the conversion between Rust and JavaScript representations.

use smartpic_core::{Bitmap, EncodeError, ExportFormat, ExportedImage};
use wasm_bindgen::prelude::*;

/// An RGBA bitmap wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. `pixels()` copies it out as a
/// `Uint8Array`, which can be handed straight to `new ImageData(...)`.
#[wasm_bindgen]
pub struct JsBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create a bitmap from dimensions and RGBA pixel data (4 bytes per pixel,
    /// row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsBitmap {
        JsBitmap {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional: wasm-bindgen's finalizer handles cleanup automatically.
    pub fn free(self) {}
}

impl JsBitmap {
    pub(crate) fn from_bitmap(bitmap: Bitmap) -> Self {
        Self {
            width: bitmap.width,
            height: bitmap.height,
            pixels: bitmap.pixels,
        }
    }

    /// Borrow the pixels as a core bitmap, or `None` when the buffer length
    /// doesn't match the dimensions.
    pub(crate) fn to_bitmap(&self) -> Option<Bitmap> {
        (self.pixels.len() == Bitmap::buffer_len(self.width, self.height))
            .then(|| Bitmap::new(self.width, self.height, self.pixels.clone()))
    }
}

/// An encoded export ready for a download trigger.
#[wasm_bindgen]
pub struct JsExportedImage {
    bytes: Vec<u8>,
    file_name: String,
    format: ExportFormat,
}

#[wasm_bindgen]
impl JsExportedImage {
    /// Encoded file bytes as Uint8Array (a copy).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Suggested download name, `edited_image_<timestamp>.<ext>`.
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }

    /// MIME type for the download `Blob`.
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.format.mime_type().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }
}

impl From<ExportedImage> for JsExportedImage {
    fn from(exported: ExportedImage) -> Self {
        Self {
            bytes: exported.bytes,
            file_name: exported.file_name,
            format: exported.format,
        }
    }
}

/// Parse a format given either as a MIME type (`image/webp`) or a bare name
/// (`webp`), as a `<select>` in the front end may supply either.
pub(crate) fn parse_format(value: &str) -> Result<ExportFormat, EncodeError> {
    if value.contains('/') {
        ExportFormat::from_mime(value)
    } else {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_bitmap_creation() {
        let img = JsBitmap::new(100, 50, vec![0u8; 100 * 50 * 4]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 20000);
    }

    #[test]
    fn test_from_bitmap() {
        let js_img = JsBitmap::from_bitmap(Bitmap::filled(3, 2, [1, 2, 3, 4]));
        assert_eq!(js_img.width(), 3);
        assert_eq!(js_img.height(), 2);
        assert_eq!(&js_img.pixels()[..4], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_to_bitmap_checks_length() {
        let good = JsBitmap::new(2, 2, vec![9u8; 16]);
        assert_eq!(good.to_bitmap().unwrap().dimensions(), (2, 2));

        let bad = JsBitmap::new(2, 2, vec![9u8; 12]);
        assert!(bad.to_bitmap().is_none());
    }

    #[test]
    fn test_exported_image_conversion() {
        let exported = ExportedImage {
            bytes: vec![1, 2, 3],
            file_name: "edited_image_1.webp".into(),
            format: ExportFormat::WebP,
        };
        let js = JsExportedImage::from(exported);
        assert_eq!(js.file_name(), "edited_image_1.webp");
        assert_eq!(js.mime_type(), "image/webp");
        assert_eq!(js.byte_length(), 3);
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("image/jpeg").unwrap(), ExportFormat::Jpeg);
        assert_eq!(parse_format("png").unwrap(), ExportFormat::Png);
        assert_eq!(parse_format("WEBP").unwrap(), ExportFormat::WebP);
        assert!(parse_format("image/tiff").is_err());
        assert!(parse_format("gif").is_err());
    }
}
