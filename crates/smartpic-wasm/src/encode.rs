//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_image`] - Encode a `JsBitmap` as PNG, JPEG or WebP
//! - [`export_file_name`] - The download name for a format and timestamp
//!
//! # Example
//!
//! ```typescript
//! import { encode_image, export_file_name } from '@smartpic/wasm';
//!
//! const bytes = encode_image(bitmap, 'image/jpeg', 0.8);
//! saveAs(new Blob([bytes], { type: 'image/jpeg' }), export_file_name('jpeg', Date.now()));
//! ```

use crate::to_js_error;
use crate::types::{parse_format, JsBitmap};
use smartpic_core::encode::{self, ExportSettings};
use smartpic_core::EncodeError;
use wasm_bindgen::prelude::*;

/// Encode a bitmap.
///
/// `format` is a MIME type or a bare name (`png`, `jpeg`, `webp`). `quality`
/// in `(0, 1]` applies to JPEG; other values fall back to 0.92.
#[wasm_bindgen]
pub fn encode_image(image: &JsBitmap, format: &str, quality: f32) -> Result<Vec<u8>, JsValue> {
    encode_js_bitmap(image, format, quality).map_err(to_js_error)
}

/// `edited_image_<timestamp_ms>.<ext>` for the given format.
#[wasm_bindgen]
pub fn export_file_name(format: &str, timestamp_ms: f64) -> Result<String, JsValue> {
    let format = parse_format(format).map_err(to_js_error)?;
    Ok(encode::export_file_name(format, timestamp_ms as u64))
}

fn encode_js_bitmap(image: &JsBitmap, format: &str, quality: f32) -> Result<Vec<u8>, EncodeError> {
    let settings = ExportSettings::new(parse_format(format)?, quality);
    let bitmap = image.to_bitmap().ok_or(EncodeError::InvalidPixelData {
        expected: smartpic_core::Bitmap::buffer_len(image.width(), image.height()),
        actual: image.byte_length(),
    })?;
    encode::encode_bitmap(&bitmap, &settings)
}
