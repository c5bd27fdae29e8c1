//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`validate_upload`] - Check a picked file's MIME type and size
//! - [`decode_image`] - Decode PNG/JPEG/WebP/GIF/BMP bytes into an RGBA bitmap
//!
//! # Example
//!
//! ```typescript
//! import { validate_upload, decode_image } from '@smartpic/wasm';
//!
//! validate_upload(file.type, file.size);
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::JsBitmap;
use crate::to_js_error;
use smartpic_core::{decode, EditorConfig};
use wasm_bindgen::prelude::*;

/// Check an upload against the default limits: the MIME type must be
/// `image/*` and the size strictly under 10 MiB.
#[wasm_bindgen]
pub fn validate_upload(mime: &str, size: usize) -> Result<(), JsValue> {
    decode::validate_upload(mime, size, EditorConfig::default().max_upload_bytes)
        .map_err(to_js_error)
}

/// Decode image bytes, applying EXIF orientation.
///
/// # Errors
///
/// Returns an error if the bytes are empty, in an unrecognized format, or
/// corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsBitmap, JsValue> {
    decode::decode_image(bytes)
        .map(JsBitmap::from_bitmap)
        .map_err(to_js_error)
}
