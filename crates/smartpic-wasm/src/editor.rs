//! The editor session exposed to JavaScript.
//!
//! `JsImageEditor` owns one [`EditorSession`]. Every control in the front end
//! maps onto one method here; after each call the front end reads
//! `pixels()` and paints them into its `<canvas>` with `putImageData`.
//!
//! # Example
//!
//! ```typescript
//! import { JsImageEditor } from '@smartpic/wasm';
//!
//! const editor = new JsImageEditor();
//! editor.load(new Uint8Array(await file.arrayBuffer()), file.type);
//!
//! editor.rotate_right();
//! editor.set_brightness(20);
//!
//! const frame = new ImageData(
//!   new Uint8ClampedArray(editor.pixels()), editor.width, editor.height);
//! ctx.putImageData(frame, 0, 0);
//!
//! const exported = editor.export('image/jpeg', 0.8);
//! saveAs(new Blob([exported.bytes()], { type: exported.mime_type }), exported.file_name);
//! ```

use crate::to_js_error;
use crate::types::{parse_format, JsExportedImage};
use smartpic_core::{CropRegion, EditorConfig, EditorSession, ExportSettings};
use wasm_bindgen::prelude::*;

/// A single-image editing session for JavaScript.
#[wasm_bindgen]
pub struct JsImageEditor {
    inner: EditorSession,
}

impl Default for JsImageEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsImageEditor {
    /// Create an editor with the default limits.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: EditorSession::new(),
        }
    }

    /// Create an editor from a (possibly partial) config object, e.g.
    /// `{ maxDisplayWidth: 1024, maxUploadBytes: 5242880 }`.
    pub fn with_config(config: JsValue) -> Result<JsImageEditor, JsValue> {
        let config: EditorConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| to_js_error(format!("Invalid editor config: {e}")))?;
        Ok(Self {
            inner: EditorSession::with_config(config),
        })
    }

    /// Validate and decode an uploaded file, replacing the current image.
    ///
    /// On failure the previous image stays loaded.
    pub fn load(&mut self, bytes: &[u8], mime: &str) -> Result<(), JsValue> {
        self.inner.load(bytes, mime).map(|_| ()).map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    /// Current canvas width, 0 when nothing is loaded.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        if self.inner.is_loaded() {
            self.inner.surface().width()
        } else {
            0
        }
    }

    /// Current canvas height, 0 when nothing is loaded.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        if self.inner.is_loaded() {
            self.inner.surface().height()
        } else {
            0
        }
    }

    /// Width of the image as loaded, 0 when nothing is loaded.
    #[wasm_bindgen(getter)]
    pub fn natural_width(&self) -> u32 {
        self.inner.natural_size().map_or(0, |(w, _)| w)
    }

    /// Height of the image as loaded, 0 when nothing is loaded.
    #[wasm_bindgen(getter)]
    pub fn natural_height(&self) -> u32 {
        self.inner.natural_size().map_or(0, |(_, h)| h)
    }

    /// The rendered frame as RGBA bytes (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.surface().pixels().to_vec()
    }

    /// The transform state as a plain object, or `null` when nothing is loaded.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        match self.inner.state() {
            Some(state) => serde_wasm_bindgen::to_value(state).map_err(to_js_error),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn rotate_left(&mut self) {
        self.inner.rotate_left();
    }

    pub fn rotate_right(&mut self) {
        self.inner.rotate_right();
    }

    /// Brightness offset in `[-100, 100]`; out-of-range values are clamped.
    pub fn set_brightness(&mut self, value: i32) {
        self.inner.set_brightness(value);
    }

    /// Contrast offset in `[-100, 100]`; out-of-range values are clamped.
    pub fn set_contrast(&mut self, value: i32) {
        self.inner.set_contrast(value);
    }

    pub fn set_crop_mode(&mut self, active: bool) {
        self.inner.set_crop_mode(active);
    }

    /// Flip crop mode, returning whether it is now on.
    pub fn toggle_crop_mode(&mut self) -> bool {
        self.inner.toggle_crop_mode()
    }

    /// Set the pending crop region. It is clamped to the canvas; read
    /// `state().cropRegion` for the effective value.
    pub fn set_crop_region(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.inner
            .set_crop_region(CropRegion::new(x, y, width, height));
    }

    /// Bake the pending crop region into the image.
    pub fn commit_crop(&mut self) -> Result<(), JsValue> {
        self.inner.commit_crop().map(|_| ()).map_err(to_js_error)
    }

    /// Resize the canvas; each side must be between 1 and the configured
    /// `maxResizeDimension`.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.inner.resize(width, height).map_err(to_js_error)
    }

    /// Height that keeps the loaded image's aspect ratio at `width`.
    pub fn height_for_width(&self, width: u32) -> Result<u32, JsValue> {
        self.inner.height_for_width(width).map_err(to_js_error)
    }

    /// Restore the originally loaded image and clear every edit.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Encode the current frame for download.
    ///
    /// `format` is a MIME type (`image/png`, `image/jpeg`, `image/webp`) or a
    /// bare name. The file name is stamped with the current time.
    pub fn export(&self, format: &str, quality: f32) -> Result<JsExportedImage, JsValue> {
        let format = parse_format(format).map_err(to_js_error)?;
        let settings = ExportSettings::new(format, quality);
        let timestamp_ms = js_sys::Date::now() as u64;

        self.inner
            .export(&settings, timestamp_ms)
            .map(JsExportedImage::from)
            .map_err(to_js_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartpic_core::Bitmap;

    fn editor_with(width: u32, height: u32) -> JsImageEditor {
        let mut editor = JsImageEditor::new();
        editor
            .inner
            .load_bitmap(Bitmap::filled(width, height, [40, 80, 120, 255]));
        editor
    }

    #[test]
    fn test_empty_editor() {
        let editor = JsImageEditor::new();
        assert!(!editor.is_loaded());
        assert_eq!((editor.width(), editor.height()), (0, 0));
        assert_eq!(editor.natural_width(), 0);
        assert_eq!(editor.natural_height(), 0);
    }

    #[test]
    fn test_dimensions_follow_session() {
        let editor = editor_with(1600, 900);
        assert!(editor.is_loaded());
        assert_eq!((editor.width(), editor.height()), (800, 450));
        assert_eq!((editor.natural_width(), editor.natural_height()), (1600, 900));
        assert_eq!(editor.pixels().len(), 800 * 450 * 4);
    }

    #[test]
    fn test_controls_forward_to_session() {
        let mut editor = editor_with(100, 100);
        editor.rotate_left();
        editor.set_brightness(-250);
        editor.set_contrast(35);
        assert!(editor.toggle_crop_mode());
        editor.set_crop_region(10, 10, 500, 500);

        let state = editor.inner.state().unwrap();
        assert_eq!(state.rotation_degrees, 270);
        assert_eq!(state.brightness, -100);
        assert_eq!(state.contrast, 35);
        assert!(state.crop_mode);
        assert_eq!(state.crop_region, Some(CropRegion::new(10, 10, 90, 90)));
    }

    #[test]
    fn test_reset_clears_edits() {
        let mut editor = editor_with(100, 100);
        editor.rotate_right();
        editor.set_contrast(50);
        editor.reset();
        assert!(editor.inner.state().unwrap().is_identity());
    }
}
