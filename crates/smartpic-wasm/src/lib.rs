//! SmartPic WASM - WebAssembly bindings for SmartPic
//!
//! This crate exposes the smartpic-core editing pipeline to JavaScript.
//!
//! # Module Structure
//!
//! - `editor` - `JsImageEditor`, the stateful editing session
//! - `types` - WASM-compatible wrapper types for bitmaps and exports
//! - `decode` - Upload validation and standalone decoding
//! - `encode` - Standalone encoding and download naming
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImageEditor } from '@smartpic/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsImageEditor();
//! editor.load(new Uint8Array(await file.arrayBuffer()), file.type);
//! console.log(`Showing ${editor.width}x${editor.height}`);
//! ```

use std::fmt::Display;

use wasm_bindgen::prelude::*;

mod decode;
mod editor;
mod encode;
mod types;

// Re-export public types
pub use decode::{decode_image, validate_upload};
pub use editor::JsImageEditor;
pub use encode::{encode_image, export_file_name};
pub use types::{JsBitmap, JsExportedImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Convert an error into a `JsValue` string, reporting it on the browser
/// console first.
pub(crate) fn to_js_error(err: impl Display) -> JsValue {
    let message = err.to_string();
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
