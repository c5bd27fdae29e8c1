//! Image decoding for the editor.
//!
//! This module provides functionality for:
//! - Validating an upload's reported MIME type and size
//! - Decoding PNG, JPEG, WebP, GIF and BMP bytes into an RGBA [`Bitmap`]
//! - Correcting EXIF orientation during decode
//!
//! # Architecture
//!
//! Decoding is the one step the browser front end awaits (file bytes arrive
//! asynchronously). Once bytes are available the call here is synchronous.
//!
//! # Examples
//!
//! ```ignore
//! use smartpic_core::decode::{decode_image, validate_upload};
//!
//! validate_upload("image/png", bytes.len(), 10 * 1024 * 1024)?;
//! let bitmap = decode_image(&bytes)?;
//! println!("Decoded {}x{} image", bitmap.width, bitmap.height);
//! ```

mod reader;
mod types;
mod validate;

pub use reader::decode_image;
pub use types::{Bitmap, DecodeError, InputFileError, Orientation};
pub use validate::validate_upload;
