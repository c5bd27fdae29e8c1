//! Image encoding for export.
//!
//! This module provides functionality for:
//! - Encoding a bitmap as PNG, JPEG or WebP
//! - Mapping a `(0, 1]` quality onto the JPEG encoder's 1-100 scale
//! - Naming the downloaded file
//!
//! # Architecture
//!
//! The codec itself is the `image` crate's; nothing here implements a
//! compression algorithm. All operations are synchronous.
//!
//! # Examples
//!
//! ```ignore
//! use smartpic_core::encode::{ExportFormat, ExportSettings, ExportedImage};
//!
//! let settings = ExportSettings::new(ExportFormat::Jpeg, 0.8);
//! let exported = ExportedImage::encode(&bitmap, &settings, now_ms)?;
//! println!("{} ({} bytes)", exported.file_name, exported.bytes.len());
//! ```

mod encoder;
mod export;
mod types;

pub use encoder::encode_bitmap;
pub use export::{export_file_name, ExportedImage, FILE_NAME_PREFIX};
pub use types::{EncodeError, ExportFormat, ExportSettings, DEFAULT_QUALITY, FALLBACK_QUALITY};
