//! SmartPic Core - image transform pipeline
//!
//! This crate provides the editing core behind the SmartPic browser editor:
//! decoding uploads, rotating, filtering, cropping and resizing them onto a
//! drawing surface, and encoding the result for download.
//!
//! # Module Structure
//!
//! - `decode` - Upload validation and decoding into RGBA bitmaps
//! - `encode` - PNG/JPEG/WebP export and download naming
//! - `render` - Affine rotation, CSS-style filters, crop overlay and crop commit
//! - `state` - The transform state value object
//! - `session` - One loaded image plus its state and surface
//! - `config` - Display bound, upload and resize limits
//!
//! # Examples
//!
//! ```ignore
//! use smartpic_core::{CropRegion, EditorSession, ExportFormat, ExportSettings};
//!
//! let mut session = EditorSession::new();
//! session.load(&bytes, "image/jpeg")?;
//! session.set_crop_mode(true);
//! session.set_crop_region(CropRegion::new(40, 40, 300, 200));
//! session.commit_crop()?;
//!
//! let exported = session.export(&ExportSettings::new(ExportFormat::WebP, 0.9), now_ms)?;
//! ```

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod render;
pub mod session;
pub mod state;

pub use config::EditorConfig;
pub use decode::{decode_image, Bitmap, DecodeError, InputFileError};
pub use encode::{encode_bitmap, EncodeError, ExportFormat, ExportSettings, ExportedImage};
pub use error::EditorError;
pub use render::{render, FilterExpr, Surface};
pub use session::EditorSession;
pub use state::{CropRegion, TransformState};
