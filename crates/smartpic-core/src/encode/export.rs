//! Export results: encoded bytes plus a suggested download name.

use super::{encode_bitmap, EncodeError, ExportFormat, ExportSettings};
use crate::decode::Bitmap;

/// Prefix of every suggested download name.
pub const FILE_NAME_PREFIX: &str = "edited_image_";

/// An encoded image ready to be handed to a download trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub format: ExportFormat,
}

impl ExportedImage {
    /// Encode `bitmap` and name the result after `timestamp_ms`.
    pub fn encode(
        bitmap: &Bitmap,
        settings: &ExportSettings,
        timestamp_ms: u64,
    ) -> Result<Self, EncodeError> {
        let bytes = encode_bitmap(bitmap, settings)?;
        Ok(Self {
            bytes,
            file_name: export_file_name(settings.format, timestamp_ms),
            format: settings.format,
        })
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// `edited_image_<unix-timestamp-ms>.<ext>`
pub fn export_file_name(format: ExportFormat, timestamp_ms: u64) -> String {
    format!("{FILE_NAME_PREFIX}{timestamp_ms}.{}", format.extension())
}
