//! Export format and settings types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Quality used when the requested value is outside `(0, 1]`.
pub const FALLBACK_QUALITY: f32 = 0.92;

/// Quality used when none is chosen.
pub const DEFAULT_QUALITY: f32 = 0.8;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The requested MIME type has no encoder
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// The codec rejected the buffer
    #[error("{format} encoding failed: {reason}")]
    EncodingFailed { format: ExportFormat, reason: String },
}

/// Output formats offered by the exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Lossless, keeps transparency.
    #[default]
    Png,
    /// Lossy, no alpha channel.
    Jpeg,
    /// Written losslessly by the codec; keeps transparency.
    WebP,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::WebP];

    /// MIME type, e.g. `image/jpeg`.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::WebP => "image/webp",
        }
    }

    /// File extension: the MIME subtype.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
            ExportFormat::WebP => "webp",
        }
    }

    /// Whether the quality setting changes the output.
    pub fn is_lossy(self) -> bool {
        matches!(self, ExportFormat::Jpeg)
    }

    /// Parse a MIME type such as `image/webp`.
    pub fn from_mime(mime: &str) -> Result<Self, EncodeError> {
        let subtype = mime
            .trim()
            .to_ascii_lowercase()
            .strip_prefix("image/")
            .map(str::to_string)
            .ok_or_else(|| EncodeError::UnsupportedFormat(mime.to_string()))?;
        subtype.parse()
    }
}

impl FromStr for ExportFormat {
    type Err = EncodeError;

    /// Accepts a bare format name (`png`, `jpeg`, `jpg`, `webp`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
            "webp" => Ok(ExportFormat::WebP),
            other => Err(EncodeError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Jpeg => "JPEG",
            ExportFormat::WebP => "WebP",
        };
        f.write_str(name)
    }
}

/// Format and quality chosen for an export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    pub format: ExportFormat,
    /// Quality in `(0, 1]`, only used by lossy formats.
    pub quality: f32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            quality: DEFAULT_QUALITY,
        }
    }
}

impl ExportSettings {
    pub fn new(format: ExportFormat, quality: f32) -> Self {
        Self { format, quality }
    }

    /// Quality actually handed to the encoder.
    ///
    /// Values outside `(0, 1]` (and NaN) fall back to [`FALLBACK_QUALITY`].
    pub fn effective_quality(&self) -> f32 {
        if self.quality > 0.0 && self.quality <= 1.0 {
            self.quality
        } else {
            FALLBACK_QUALITY
        }
    }

    /// Effective quality on the codec's 1-100 scale.
    pub fn quality_percent(&self) -> u8 {
        ((self.effective_quality() * 100.0).round() as u8).clamp(1, 100)
    }
}
