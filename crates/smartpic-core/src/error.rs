//! Session-level error type.

use thiserror::Error;

use crate::decode::{DecodeError, InputFileError};
use crate::encode::EncodeError;

/// Failure of a single editor operation.
///
/// None of these leave the session half-updated: the operation that failed
/// had no effect.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Invalid input file: {0}")]
    InvalidInputFile(#[from] InputFileError),

    #[error("Failed to decode image: {0}")]
    DecodeFailure(#[from] DecodeError),

    #[error("Failed to export image: {0}")]
    EncodeFailure(#[from] EncodeError),

    /// A resize asked for a side outside `[1, max]`.
    #[error("Invalid dimensions {width}x{height}, each side must be between 1 and {max}")]
    InvalidDimensions { width: u32, height: u32, max: u32 },

    /// Crop commit requested with no region set.
    #[error("No crop region selected")]
    NoCropRegion,

    /// Crop commit requested outside crop mode.
    #[error("Crop mode is not active")]
    CropModeInactive,

    #[error("No image loaded")]
    NoImageLoaded,
}
