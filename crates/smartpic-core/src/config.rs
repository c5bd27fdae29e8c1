//! Editor configuration.

use serde::{Deserialize, Serialize};

use crate::encode::DEFAULT_QUALITY;

/// Limits and defaults for an editor session.
///
/// Every field has a default, so a partial object from the front end
/// deserializes into a complete config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Largest canvas a freshly loaded image is shown at.
    pub max_display_width: u32,
    pub max_display_height: u32,
    /// Uploads must be strictly smaller than this.
    pub max_upload_bytes: usize,
    /// Region seeded when crop mode is switched on.
    pub default_crop_width: u32,
    pub default_crop_height: u32,
    /// Largest width or height a resize may request.
    pub max_resize_dimension: u32,
    pub default_export_quality: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_display_width: 800,
            max_display_height: 600,
            max_upload_bytes: 10 * 1024 * 1024,
            default_crop_width: 200,
            default_crop_height: 150,
            max_resize_dimension: 5000,
            default_export_quality: DEFAULT_QUALITY,
        }
    }
}

impl EditorConfig {
    pub fn display_bound(&self) -> (u32, u32) {
        (self.max_display_width, self.max_display_height)
    }

    pub fn default_crop_size(&self) -> (u32, u32) {
        (self.default_crop_width, self.default_crop_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.display_bound(), (800, 600));
        assert_eq!(config.default_crop_size(), (200, 150));
        assert_eq!(config.max_upload_bytes, 10_485_760);
        assert_eq!(config.max_resize_dimension, 5000);
        assert_eq!(config.default_export_quality, 0.8);
    }
}
