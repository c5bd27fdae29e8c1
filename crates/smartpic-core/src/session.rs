//! The editor session: one loaded image, its transform state and the surface
//! it renders to.
//!
//! Every mutating operation computes the new state first and only swaps it in
//! once nothing else can fail, then re-renders. A failed operation leaves the
//! session exactly as it was.
//!
//! # Examples
//!
//! ```ignore
//! use smartpic_core::{EditorSession, ExportSettings};
//!
//! let mut session = EditorSession::new();
//! session.load(&bytes, "image/png")?;
//! session.rotate_right();
//! session.set_brightness(20);
//! let exported = session.export(&ExportSettings::default(), now_ms)?;
//! ```

use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::decode::{decode_image, validate_upload, Bitmap};
use crate::encode::{ExportFormat, ExportSettings, ExportedImage};
use crate::error::EditorError;
use crate::geometry::{fit_within, height_for_width};
use crate::render::{self, Surface};
use crate::state::{CropRegion, TransformState};

/// The image currently being edited.
#[derive(Debug, Clone)]
struct LoadedImage {
    /// As decoded, kept for `reset`.
    original: Bitmap,
    /// What the pipeline draws; replaced by crop commits.
    source: Bitmap,
    state: TransformState,
}

/// A single-image editing session.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    image: Option<LoadedImage>,
    surface: Surface,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            config,
            image: None,
            surface: Surface::new(1, 1),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Validate, decode and load an uploaded file.
    ///
    /// Returns the canvas size the image is displayed at. On failure the
    /// previously loaded image (if any) stays loaded.
    pub fn load(&mut self, bytes: &[u8], mime: &str) -> Result<(u32, u32), EditorError> {
        validate_upload(mime, bytes.len(), self.config.max_upload_bytes)?;
        let bitmap = decode_image(bytes)?;
        Ok(self.load_bitmap(bitmap))
    }

    /// Load an already decoded bitmap, replacing any current image.
    pub fn load_bitmap(&mut self, bitmap: Bitmap) -> (u32, u32) {
        let (width, height) = self.fit_to_display(&bitmap);
        info!(
            natural_width = bitmap.width,
            natural_height = bitmap.height,
            width,
            height,
            "image loaded"
        );

        self.image = Some(LoadedImage {
            source: bitmap.clone(),
            original: bitmap,
            state: TransformState::identity(width, height),
        });
        self.render();
        (width, height)
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    pub fn state(&self) -> Option<&TransformState> {
        self.image.as_ref().map(|img| &img.state)
    }

    /// The last rendered frame, including the crop overlay when active.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn source(&self) -> Option<&Bitmap> {
        self.image.as_ref().map(|img| &img.source)
    }

    /// Dimensions of the image as it was loaded.
    pub fn natural_size(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|img| img.original.dimensions())
    }

    /// Export settings pre-filled from the config.
    pub fn default_export_settings(&self) -> ExportSettings {
        ExportSettings::new(ExportFormat::default(), self.config.default_export_quality)
    }

    /// Redraw the surface from the current source and state.
    pub fn render(&mut self) {
        let Some(img) = &self.image else {
            debug!("render requested with no image loaded");
            return;
        };
        render::render(&mut self.surface, Some(&img.source), &img.state);
    }

    pub fn rotate_left(&mut self) {
        self.update(TransformState::rotated_left);
    }

    pub fn rotate_right(&mut self) {
        self.update(TransformState::rotated_right);
    }

    /// Set the brightness offset, clamped to `[-100, 100]`.
    pub fn set_brightness(&mut self, brightness: i32) {
        self.update(|state| state.with_brightness(brightness));
    }

    /// Set the contrast offset, clamped to `[-100, 100]`.
    pub fn set_contrast(&mut self, contrast: i32) {
        self.update(|state| state.with_contrast(contrast));
    }

    pub fn set_crop_mode(&mut self, active: bool) {
        let default_size = self.config.default_crop_size();
        self.update(|state| state.with_crop_mode(active, default_size));
    }

    /// Flip crop mode and return the new flag.
    pub fn toggle_crop_mode(&mut self) -> bool {
        let active = !self.state().is_some_and(|s| s.crop_mode);
        self.set_crop_mode(active);
        self.state().is_some_and(|s| s.crop_mode)
    }

    /// Set the pending crop region. Returns the region after clamping to the
    /// canvas, or `None` with no image loaded.
    pub fn set_crop_region(&mut self, region: CropRegion) -> Option<CropRegion> {
        self.update(|state| state.with_crop_region(region));
        self.state().and_then(|s| s.crop_region)
    }

    /// Bake the pending crop region into a new source image. Only allowed
    /// while crop mode is on.
    ///
    /// The region is cut from a frame rendered without the crop overlay, so
    /// rotation and filters are baked in and reset afterwards. Returns the new
    /// canvas size.
    pub fn commit_crop(&mut self) -> Result<(u32, u32), EditorError> {
        let img = self.image.as_mut().ok_or(EditorError::NoImageLoaded)?;
        let region = img.state.crop_region.ok_or(EditorError::NoCropRegion)?;
        if !img.state.crop_mode {
            return Err(EditorError::CropModeInactive);
        }

        let mut frame = render::render_frame(&img.source, &img.state);
        let cropped = render::commit_crop(&mut frame, region);
        let (width, height) = cropped.dimensions();
        debug!(?region, width, height, "crop committed");

        img.source = cropped;
        img.state = TransformState::after_crop(width, height);
        self.render();
        Ok((width, height))
    }

    /// Change the canvas size. The next render resamples the source to it.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), EditorError> {
        let max = self.config.max_resize_dimension;
        if !(1..=max).contains(&width) || !(1..=max).contains(&height) {
            warn!(width, height, max, "rejected resize");
            return Err(EditorError::InvalidDimensions { width, height, max });
        }
        if !self.is_loaded() {
            return Err(EditorError::NoImageLoaded);
        }

        self.update(|state| state.with_canvas_size(width, height));
        Ok(())
    }

    /// Resize to `width`, deriving the height from the natural aspect ratio.
    pub fn resize_preserving_ratio(&mut self, width: u32) -> Result<(u32, u32), EditorError> {
        let height = self.height_for_width(width)?;
        self.resize(width, height)?;
        Ok((width, height))
    }

    /// Height matching `width` at the loaded image's natural aspect ratio.
    pub fn height_for_width(&self, width: u32) -> Result<u32, EditorError> {
        let (natural_width, natural_height) =
            self.natural_size().ok_or(EditorError::NoImageLoaded)?;
        Ok(height_for_width(width, natural_width, natural_height))
    }

    /// Restore the originally loaded image with an identity state at its
    /// display size. Undoes crops and resizes.
    pub fn reset(&mut self) {
        let Some(img) = &self.image else {
            return;
        };
        let (width, height) = self.fit_to_display(&img.original);

        if let Some(img) = self.image.as_mut() {
            img.source = img.original.clone();
            img.state = TransformState::identity(width, height);
        }
        debug!(width, height, "session reset");
        self.render();
    }

    /// Encode the current frame, without the crop overlay.
    ///
    /// The session is untouched whether or not encoding succeeds.
    pub fn export(
        &self,
        settings: &ExportSettings,
        timestamp_ms: u64,
    ) -> Result<ExportedImage, EditorError> {
        let img = self.image.as_ref().ok_or(EditorError::NoImageLoaded)?;
        let frame = render::render_frame(&img.source, &img.state);

        let exported = ExportedImage::encode(frame.bitmap(), settings, timestamp_ms)?;
        info!(
            file_name = %exported.file_name,
            bytes = exported.bytes.len(),
            "image exported"
        );
        Ok(exported)
    }

    fn fit_to_display(&self, bitmap: &Bitmap) -> (u32, u32) {
        let (max_width, max_height) = self.config.display_bound();
        fit_within(bitmap.width, bitmap.height, max_width, max_height)
    }

    /// Apply `edit` to the state and re-render. No-op with no image loaded.
    fn update(&mut self, edit: impl FnOnce(TransformState) -> TransformState) {
        let Some(img) = self.image.as_mut() else {
            debug!("edit ignored: no image loaded");
            return;
        };
        img.state = edit(img.state);
        self.render();
    }
}
