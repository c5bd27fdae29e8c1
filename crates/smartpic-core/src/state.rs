//! Transform state: the full description of what the render pipeline draws.
//!
//! `TransformState` is a value object. Every edit takes a state and returns a
//! new one, so a session can validate first and only then swap the new state
//! in. Invariants hold for every value the constructors and `with_*` methods
//! produce:
//!
//! - `rotation_degrees` is a multiple of 90 in `[0, 360)`
//! - `brightness` and `contrast` lie in `[-100, 100]`
//! - canvas dimensions are at least 1
//! - a crop region, when present, lies entirely inside the canvas

use serde::{Deserialize, Serialize};

use crate::render::{Affine, FilterExpr};

/// Limit for brightness and contrast offsets, in either direction.
pub const MAX_OFFSET: i32 = 100;

/// A rectangle on the canvas, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Clamp into a `canvas_width` x `canvas_height` canvas.
    ///
    /// The origin is pulled inside the canvas first, then the size is cut to
    /// what remains. The result always covers at least one pixel.
    pub fn clamped(self, canvas_width: u32, canvas_height: u32) -> Self {
        let (cw, ch) = (canvas_width.max(1), canvas_height.max(1));
        let x = self.x.min(cw - 1);
        let y = self.y.min(ch - 1);
        Self {
            x,
            y,
            width: self.width.clamp(1, cw - x),
            height: self.height.clamp(1, ch - y),
        }
    }

    /// A `width` x `height` region centred in the canvas, shrunk to fit.
    pub fn centered(canvas_width: u32, canvas_height: u32, width: u32, height: u32) -> Self {
        let width = width.min(canvas_width);
        let height = height.min(canvas_height);
        Self::new(
            (canvas_width - width) / 2,
            (canvas_height - height) / 2,
            width,
            height,
        )
        .clamped(canvas_width, canvas_height)
    }

    pub fn fits_within(&self, canvas_width: u32, canvas_height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.right() <= canvas_width
            && self.bottom() <= canvas_height
    }
}

/// Everything the render pipeline needs besides the source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformState {
    pub rotation_degrees: i32,
    pub brightness: i32,
    pub contrast: i32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub crop_region: Option<CropRegion>,
    pub crop_mode: bool,
}

impl TransformState {
    /// No rotation, no filter, no crop, on a `width` x `height` canvas.
    pub fn identity(width: u32, height: u32) -> Self {
        Self {
            rotation_degrees: 0,
            brightness: 0,
            contrast: 0,
            canvas_width: width.max(1),
            canvas_height: height.max(1),
            crop_region: None,
            crop_mode: false,
        }
    }

    /// True when rendering is a plain scaled copy of the source.
    pub fn is_identity(&self) -> bool {
        self.rotation_degrees == 0
            && self.brightness == 0
            && self.contrast == 0
            && self.crop_region.is_none()
            && !self.crop_mode
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    /// Turn a quarter counterclockwise.
    pub fn rotated_left(self) -> Self {
        self.with_rotation(self.rotation_degrees - 90)
    }

    /// Turn a quarter clockwise.
    pub fn rotated_right(self) -> Self {
        self.with_rotation(self.rotation_degrees + 90)
    }

    /// Set the rotation, snapped down to a quarter turn and normalized to `[0, 360)`.
    pub fn with_rotation(self, degrees: i32) -> Self {
        let normalized = degrees.rem_euclid(360);
        Self {
            rotation_degrees: normalized - normalized % 90,
            ..self
        }
    }

    pub fn with_brightness(self, brightness: i32) -> Self {
        Self {
            brightness: brightness.clamp(-MAX_OFFSET, MAX_OFFSET),
            ..self
        }
    }

    pub fn with_contrast(self, contrast: i32) -> Self {
        Self {
            contrast: contrast.clamp(-MAX_OFFSET, MAX_OFFSET),
            ..self
        }
    }

    /// Change the canvas size. A pending crop region is clamped to the new canvas.
    pub fn with_canvas_size(self, width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            canvas_width: width,
            canvas_height: height,
            crop_region: self.crop_region.map(|r| r.clamped(width, height)),
            ..self
        }
    }

    /// Set the crop region, clamped to the canvas.
    pub fn with_crop_region(self, region: CropRegion) -> Self {
        Self {
            crop_region: Some(region.clamped(self.canvas_width, self.canvas_height)),
            ..self
        }
    }

    /// Enter or leave crop mode.
    ///
    /// Entering always seeds a region of `default_size` centred on the
    /// canvas. Leaving keeps the region but hides the overlay.
    pub fn with_crop_mode(self, active: bool, default_size: (u32, u32)) -> Self {
        if !active {
            return Self {
                crop_mode: false,
                ..self
            };
        }
        let (w, h) = default_size;
        Self {
            crop_mode: true,
            crop_region: Some(CropRegion::centered(
                self.canvas_width,
                self.canvas_height,
                w,
                h,
            )),
            ..self
        }
    }

    /// The same state with the crop overlay switched off.
    pub fn without_overlay(self) -> Self {
        Self {
            crop_mode: false,
            ..self
        }
    }

    /// State after a crop of `width` x `height` has been committed: the new
    /// source already carries rotation and filter, so both reset.
    pub fn after_crop(width: u32, height: u32) -> Self {
        Self::identity(width, height)
    }

    /// Rotation about the canvas centre, identity when unrotated.
    pub fn rotation_transform(&self) -> Affine {
        if self.rotation_degrees == 0 {
            return Affine::IDENTITY;
        }
        Affine::rotate_about(
            self.rotation_degrees as f64,
            self.canvas_width as f64 / 2.0,
            self.canvas_height as f64 / 2.0,
        )
    }

    pub fn filter(&self) -> FilterExpr {
        FilterExpr::from_offsets(self.brightness, self.contrast)
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::identity(1, 1)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: any requested region ends up inside the canvas.
        #[test]
        fn prop_crop_region_always_fits(
            (cw, ch) in (1u32..=2000, 1u32..=2000),
            (x, y, w, h) in (any::<u32>(), any::<u32>(), any::<u32>(), any::<u32>()),
        ) {
            let state = TransformState::identity(cw, ch)
                .with_crop_region(CropRegion::new(x, y, w, h));
            let region = state.crop_region.unwrap();
            prop_assert!(region.fits_within(cw, ch));
        }

        /// Property: a region already inside the canvas is left alone.
        #[test]
        fn prop_clamp_preserves_valid_region(
            (cw, ch) in (1u32..=500, 1u32..=500),
            fx in 0.0f64..1.0, fy in 0.0f64..1.0,
            fw in 0.0f64..1.0, fh in 0.0f64..1.0,
        ) {
            let x = (fx * cw as f64) as u32;
            let y = (fy * ch as f64) as u32;
            let w = 1 + (fw * (cw - x - 1) as f64) as u32;
            let h = 1 + (fh * (ch - y - 1) as f64) as u32;
            let region = CropRegion::new(x, y, w, h);
            prop_assert_eq!(region.clamped(cw, ch), region);
        }

        /// Property: brightness and contrast always stay within range.
        #[test]
        fn prop_offsets_in_range(brightness in any::<i32>(), contrast in any::<i32>()) {
            let state = TransformState::identity(1, 1)
                .with_brightness(brightness)
                .with_contrast(contrast);
            prop_assert!((-MAX_OFFSET..=MAX_OFFSET).contains(&state.brightness));
            prop_assert!((-MAX_OFFSET..=MAX_OFFSET).contains(&state.contrast));
        }

        /// Property: any sequence of quarter turns stays normalized.
        #[test]
        fn prop_rotation_normalized(turns in proptest::collection::vec(any::<bool>(), 0..20)) {
            let mut state = TransformState::identity(1, 1);
            for left in turns {
                state = if left { state.rotated_left() } else { state.rotated_right() };
            }
            prop_assert!(state.rotation_degrees % 90 == 0);
            prop_assert!((0..360).contains(&state.rotation_degrees));
        }
    }
}
