//! Render pipeline: draws the source bitmap onto a surface according to the
//! current transform state.
//!
//! # Pipeline Order
//!
//! 1. Clear the surface (resizing it to the state's canvas size)
//! 2. Rotate about the surface center
//! 3. Brightness, then contrast
//! 4. Draw the source scaled to fill the surface
//! 5. Crop overlay, when crop mode is active
//!
//! The rotation matrix and filter expression are computed up front from the
//! state; nothing is carried between calls except the surface's pixels.

mod affine;
mod crop;
mod filter;
mod overlay;
mod surface;

pub use affine::Affine;
pub use crop::commit_crop;
pub use filter::{FilterExpr, FilterLut};
pub use overlay::{draw_crop_overlay, OverlayStyle};
pub use surface::Surface;

use tracing::trace;

use crate::decode::Bitmap;
use crate::state::TransformState;

/// Render `source` onto `surface` according to `state`.
///
/// A missing source (no image loaded yet) leaves the surface untouched.
pub fn render(surface: &mut Surface, source: Option<&Bitmap>, state: &TransformState) {
    let Some(source) = source else {
        trace!("render skipped: no source image");
        return;
    };

    surface.set_size(state.canvas_width, state.canvas_height);
    surface.clear();

    let transform = state.rotation_transform();
    let filter = state.filter();
    trace!(
        rotation = state.rotation_degrees,
        %filter,
        width = state.canvas_width,
        height = state.canvas_height,
        "render"
    );
    surface.draw_bitmap(source, &transform, &filter);

    if state.crop_mode {
        if let Some(region) = state.crop_region {
            draw_crop_overlay(surface, region, &OverlayStyle::default());
        }
    }
}

/// Render into a fresh surface with the crop overlay suppressed.
///
/// Used for anything that consumes pixels rather than showing them.
pub fn render_frame(source: &Bitmap, state: &TransformState) -> Surface {
    let mut surface = Surface::new(state.canvas_width, state.canvas_height);
    render(&mut surface, Some(source), &state.without_overlay());
    surface
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CropRegion;

    fn indexed_bitmap(width: u32, height: u32) -> Bitmap {
        let mut bitmap = Bitmap::blank(width, height);
        for y in 0..height {
            for x in 0..width {
                bitmap.set_pixel(x, y, [(x * 10) as u8, (y * 10) as u8, 99, 255]);
            }
        }
        bitmap
    }

    #[test]
    fn test_render_without_source_is_noop() {
        let mut surface = Surface::new(3, 3);
        surface.fill_over([255, 0, 0], 1.0);
        let before = surface.clone();

        render(&mut surface, None, &TransformState::identity(10, 10));
        assert_eq!(surface, before);
    }

    #[test]
    fn test_render_identity_matches_source() {
        let source = indexed_bitmap(12, 8);
        let mut surface = Surface::new(1, 1);
        render(&mut surface, Some(&source), &TransformState::identity(12, 8));

        assert_eq!(surface.bitmap(), &source);
    }

    #[test]
    fn test_render_resizes_surface() {
        let source = indexed_bitmap(12, 8);
        let mut surface = Surface::new(1, 1);
        render(&mut surface, Some(&source), &TransformState::identity(6, 4));

        assert_eq!(surface.dimensions(), (6, 4));
    }

    #[test]
    fn test_zero_offsets_match_unfiltered_draw() {
        let source = indexed_bitmap(9, 9);
        let state = TransformState::identity(9, 9)
            .with_brightness(0)
            .with_contrast(0);

        let mut filtered = Surface::new(9, 9);
        render(&mut filtered, Some(&source), &state);

        let mut plain = Surface::new(9, 9);
        plain.draw_bitmap(&source, &Affine::IDENTITY, &FilterExpr::default());

        assert_eq!(filtered, plain);
    }

    #[test]
    fn test_four_left_rotations_restore_output() {
        let source = indexed_bitmap(10, 10);
        let mut state = TransformState::identity(10, 10);

        let mut original = Surface::new(10, 10);
        render(&mut original, Some(&source), &state);

        let mut surface = Surface::new(10, 10);
        for _ in 0..4 {
            state = state.rotated_left();
            render(&mut surface, Some(&source), &state);
        }
        assert_eq!(surface, original);
    }

    #[test]
    fn test_half_turn_on_non_square() {
        let source = indexed_bitmap(6, 4);
        let state = TransformState::identity(6, 4).rotated_right().rotated_right();

        let mut surface = Surface::new(6, 4);
        render(&mut surface, Some(&source), &state);

        assert_eq!(surface.bitmap().pixel(0, 0), source.pixel(5, 3));
        assert_eq!(surface.bitmap().pixel(5, 3), source.pixel(0, 0));
    }

    #[test]
    fn test_crop_mode_draws_overlay() {
        let source = Bitmap::filled(20, 20, [200, 200, 200, 255]);
        let state = TransformState::identity(20, 20)
            .with_crop_mode(true, (200, 150))
            .with_crop_region(CropRegion::new(5, 5, 10, 10));

        let mut surface = Surface::new(20, 20);
        render(&mut surface, Some(&source), &state);

        assert_eq!(surface.bitmap().pixel(0, 0), [100, 100, 100, 255]);
        assert_eq!(surface.bitmap().pixel(10, 10), [0, 0, 0, 0]);
    }

    #[test]
    fn test_render_frame_skips_overlay() {
        let source = Bitmap::filled(20, 20, [200, 200, 200, 255]);
        let state = TransformState::identity(20, 20)
            .with_crop_mode(true, (200, 150))
            .with_crop_region(CropRegion::new(5, 5, 10, 10));

        let frame = render_frame(&source, &state);
        assert_eq!(frame.bitmap(), &source);
    }
}
