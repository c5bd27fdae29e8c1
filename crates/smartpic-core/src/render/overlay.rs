//! Crop-mode overlay: a dimming scrim with a transparent window and a dashed
//! border around the pending crop region.

use super::surface::Surface;
use crate::state::CropRegion;

/// Appearance of the crop overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub scrim_rgb: [u8; 3],
    pub scrim_alpha: f32,
    pub border_rgb: [u8; 3],
    /// Stroke width in pixels, centered on the region's edges.
    pub line_width: u32,
    /// `[on, off]` dash lengths in pixels along the perimeter.
    pub dash: [u32; 2],
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            scrim_rgb: [0, 0, 0],
            scrim_alpha: 0.5,
            border_rgb: [0x18, 0x90, 0xff],
            line_width: 2,
            dash: [5, 5],
        }
    }
}

/// Draw the overlay for `region` on top of whatever the surface holds.
pub fn draw_crop_overlay(surface: &mut Surface, region: CropRegion, style: &OverlayStyle) {
    surface.fill_over(style.scrim_rgb, style.scrim_alpha);
    surface.clear_rect(region);
    stroke_dashed_rect(surface, region, style);
}

/// Stroke `region`'s outline clockwise from its top-left corner, with the
/// dash pattern running continuously around the perimeter.
fn stroke_dashed_rect(surface: &mut Surface, region: CropRegion, style: &OverlayStyle) {
    let [r, g, b] = style.border_rgb;
    let color = [r, g, b, 255];
    let period = (style.dash[0] + style.dash[1]).max(1) as u64;
    let on = style.dash[0] as u64;

    let width = style.line_width as i64;
    let band = |edge: i64| {
        let start = edge - width / 2;
        start..start + width
    };

    let (x, y) = (region.x as i64, region.y as i64);
    let (right, bottom) = (region.right() as i64, region.bottom() as i64);
    let (w, h) = (region.width as i64, region.height as i64);

    // Walk the perimeter: top (left to right), right (top to bottom),
    // bottom (right to left), left (bottom to top).
    let steps = (0..w)
        .map(|i| Step::Row(x + i, y))
        .chain((0..h).map(|j| Step::Column(right, y + j)))
        .chain((0..w).map(|i| Step::Row(right - 1 - i, bottom)))
        .chain((0..h).map(|j| Step::Column(x, bottom - 1 - j)));

    for (t, step) in steps.enumerate() {
        if (t as u64) % period >= on {
            continue;
        }
        match step {
            Step::Row(px, edge) => {
                for py in band(edge) {
                    surface.put_pixel(px, py, color);
                }
            }
            Step::Column(edge, py) => {
                for px in band(edge) {
                    surface.put_pixel(px, py, color);
                }
            }
        }
    }
}

/// One pixel step along a horizontal or vertical edge.
enum Step {
    /// `(x, edge_y)`
    Row(i64, i64),
    /// `(edge_x, y)`
    Column(i64, i64),
}
