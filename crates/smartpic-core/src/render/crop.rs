//! Baking a crop region into a new source bitmap.

use tracing::debug;

use super::surface::Surface;
use crate::decode::Bitmap;
use crate::state::CropRegion;

/// Copy `region` out of the rendered surface and shrink the surface to it.
///
/// The region is clamped to the surface first, so the returned bitmap is
/// never larger than the surface. The surface ends up holding exactly the
/// returned pixels.
pub fn commit_crop(surface: &mut Surface, region: CropRegion) -> Bitmap {
    let clamped = region.clamped(surface.width(), surface.height());
    if clamped != region {
        debug!(?region, ?clamped, "crop region clamped to surface");
    }

    let cropped = surface.read_region(clamped);
    surface.replace_with(cropped.clone());
    cropped
}
