//! The raster target the pipeline draws onto and export serializes.

use super::affine::Affine;
use super::filter::FilterExpr;
use crate::decode::Bitmap;
use crate::state::CropRegion;

/// An RGBA drawing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    bitmap: Bitmap,
}

impl Surface {
    /// A transparent surface. Zero dimensions are raised to 1.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            bitmap: Bitmap::blank(width.max(1), height.max(1)),
        }
    }

    pub fn width(&self) -> u32 {
        self.bitmap.width
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.bitmap.dimensions()
    }

    /// RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.bitmap.pixels
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn into_bitmap(self) -> Bitmap {
        self.bitmap
    }

    /// Reallocate to a new size. Contents are discarded, as with a canvas.
    pub fn set_size(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if self.dimensions() != (width, height) {
            self.bitmap = Bitmap::blank(width, height);
        }
    }

    /// Clear every pixel to transparent black.
    pub fn clear(&mut self) {
        self.bitmap.pixels.fill(0);
    }

    /// Clear the intersection of `rect` with the surface to transparent.
    pub fn clear_rect(&mut self, rect: CropRegion) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        let stride = self.width() as usize * Bitmap::CHANNELS;
        for y in y0..y1 {
            let row = y as usize * stride;
            let start = row + x0 as usize * Bitmap::CHANNELS;
            let end = row + x1 as usize * Bitmap::CHANNELS;
            self.bitmap.pixels[start..end].fill(0);
        }
    }

    /// Composite a solid color over the whole surface (source-over).
    pub fn fill_over(&mut self, rgb: [u8; 3], alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        for px in self.bitmap.pixels.chunks_exact_mut(4) {
            let dst = [px[0], px[1], px[2], px[3]];
            px.copy_from_slice(&blend_over(dst, rgb, alpha));
        }
    }

    /// Write one opaque pixel, ignoring coordinates off the surface.
    pub fn put_pixel(&mut self, x: i64, y: i64, rgba: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        self.bitmap.set_pixel(x as u32, y as u32, rgba);
    }

    /// Draw `source` scaled to fill the surface, mapped through `transform`
    /// and passed through `filter`.
    ///
    /// The surface must already be cleared: source pixels are written as-is
    /// and pixels the transformed image does not cover are left untouched.
    /// Sampling is bilinear at pixel centres.
    pub fn draw_bitmap(&mut self, source: &Bitmap, transform: &Affine, filter: &FilterExpr) {
        if source.is_empty() {
            return;
        }
        let Some(inverse) = transform.invert() else {
            return;
        };

        let (dst_w, dst_h) = (self.width() as f64, self.height() as f64);
        let scale_x = source.width as f64 / dst_w;
        let scale_y = source.height as f64 / dst_h;
        let lut = filter.lut();

        for y in 0..self.height() {
            for x in 0..self.width() {
                let (u, v) = inverse.apply(x as f64 + 0.5, y as f64 + 0.5);
                if u < 0.0 || v < 0.0 || u >= dst_w || v >= dst_h {
                    continue;
                }

                let px = sample_bilinear(source, u * scale_x - 0.5, v * scale_y - 0.5);
                let px = match &lut {
                    Some(lut) => lut.apply(px),
                    None => px,
                };
                self.bitmap.set_pixel(x, y, px);
            }
        }
    }

    /// Copy a region into a new bitmap. The region is clipped to the surface.
    pub fn read_region(&self, rect: CropRegion) -> Bitmap {
        let rect = rect.clamped(self.width(), self.height());
        let mut out = Vec::with_capacity(Bitmap::buffer_len(rect.width, rect.height));
        let stride = self.width() as usize * Bitmap::CHANNELS;

        for y in rect.y..rect.bottom() {
            let row = y as usize * stride;
            let start = row + rect.x as usize * Bitmap::CHANNELS;
            let end = row + rect.right() as usize * Bitmap::CHANNELS;
            out.extend_from_slice(&self.bitmap.pixels[start..end]);
        }

        Bitmap::new(rect.width, rect.height, out)
    }

    /// Replace the surface with `bitmap`, resizing to match.
    pub fn replace_with(&mut self, bitmap: Bitmap) {
        self.bitmap = bitmap;
    }

    /// Pixel bounds `[x0, x1) x [y0, y1)` of `rect` on this surface.
    fn clip(&self, rect: CropRegion) -> Option<(u32, u32, u32, u32)> {
        let x1 = rect.right().min(self.width());
        let y1 = rect.bottom().min(self.height());
        (rect.x < x1 && rect.y < y1).then_some((rect.x, rect.y, x1, y1))
    }
}

/// Non-premultiplied source-over of a solid color.
fn blend_over(dst: [u8; 4], rgb: [u8; 3], alpha: f32) -> [u8; 4] {
    let da = dst[3] as f32 / 255.0;
    let out_a = alpha + da * (1.0 - alpha);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (rgb[i] as f32 * alpha + dst[i] as f32 * da * (1.0 - alpha)) / out_a;
        out[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    out
}

/// Bilinear sample with edge clamping.
fn sample_bilinear(image: &Bitmap, x: f64, y: f64) -> [u8; 4] {
    let max_x = (image.width - 1) as f64;
    let max_y = (image.height - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }
    result
}
