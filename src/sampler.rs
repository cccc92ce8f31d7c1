use std::ops::Deref;

use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel};
use tracing::debug;

use crate::color::ColorPoint;
use crate::error::{Error, Result};

/// Read access to a decoded image.
pub trait Raster {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// RGB value of the pixel at column `x`, row `y`.
    fn pixel_at(&self, x: u32, y: u32) -> [u8; 3];
}

impl Raster for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn pixel_at(&self, x: u32, y: u32) -> [u8; 3] {
        let [r, g, b, _] = self.get_pixel(x, y).0;
        [r, g, b]
    }
}

impl<P, C> Raster for ImageBuffer<P, C>
where
    P: Pixel<Subpixel = u8>,
    C: Deref<Target = [u8]>,
{
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn pixel_at(&self, x: u32, y: u32) -> [u8; 3] {
        self.get_pixel(x, y).to_rgb().0
    }
}

/// Walk `raster` on a grid of stride `step` and collect the sampled colors.
///
/// Columns are the outer loop and rows the inner one, so for a given `step`
/// the output order is fixed.
///
/// # Errors
/// When `step` is zero.
pub fn sample<R: Raster + ?Sized>(raster: &R, step: u32) -> Result<Vec<ColorPoint>> {
    if step == 0 {
        return Err(Error::invalid("step", "sampling stride must be at least 1"));
    }
    let (w, h) = (raster.width(), raster.height());
    let capacity = w.div_ceil(step) as usize * h.div_ceil(step) as usize;
    let mut points = Vec::with_capacity(capacity);

    for x in (0..w).step_by(step as usize) {
        for y in (0..h).step_by(step as usize) {
            points.push(ColorPoint::from(raster.pixel_at(x, y)));
        }
    }

    debug!(width = w, height = h, step, sampled = points.len(), "sampled raster");
    Ok(points)
}
