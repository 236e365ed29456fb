//! PNG export of the pixel buffer.

use std::path::Path;

use crate::colors;
use crate::render::Rasterizer;

/// Saves the rasterizer's current frame as a PNG.
pub fn save_png(raster: &Rasterizer, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
    let mut img = image::RgbImage::new(raster.width(), raster.height());
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let color = raster.pixel(x as i32, y as i32).unwrap_or(colors::BLACK);
        *pixel = image::Rgb([color.r(), color.g(), color.b()]);
    }
    img.save(path)
}
