//! Raster image adapters: resize, JPEG encoding, alpha flattening and
//! vertical stacking.

mod encode;
mod stack;

pub use encode::{encode_jpeg, encode_jpeg_attempt};
pub use stack::stack_vertical;

use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage, RgbaImage};
use tracing::debug;

use crate::error::{Result, SqueezeError};

/// Background used behind transparent pixels and stacking margins.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Resize to exact dimensions with a Lanczos filter, ignoring aspect ratio.
pub fn resize_exact(image: &DynamicImage, width: u32, height: u32) -> Result<RgbImage> {
    if width == 0 || height == 0 {
        return Err(SqueezeError::config(format!(
            "target dimensions must be non-zero, got {width}x{height}"
        )));
    }

    debug!(
        "Resizing {}x{} -> {}x{}",
        image.width(),
        image.height(),
        width,
        height
    );

    let rgb = to_rgb(image);
    if rgb.dimensions() == (width, height) {
        return Ok(rgb);
    }
    Ok(image::imageops::resize(&rgb, width, height, FilterType::Lanczos3))
}

/// Convert any decoded image to 8-bit RGB, compositing alpha onto white.
pub fn to_rgb(image: &DynamicImage) -> RgbImage {
    if image.color().has_alpha() {
        flatten_alpha(&image.to_rgba8(), WHITE)
    } else {
        image.to_rgb8()
    }
}

/// Composite an RGBA image onto a solid background.
pub fn flatten_alpha(rgba: &RgbaImage, background: Rgb<u8>) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let px = rgba.get_pixel(x, y);
        let alpha = px[3] as u32;
        let blend = |c: u8, bg: u8| ((c as u32 * alpha + bg as u32 * (255 - alpha) + 127) / 255) as u8;
        Rgb([
            blend(px[0], background[0]),
            blend(px[1], background[1]),
            blend(px[2], background[2]),
        ])
    })
}
