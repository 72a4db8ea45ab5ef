//! Vertical stacking of page rasters into one canvas.

use image::{Rgb, RgbImage};
use tracing::debug;

use crate::error::{Result, SqueezeError};

/// Stack frames top to bottom, left-aligned.
///
/// The canvas is as wide as the widest frame and as tall as all frames
/// together. Frame `i` is placed at `(0, h0 + .. + h(i-1))`; narrower frames
/// leave a `background` margin on the right.
pub fn stack_vertical(frames: &[RgbImage], background: Rgb<u8>) -> Result<RgbImage> {
    if frames.is_empty() {
        return Err(SqueezeError::input("no frames to stack"));
    }

    let width = frames.iter().map(RgbImage::width).max().unwrap_or(0);
    let height = frames
        .iter()
        .try_fold(0u32, |acc, frame| acc.checked_add(frame.height()))
        .ok_or_else(|| SqueezeError::input("stacked height overflows"))?;

    if width == 0 || height == 0 {
        return Err(SqueezeError::input(format!(
            "stacked canvas would be empty ({width}x{height})"
        )));
    }

    debug!("Stacking {} frames into {}x{}", frames.len(), width, height);

    let mut canvas = RgbImage::from_pixel(width, height, background);
    let mut offset = 0i64;
    for frame in frames {
        image::imageops::replace(&mut canvas, frame, 0, offset);
        offset += frame.height() as i64;
    }

    Ok(canvas)
}
