//! Page rasterization using hayro.

use std::sync::Arc;

use hayro::{InterpreterSettings, Pdf, RenderSettings};
use image::RgbImage;
use tracing::{debug, trace};

use crate::error::{Result, SqueezeError};
use crate::raster::{WHITE, flatten_alpha};

/// PDF points per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// Renders every page of a document to an RGB raster.
pub trait Rasterizer {
    /// Render all pages, in order, at `dpi` dots per inch.
    fn rasterize(&self, data: &[u8], dpi: u32) -> Result<Vec<RgbImage>>;
}

/// Pure-Rust rasterizer backed by hayro.
#[derive(Debug, Default, Clone, Copy)]
pub struct HayroRasterizer;

impl HayroRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for HayroRasterizer {
    fn rasterize(&self, data: &[u8], dpi: u32) -> Result<Vec<RgbImage>> {
        if dpi == 0 {
            return Err(SqueezeError::config("render DPI must be positive"));
        }

        let pdf = Pdf::new(Arc::new(data.to_vec()))
            .map_err(|e| SqueezeError::input(format!("failed to parse PDF: {e:?}")))?;

        let pages = pdf.pages();
        let page_count = pages.len();
        if page_count == 0 {
            return Err(SqueezeError::input("PDF has no pages"));
        }

        let scale = dpi as f32 / POINTS_PER_INCH;
        let settings = RenderSettings {
            x_scale: scale,
            y_scale: scale,
            width: None,
            height: None,
        };

        let interpreter = InterpreterSettings::default();

        debug!("Rasterizing {} pages at {} DPI", page_count, dpi);

        let mut frames = Vec::with_capacity(page_count);
        for (index, page) in pages.iter().enumerate() {
            let png = hayro::render(page, &interpreter, &settings).take_png();
            let rgba = image::load_from_memory(&png)
                .map_err(|e| SqueezeError::Pdf(format!("page {} render failed: {e}", index + 1)))?
                .to_rgba8();
            trace!("Page {}: {}x{}", index + 1, rgba.width(), rgba.height());
            frames.push(flatten_alpha(&rgba, WHITE));
        }

        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixtures::blank_pdf;

    #[test]
    fn test_rejects_zero_dpi() {
        let data = blank_pdf(&[(72, 72)]);
        assert!(matches!(
            HayroRasterizer::new().rasterize(&data, 0),
            Err(SqueezeError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            HayroRasterizer::new().rasterize(b"%PDF-garbage", 72),
            Err(SqueezeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_renders_one_frame_per_page() {
        let data = blank_pdf(&[(144, 72), (72, 144)]);
        let frames = HayroRasterizer::new().rasterize(&data, 72).unwrap();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].dimensions(), (144, 72));
        assert_eq!(frames[1].dimensions(), (72, 144));
        assert_eq!(frames[0].get_pixel(10, 10), &WHITE);
    }

    #[test]
    fn test_dpi_scales_output() {
        let data = blank_pdf(&[(72, 36)]);
        let frames = HayroRasterizer::new().rasterize(&data, 144).unwrap();
        assert_eq!(frames[0].dimensions(), (144, 72));
    }
}
