//! Render every PDF page, stack them, and encode one JPEG under a size limit.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::ensure_input;
use crate::error::{Result, SqueezeError};
use crate::models::config::CombineJobConfig;
use crate::pdf::Rasterizer;
use crate::raster::{WHITE, encode_jpeg_attempt, stack_vertical};
use crate::search::{SearchReport, format_kb, search};

/// Rasterize `input` at the configured DPI, stack the pages top to bottom
/// on a white canvas and write the highest JPEG quality that fits to `output`.
pub fn pdf_to_jpeg(
    input: &Path,
    output: &Path,
    config: &CombineJobConfig,
    rasterizer: &dyn Rasterizer,
) -> Result<SearchReport<u8>> {
    ensure_input(input)?;
    let bounds = config.bounds()?;
    if config.dpi == 0 {
        return Err(SqueezeError::config("render DPI must be positive"));
    }

    let pages = rasterizer.rasterize(&fs::read(input)?, config.dpi)?;
    debug!("Rendered {} pages from {}", pages.len(), input.display());

    let canvas = stack_vertical(&pages, WHITE)?;
    drop(pages);

    let outcome = search(config.qualities.levels(), bounds, |quality| {
        encode_jpeg_attempt(&canvas, quality)
    })?;

    let (bytes, report) = outcome.into_report(output.to_path_buf());
    fs::write(output, bytes)?;

    info!(
        "Wrote {} ({}x{}) at quality {} ({})",
        output.display(),
        canvas.width(),
        canvas.height(),
        report.level,
        format_kb(report.size)
    );
    Ok(report)
}
