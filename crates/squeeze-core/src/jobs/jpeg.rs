//! Resize a photo and re-encode it as JPEG under a size limit.

use std::fs;
use std::path::Path;

use tracing::info;

use super::ensure_input;
use crate::error::Result;
use crate::models::config::JpegJobConfig;
use crate::raster::{encode_jpeg_attempt, resize_exact};
use crate::search::{SearchReport, format_kb, search};

/// Resize `input` to the configured dimensions and write the highest JPEG
/// quality that fits the size limit to `output`.
///
/// If no quality fits, the lowest quality tried is written and the report
/// status is `TargetNotMet`.
pub fn resize_and_compress(
    input: &Path,
    output: &Path,
    config: &JpegJobConfig,
) -> Result<SearchReport<u8>> {
    ensure_input(input)?;
    let bounds = config.bounds()?;

    let image = image::open(input)?;
    let resized = resize_exact(&image, config.width, config.height)?;

    let outcome = search(config.qualities.levels(), bounds, |quality| {
        encode_jpeg_attempt(&resized, quality)
    })?;

    let (bytes, report) = outcome.into_report(output.to_path_buf());
    fs::write(output, bytes)?;

    info!(
        "Wrote {} at quality {} ({})",
        output.display(),
        report.level,
        format_kb(report.size)
    );
    Ok(report)
}
