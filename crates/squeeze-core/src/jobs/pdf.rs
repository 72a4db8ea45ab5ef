//! Shrink a PDF by trying optimizer presets in order.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::ensure_input;
use crate::error::Result;
use crate::models::config::PdfJobConfig;
use crate::pdf::{self, PdfOptimizer, PdfPreset};
use crate::search::{Encoded, SearchReport, format_kb, search};

/// Run `optimizer` with each configured preset until the output fits the
/// size limit, then move that output to `output`.
///
/// Attempts are written to a single scratch file inside a temporary
/// directory next to `output`. The directory is removed when this function
/// returns, whether the search succeeded or failed.
pub fn compress_pdf(
    input: &Path,
    output: &Path,
    config: &PdfJobConfig,
    optimizer: &dyn PdfOptimizer,
) -> Result<SearchReport<PdfPreset>> {
    ensure_input(input)?;
    let bounds = config.bounds()?;

    let info = pdf::inspect(&fs::read(input)?)?;
    debug!("{} has {} pages", input.display(), info.pages);

    let parent = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let scratch_dir = tempfile::Builder::new()
        .prefix(".squeeze-")
        .tempdir_in(parent)?;
    let scratch = scratch_dir.path().join("attempt.pdf");

    let outcome = search(&config.presets, bounds, |preset| {
        if scratch.exists() {
            fs::remove_file(&scratch)?;
        }
        optimizer.optimize(input, &scratch, preset)?;
        let size = fs::metadata(&scratch)?.len();
        Ok(Encoded { output: (), size })
    })?;

    fs::rename(&scratch, output)?;
    let ((), report) = outcome.into_report(output.to_path_buf());

    info!(
        "Wrote {} with {} ({})",
        output.display(),
        report.level,
        format_kb(report.size)
    );
    Ok(report)
}
