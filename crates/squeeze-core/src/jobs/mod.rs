//! End-to-end compression jobs.
//!
//! Each job validates its input, prepares content (resize, rasterize and
//! stack, or nothing), runs a quality search and writes the chosen output.
//! The returned [`SearchReport`](crate::search::SearchReport) carries the
//! status and attempt history; jobs never print.

mod combine;
mod jpeg;
mod pdf;

pub use combine::pdf_to_jpeg;
pub use jpeg::resize_and_compress;
pub use pdf::compress_pdf;

use std::path::{Path, PathBuf};

use crate::error::{Result, SqueezeError};

/// Output suffix for resized photos.
pub const RESIZED_SUFFIX: &str = "resized";
/// Output suffix for optimized PDFs.
pub const COMPRESSED_SUFFIX: &str = "compressed";
/// Output suffix for stacked page images.
pub const COMBINED_SUFFIX: &str = "combined";

/// `<dir>/<stem>_<suffix>.<extension>` next to the input.
pub fn output_path_for(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}_{suffix}.{extension}"))
}

/// Fail early when the source file is absent.
pub fn ensure_input(input: &Path) -> Result<()> {
    if input.is_file() {
        Ok(())
    } else {
        Err(SqueezeError::input(format!(
            "input file not found: {}",
            input.display()
        )))
    }
}
