//! PDF processing module.

mod optimizer;
mod rasterize;

pub use optimizer::{Ghostscript, PdfOptimizer, PdfPreset};
pub use rasterize::{HayroRasterizer, Rasterizer};

use lopdf::Document;
use tracing::debug;

use crate::error::{Result, SqueezeError};

/// Basic facts about a PDF, gathered before handing it to other tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfInfo {
    /// Number of pages.
    pub pages: u32,
    /// Whether the file was encrypted (with an empty user password).
    pub encrypted: bool,
}

/// Parse a PDF with lopdf and count its pages.
///
/// # Errors
///
/// Returns [`SqueezeError::InvalidInput`] if the data is not a readable PDF,
/// is encrypted with a non-empty password, or has no pages.
pub fn inspect(data: &[u8]) -> Result<PdfInfo> {
    let mut doc = Document::load_mem(data)
        .map_err(|e| SqueezeError::input(format!("failed to parse PDF: {e}")))?;

    let encrypted = doc.is_encrypted();
    if encrypted {
        if doc.decrypt("").is_err() {
            return Err(SqueezeError::input("PDF is encrypted"));
        }
        debug!("Decrypted PDF with empty password");
    }

    let pages = doc.get_pages().len() as u32;
    if pages == 0 {
        return Err(SqueezeError::input("PDF has no pages"));
    }

    debug!("Inspected PDF: {} pages", pages);
    Ok(PdfInfo { pages, encrypted })
}
