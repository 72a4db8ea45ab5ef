//! Core library for size-targeted image and PDF compression.
//!
//! This crate provides:
//! - A linear quality search that stops at the first encoding under a size limit
//! - Raster adapters (resize, JPEG encoding, vertical page stacking)
//! - PDF adapters (inspection, rasterization, Ghostscript optimization)
//! - Jobs that wire these together and report what was chosen

pub mod error;
pub mod jobs;
pub mod models;
pub mod pdf;
pub mod raster;
pub mod search;

pub use error::{Result, SqueezeError};
pub use jobs::{compress_pdf, output_path_for, pdf_to_jpeg, resize_and_compress};
pub use models::config::{CombineJobConfig, JpegJobConfig, PdfJobConfig, SqueezeConfig};
pub use pdf::{Ghostscript, HayroRasterizer, PdfOptimizer, PdfPreset, Rasterizer};
pub use search::{Attempt, QualitySchedule, SearchReport, SearchStatus, SizeBounds, search};
