//! Configuration structures for the compression jobs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, SqueezeError};
use crate::pdf::PdfPreset;
use crate::search::{QualitySchedule, SizeBounds};

/// Main configuration for squeeze.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SqueezeConfig {
    /// Resize and re-encode a photo as JPEG.
    pub jpeg: JpegJobConfig,

    /// Re-write a PDF through the external optimizer.
    pub pdf: PdfJobConfig,

    /// Rasterize a PDF into one tall JPEG.
    pub combine: CombineJobConfig,
}

/// JPEG resize and compress configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JpegJobConfig {
    /// Output width in pixels.
    pub width: u32,

    /// Output height in pixels.
    pub height: u32,

    /// Maximum output size in KB.
    pub max_kb: u64,

    /// Warn when the output is smaller than this many KB.
    pub min_kb: Option<u64>,

    /// Qualities to try, highest first.
    pub qualities: QualitySchedule,
}

impl Default for JpegJobConfig {
    fn default() -> Self {
        Self {
            width: 160,
            height: 212,
            max_kb: 20,
            min_kb: Some(5),
            qualities: QualitySchedule::builtin(95, 5, 15),
        }
    }
}

impl JpegJobConfig {
    pub fn bounds(&self) -> Result<SizeBounds> {
        SizeBounds::from_kb(self.max_kb, self.min_kb)
    }
}

/// PDF optimizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfJobConfig {
    /// Maximum output size in KB.
    pub max_kb: u64,

    /// Warn when the output is smaller than this many KB.
    pub min_kb: Option<u64>,

    /// Presets to try, in order.
    pub presets: Vec<PdfPreset>,

    /// Ghostscript executable name or path.
    pub ghostscript: PathBuf,

    /// Seconds before an optimizer run is killed (0 = no limit).
    pub timeout_secs: u64,
}

impl Default for PdfJobConfig {
    fn default() -> Self {
        Self {
            max_kb: 100,
            min_kb: Some(75),
            presets: PdfPreset::ALL.to_vec(),
            ghostscript: PathBuf::from("gs"),
            timeout_secs: 300,
        }
    }
}

impl PdfJobConfig {
    pub fn bounds(&self) -> Result<SizeBounds> {
        SizeBounds::from_kb(self.max_kb, self.min_kb)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// PDF to single JPEG configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineJobConfig {
    /// DPI for rendering PDF pages.
    pub dpi: u32,

    /// Maximum output size in KB.
    pub max_kb: u64,

    /// Warn when the output is smaller than this many KB.
    pub min_kb: Option<u64>,

    /// Qualities to try, highest first.
    pub qualities: QualitySchedule,
}

impl Default for CombineJobConfig {
    fn default() -> Self {
        Self {
            dpi: 100,
            max_kb: 100,
            min_kb: None,
            qualities: QualitySchedule::builtin(95, 5, 10),
        }
    }
}

impl CombineJobConfig {
    pub fn bounds(&self) -> Result<SizeBounds> {
        SizeBounds::from_kb(self.max_kb, self.min_kb)
    }
}

impl SqueezeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            SqueezeError::config(format!("{}: {}", path.display(), e))
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            SqueezeError::config(e.to_string())
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check every section without running anything.
    pub fn validate(&self) -> Result<()> {
        self.jpeg.bounds()?;
        self.pdf.bounds()?;
        self.combine.bounds()?;
        if self.jpeg.width == 0 || self.jpeg.height == 0 {
            return Err(SqueezeError::config("jpeg width and height must be non-zero"));
        }
        if self.pdf.presets.is_empty() {
            return Err(SqueezeError::config("pdf presets must not be empty"));
        }
        let presets = &self.pdf.presets;
        if let Some(repeated) = presets
            .iter()
            .enumerate()
            .find_map(|(i, preset)| presets[..i].contains(preset).then_some(preset))
        {
            return Err(SqueezeError::config(format!(
                "pdf preset {repeated} is listed more than once"
            )));
        }
        if self.combine.dpi == 0 {
            return Err(SqueezeError::config("combine dpi must be positive"));
        }
        Ok(())
    }
}
