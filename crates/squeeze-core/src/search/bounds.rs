//! Size limits for a single search.

use serde::Serialize;

use crate::error::{Result, SqueezeError};

/// Bytes per kilobyte used for all size targets.
pub const KIB: u64 = 1024;

/// Maximum (and optional minimum) acceptable output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeBounds {
    max_bytes: u64,
    min_bytes: Option<u64>,
}

impl SizeBounds {
    /// Create bounds in bytes.
    pub fn new(max_bytes: u64, min_bytes: Option<u64>) -> Result<Self> {
        if max_bytes == 0 {
            return Err(SqueezeError::config("maximum size must be positive"));
        }
        match min_bytes {
            Some(0) => Err(SqueezeError::config("minimum size must be positive")),
            Some(min) if min > max_bytes => Err(SqueezeError::config(format!(
                "minimum size ({min} bytes) exceeds maximum size ({max_bytes} bytes)"
            ))),
            _ => Ok(Self { max_bytes, min_bytes }),
        }
    }

    /// Create bounds in kilobytes (1 KB = 1024 bytes).
    pub fn from_kb(max_kb: u64, min_kb: Option<u64>) -> Result<Self> {
        let to_bytes = |kb: u64| {
            kb.checked_mul(KIB)
                .ok_or_else(|| SqueezeError::config(format!("size of {kb} KB is too large")))
        };
        Self::new(to_bytes(max_kb)?, min_kb.map(to_bytes).transpose()?)
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn min_bytes(&self) -> Option<u64> {
        self.min_bytes
    }

    /// Whether a size is at or under the maximum.
    pub fn fits(&self, size: u64) -> bool {
        size <= self.max_bytes
    }

    /// Whether a size falls below the advisory minimum.
    pub fn below_minimum(&self, size: u64) -> bool {
        self.min_bytes.is_some_and(|min| size < min)
    }
}

/// Format a byte count as kilobytes with one decimal, e.g. `"60.0 KB"`.
pub fn format_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / KIB as f64)
}
