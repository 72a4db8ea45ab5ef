//! Error types for the squeeze-core library.

use thiserror::Error;

/// Main error type for the squeeze library.
#[derive(Error, Debug)]
pub enum SqueezeError {
    /// Bad search or job parameters (empty schedule, zero size bound, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The input could not be used (missing file, no pages, no frames).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An external tool exited with a non-zero status.
    #[error("{tool} failed with exit code {code:?}: {stderr}")]
    ExternalTool {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    /// An external tool could not be located.
    #[error("external tool not found: {0}")]
    ToolNotFound(String),

    /// An external tool did not finish in time and was killed.
    #[error("{tool} timed out after {seconds}s")]
    Timeout { tool: String, seconds: u64 },

    /// PDF parsing or rendering error.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SqueezeError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub(crate) fn input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result type for the squeeze library.
pub type Result<T> = std::result::Result<T, SqueezeError>;
