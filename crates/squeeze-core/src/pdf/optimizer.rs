//! External PDF optimizer (Ghostscript `pdfwrite`).

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, SqueezeError};

/// Interval between exit checks while waiting on the optimizer.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Ghostscript `-dPDFSETTINGS` presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfPreset {
    /// Lowest quality, smallest file (72 dpi images).
    Screen,
    /// Medium quality (150 dpi images).
    Ebook,
    /// High quality, largest file (300 dpi images).
    Printer,
}

impl PdfPreset {
    /// Presets in the order they are tried: smallest output first.
    pub const ALL: [PdfPreset; 3] = [PdfPreset::Screen, PdfPreset::Ebook, PdfPreset::Printer];

    /// The Ghostscript setting name, e.g. `/screen`.
    pub fn setting(&self) -> &'static str {
        match self {
            PdfPreset::Screen => "/screen",
            PdfPreset::Ebook => "/ebook",
            PdfPreset::Printer => "/printer",
        }
    }
}

impl fmt::Display for PdfPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.setting())
    }
}

/// Rewrites a PDF with a size/quality preset.
pub trait PdfOptimizer {
    /// Write an optimized copy of `input` to `output`.
    fn optimize(&self, input: &Path, output: &Path, preset: PdfPreset) -> Result<()>;
}

/// Ghostscript invoked as a subprocess.
#[derive(Debug, Clone)]
pub struct Ghostscript {
    binary: PathBuf,
    timeout: Option<Duration>,
}

impl Ghostscript {
    /// Locate `program` on `PATH` (or use it directly if it is a path).
    pub fn locate(program: impl AsRef<Path>) -> Result<Self> {
        let program = program.as_ref();
        let binary = which::which(program)
            .map_err(|_| SqueezeError::ToolNotFound(program.display().to_string()))?;
        debug!("Using ghostscript at {}", binary.display());
        Ok(Self { binary, timeout: None })
    }

    /// Kill the subprocess if it runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn tool_name(&self) -> String {
        self.binary
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.binary.display().to_string())
    }

    fn args(input: &Path, output: &Path, preset: PdfPreset) -> Vec<String> {
        vec![
            "-sDEVICE=pdfwrite".to_string(),
            "-dCompatibilityLevel=1.4".to_string(),
            format!("-dPDFSETTINGS={}", preset.setting()),
            "-dNOPAUSE".to_string(),
            "-dQUIET".to_string(),
            "-dBATCH".to_string(),
            "-dDetectDuplicateImages".to_string(),
            "-dCompressFonts=true".to_string(),
            format!("-sOutputFile={}", output.display()),
            input.display().to_string(),
        ]
    }
}

impl PdfOptimizer for Ghostscript {
    fn optimize(&self, input: &Path, output: &Path, preset: PdfPreset) -> Result<()> {
        let tool = self.tool_name();
        info!("Running {} with {}", tool, preset);

        let mut child = Command::new(&self.binary)
            .args(Self::args(input, output, preset))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        // Drain stderr concurrently; a full pipe would stall the child.
        let stderr_reader = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut buf = String::new();
                let _ = stderr.read_to_string(&mut buf);
                buf
            })
        });

        let started = Instant::now();
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if let Some(limit) = self.timeout {
                if started.elapsed() >= limit {
                    warn!("{} exceeded {:?}, killing", tool, limit);
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(SqueezeError::Timeout {
                        tool,
                        seconds: limit.as_secs(),
                    });
                }
            }
            thread::sleep(POLL_INTERVAL);
        };

        let stderr = stderr_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        if !status.success() {
            return Err(SqueezeError::ExternalTool {
                tool,
                code: status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        debug!("{} finished in {:?}", tool, started.elapsed());
        Ok(())
    }
}
