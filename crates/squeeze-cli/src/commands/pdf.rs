//! Pdf command - compress a PDF by trying Ghostscript presets.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tracing::{debug, info};

use squeeze_core::jobs::{COMPRESSED_SUFFIX, compress_pdf, output_path_for};
use squeeze_core::pdf::Ghostscript;

use super::{load_config, print_report, resolve_input, spinner};

/// Arguments for the pdf command.
#[derive(Args)]
pub struct PdfArgs {
    /// Input PDF (prompted for if omitted)
    input: Option<PathBuf>,

    /// Output file (default: <input>_compressed.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum output size in KB
    #[arg(long)]
    max_kb: Option<u64>,

    /// Warn when the output is below this size in KB
    #[arg(long)]
    min_kb: Option<u64>,

    /// Ghostscript executable
    #[arg(long)]
    gs: Option<PathBuf>,

    /// Seconds before a Ghostscript run is killed (0 = no limit)
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: PdfArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut job = load_config(config_path)?.pdf;

    if let Some(max_kb) = args.max_kb {
        job.max_kb = max_kb;
    }
    if args.min_kb.is_some() {
        job.min_kb = args.min_kb;
    }
    if let Some(gs) = args.gs {
        job.ghostscript = gs;
    }
    if let Some(timeout) = args.timeout {
        job.timeout_secs = timeout;
    }
    let bounds = job.bounds()?;

    let input = resolve_input(args.input, "Path to PDF: ")?;
    let output = args
        .output
        .unwrap_or_else(|| output_path_for(&input, COMPRESSED_SUFFIX, "pdf"));

    let optimizer = Ghostscript::locate(&job.ghostscript)?.with_timeout(job.timeout());

    info!("Processing file: {}", input.display());

    let pb = spinner(format!("Compressing with {}...", optimizer.binary().display()))?;
    let result = compress_pdf(&input, &output, &job, &optimizer);
    pb.finish_and_clear();

    let report = result?;
    print_report(&report, &bounds, args.json, |preset| preset.to_string())?;

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}
