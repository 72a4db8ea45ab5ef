//! Combine command - render every PDF page into one compressed JPEG.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tracing::{debug, info};

use squeeze_core::jobs::{COMBINED_SUFFIX, output_path_for, pdf_to_jpeg};
use squeeze_core::pdf::HayroRasterizer;

use super::{load_config, print_report, resolve_input, spinner};

/// Arguments for the combine command.
#[derive(Args)]
pub struct CombineArgs {
    /// Input PDF (prompted for if omitted)
    input: Option<PathBuf>,

    /// Output file (default: <input>_combined.jpg)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render resolution in dots per inch
    #[arg(long)]
    dpi: Option<u32>,

    /// Maximum output size in KB
    #[arg(long)]
    max_kb: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: CombineArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut job = load_config(config_path)?.combine;

    if let Some(dpi) = args.dpi {
        job.dpi = dpi;
    }
    if let Some(max_kb) = args.max_kb {
        job.max_kb = max_kb;
    }
    let bounds = job.bounds()?;

    let input = resolve_input(args.input, "Enter path to your PDF file: ")?;
    let output = args
        .output
        .unwrap_or_else(|| output_path_for(&input, COMBINED_SUFFIX, "jpg"));

    info!("Processing file: {}", input.display());

    let pb = spinner(format!("Rendering pages at {} DPI...", job.dpi))?;
    let result = pdf_to_jpeg(&input, &output, &job, &HayroRasterizer::new());
    pb.finish_and_clear();

    let report = result?;
    print_report(&report, &bounds, args.json, |q| format!("quality={q}"))?;

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}
