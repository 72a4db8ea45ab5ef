//! Jpeg command - resize a photo and compress it under a size limit.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tracing::{debug, info};

use squeeze_core::jobs::{RESIZED_SUFFIX, output_path_for, resize_and_compress};

use super::{load_config, print_report, resolve_input, spinner};

/// Arguments for the jpeg command.
#[derive(Args)]
pub struct JpegArgs {
    /// Input image (prompted for if omitted)
    input: Option<PathBuf>,

    /// Output file (default: <input>_resized.jpg)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Maximum output size in KB
    #[arg(long)]
    max_kb: Option<u64>,

    /// Warn when the output is below this size in KB
    #[arg(long)]
    min_kb: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: JpegArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut job = load_config(config_path)?.jpeg;

    if let Some(width) = args.width {
        job.width = width;
    }
    if let Some(height) = args.height {
        job.height = height;
    }
    if let Some(max_kb) = args.max_kb {
        job.max_kb = max_kb;
    }
    if args.min_kb.is_some() {
        job.min_kb = args.min_kb;
    }
    let bounds = job.bounds()?;

    let input = resolve_input(args.input, "Path to image: ")?;
    let output = args
        .output
        .unwrap_or_else(|| output_path_for(&input, RESIZED_SUFFIX, "jpg"));

    info!("Processing file: {}", input.display());

    let pb = spinner(format!("Resizing to {}x{} and compressing...", job.width, job.height))?;
    let result = resize_and_compress(&input, &output, &job);
    pb.finish_and_clear();

    let report = result?;
    print_report(&report, &bounds, args.json, |q| format!("quality={q}"))?;

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}
