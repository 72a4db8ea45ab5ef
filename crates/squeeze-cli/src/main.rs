//! CLI application for shrinking images and PDFs under a target size.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{combine, config, jpeg, pdf};

/// Shrink photos and PDFs until they fit a size limit
#[derive(Parser)]
#[command(name = "squeeze")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resize a photo and compress it as JPEG
    Jpeg(jpeg::JpegArgs),

    /// Compress a PDF with Ghostscript presets
    Pdf(pdf::PdfArgs),

    /// Render all PDF pages into one compressed JPEG
    Combine(combine::CombineArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Jpeg(args) => jpeg::run(args, config_path),
        Commands::Pdf(args) => pdf::run(args, config_path),
        Commands::Combine(args) => combine::run(args, config_path),
        Commands::Config(args) => config::run(args, config_path),
    }
}
