//! Subcommands and the output helpers they share.

pub mod combine;
pub mod config;
pub mod jpeg;
pub mod pdf;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use squeeze_core::models::config::SqueezeConfig;
use squeeze_core::search::{SearchReport, SearchStatus, SizeBounds, format_kb};

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("squeeze")
        .join("config.json")
}

/// Load the explicit config file, else the default file if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<SqueezeConfig> {
    if let Some(path) = config_path {
        return Ok(SqueezeConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        tracing::debug!("Loading config from {}", default_path.display());
        Ok(SqueezeConfig::from_file(&default_path)?)
    } else {
        Ok(SqueezeConfig::default())
    }
}

/// Use the given input path or ask for one on the terminal.
pub fn resolve_input(input: Option<PathBuf>, prompt: &str) -> anyhow::Result<PathBuf> {
    let path = match input {
        Some(path) => path,
        None => {
            let term = Term::stdout();
            term.write_str(prompt)?;
            // Term::read_line returns nothing when stdin is piped.
            let line = if term.is_term() {
                term.read_line()?
            } else {
                let mut buf = String::new();
                io::stdin().read_line(&mut buf)?;
                buf
            };
            let line = line.trim();
            if line.is_empty() {
                anyhow::bail!("No input file given");
            }
            PathBuf::from(line)
        }
    };

    if !path.is_file() {
        anyhow::bail!("File not found: {}", path.display());
    }
    Ok(path)
}

/// Spinner shown while a job runs.
pub fn spinner(message: String) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Print a job report as JSON or as human-readable status lines.
pub fn print_report<L: Serialize>(
    report: &SearchReport<L>,
    bounds: &SizeBounds,
    json: bool,
    label: impl Fn(&L) -> String,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for attempt in &report.attempts {
        println!("→ Tried {}: {}", label(&attempt.level), format_kb(attempt.size));
    }

    match report.status {
        SearchStatus::TargetMet | SearchStatus::BelowMinimum => {
            println!(
                "{} Saved '{}' at {} ({})",
                style("✓").green(),
                report.path.display(),
                label(&report.level),
                format_kb(report.size)
            );
            if report.status == SearchStatus::BelowMinimum {
                let min = bounds.min_bytes().unwrap_or_default();
                println!(
                    "{} Warning: output below {}",
                    style("⚠").yellow(),
                    format_kb(min)
                );
            }
        }
        SearchStatus::TargetNotMet => {
            println!(
                "{} Couldn't get under {}. Saved '{}' at {} ({})",
                style("!").red(),
                format_kb(bounds.max_bytes()),
                report.path.display(),
                label(&report.level),
                format_kb(report.size)
            );
        }
    }

    Ok(())
}
