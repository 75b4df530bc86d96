//! find_duplicates - duplicate file finder
//!
//! Walks one or more directory trees and reports sets of files with
//! identical content. Files are first grouped by size; only files sharing a
//! size with at least one other file are read and checksummed (BLAKE3).

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;

use crate::cli::{Cli, OutputFormat};
use crate::config::{Config, Settings};
use crate::duplicates::{DuplicateFinder, FinderConfig};
use crate::error::ExitCode;
use crate::output::{JsonOutput, TextOutput};
use crate::progress::MarkerProgress;

/// Run a scan as described by `cli`, writing the report to stdout.
///
/// # Errors
///
/// Returns an error if the arguments are invalid (bad threshold, missing or
/// non-directory root) or the report cannot be written. Per-file problems
/// are not errors; they are counted in the report.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_app_with_output(cli, &mut out)
}

/// Like [`run_app`], but writes the report to `out`.
///
/// Progress markers, when enabled, still go to stdout.
///
/// # Errors
///
/// See [`run_app`].
pub fn run_app_with_output<W: Write>(cli: Cli, out: &mut W) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref());
    let settings = Settings::resolve(&cli, &config)?;
    log::debug!("Effective settings: {:?}", settings);

    let mut finder_config = FinderConfig::default().with_greater_than(settings.greater_than_bytes);
    if settings.progress {
        finder_config = finder_config.with_progress_callback(Arc::new(MarkerProgress::stdout()));
    }

    let finder = DuplicateFinder::new(finder_config);
    let (groups, summary) = finder.find_duplicates_in_paths(&cli.paths)?;

    log::info!(
        "Scan finished in {:.2?}: {} files, {} hashed, {} duplicate sets, {} errors",
        summary.scan_duration,
        summary.total_files,
        summary.hashed_files,
        summary.duplicate_groups,
        summary.error_count()
    );

    match settings.output {
        OutputFormat::Text => {
            if settings.progress {
                // Terminate the line of progress markers
                writeln!(io::stdout())?;
            }
            TextOutput::new(&groups, &summary)
                .with_threshold(settings.greater_than_mb)
                .write_to(out)?;
        }
        OutputFormat::Json => {
            JsonOutput::new(&groups, &summary).write_to(out)?;
        }
    }
    out.flush()?;

    Ok(ExitCode::Success)
}
