//! Logging infrastructure for find_duplicates.
//!
//! This module provides structured logging using the `log` facade and `env_logger` backend.
//! Log levels are determined by (in priority order):
//!
//! 1. `RUST_LOG` environment variable (if set)
//! 2. CLI flag: `-d` (debug) or `-dd` (trace)
//! 3. Default: warn level, so per-file errors still reach the diagnostic stream
//!
//! Diagnostics go to stderr unless a log file is given with `-l`, in which
//! case they are appended to that file without color codes.
//!
//! # Example
//!
//! ```rust,no_run
//! use find_duplicates::logging::init_logging;
//! use std::path::Path;
//!
//! // Warnings and errors to stderr
//! init_logging(0, None).unwrap();
//!
//! // Or: debug output into a file
//! // init_logging(1, Some(Path::new("scan.log"))).unwrap();
//! ```

use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

/// Initialize the logging subsystem.
///
/// # Arguments
///
/// * `debug` - Count of `-d` flags (0=warn, 1=debug, 2+=trace)
/// * `log_file` - Append diagnostics to this file instead of stderr
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a logger is
/// already installed.
pub fn init_logging(debug: u8, log_file: Option<&Path>) -> Result<()> {
    let use_env = env::var("RUST_LOG").is_ok();

    let mut builder = Builder::new();

    if use_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(debug));
    }

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Cannot open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
        builder.write_style(WriteStyle::Never);
    }

    configure_format(&mut builder, debug);

    builder
        .try_init()
        .context("Logger was already initialized")?;

    if use_env {
        log::debug!(
            "Logging initialized from RUST_LOG environment variable: {:?}",
            env::var("RUST_LOG").ok()
        );
    } else {
        log::debug!("Logging initialized at level: {:?}", determine_level(debug));
    }

    Ok(())
}

/// Determine the log level from the `-d` count.
fn determine_level(debug: u8) -> LevelFilter {
    match debug {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Configure the log format.
///
/// - Default: level and message
/// - With `-d`: timestamp, level, module path and message
fn configure_format(builder: &mut Builder, debug: u8) {
    builder.format(move |buf, record| {
        let level = record.level();
        let level_style = buf.default_level_style(level);

        if debug >= 1 {
            writeln!(
                buf,
                "{} {level_style}{:<5}{level_style:#} [{}] {}",
                buf.timestamp_seconds(),
                level,
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        } else {
            writeln!(
                buf,
                "{level_style}{:<5}{level_style:#} {}",
                level,
                record.args()
            )
        }
    });
}

/// Get the current log level as a string.
pub fn current_level_name() -> &'static str {
    match log::max_level() {
        LevelFilter::Off => "off",
        LevelFilter::Error => "error",
        LevelFilter::Warn => "warn",
        LevelFilter::Info => "info",
        LevelFilter::Debug => "debug",
        LevelFilter::Trace => "trace",
    }
}
