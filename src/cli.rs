//! Command-line interface definitions for find_duplicates.
//!
//! This module defines all CLI arguments using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Scan two directories
//! find_duplicates /home/user/Downloads /home/user/Pictures/
//!
//! # Paths with spaces must be quoted
//! find_duplicates "/home/user/My Documents" "/mnt/backup/Documents"
//!
//! # Only files larger than 5 MB, debug diagnostics into a file
//! find_duplicates --greater-than 5 -d -l scan.log /mnt/backup
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Bytes per megabyte as used by `--greater-than`.
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

const EXAMPLES: &str = "\
Examples:
  find_duplicates /home/user/Downloads /home/user/Pictures/
  find_duplicates \"/home/user/My Documents\" \"/mnt/backup/Documents\"
  find_duplicates --greater-than 5 /mnt/backup  # Find duplicates larger than 5MB

Progress: '.' per file sized, 'C' per checksum, 'E' per error (details on stderr).";

/// Find duplicate files based on content checksums.
///
/// Files are first grouped by size; only files sharing a size are read and
/// checksummed.
#[derive(Debug, Parser)]
#[command(name = "find_duplicates")]
#[command(author, version, about, long_about = None, after_help = EXAMPLES)]
pub struct Cli {
    /// Only consider files larger than SIZE_MB megabytes (fractions allowed)
    #[arg(
        long = "greater-than",
        visible_alias = "gt",
        value_name = "SIZE_MB",
        value_parser = parse_megabytes
    )]
    pub greater_than: Option<f64>,

    /// Enable diagnostic logging (-d for debug, -dd for trace)
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Write diagnostics to LOGFILE instead of stderr
    #[arg(short = 'l', long = "log-file", value_name = "LOGFILE")]
    pub log_file: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Do not print progress markers
    #[arg(long)]
    pub no_progress: bool,

    /// Configuration file to load instead of the default location
    #[arg(long, value_name = "PATH", env = "FIND_DUPLICATES_CONFIG")]
    pub config: Option<PathBuf>,

    /// One or more folders to search for duplicates in
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report with progress markers
    #[default]
    Text,
    /// JSON document for scripting (no progress markers)
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a megabyte count for `--greater-than`.
///
/// # Examples
///
/// ```
/// use find_duplicates::cli::parse_megabytes;
///
/// assert_eq!(parse_megabytes("5").unwrap(), 5.0);
/// assert_eq!(parse_megabytes("0.5").unwrap(), 0.5);
/// assert!(parse_megabytes("-1").is_err());
/// ```
///
/// # Errors
///
/// Returns an error if the value is not a number, is negative, or is not
/// finite.
pub fn parse_megabytes(s: &str) -> Result<f64, String> {
    let s = s.trim();
    let value: f64 = s.parse().map_err(|_| format!("Invalid number: '{s}'"))?;

    if !value.is_finite() {
        return Err(format!("Size must be a finite number: '{s}'"));
    }
    if value < 0.0 {
        return Err("Size cannot be negative".to_string());
    }

    Ok(value)
}

/// Convert a megabyte threshold into whole bytes.
///
/// Rounds down, which keeps `size > threshold` exact for integral file sizes.
#[must_use]
pub fn megabytes_to_bytes(megabytes: f64) -> u64 {
    (megabytes * BYTES_PER_MB) as u64
}
