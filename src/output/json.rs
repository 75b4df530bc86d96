//! JSON output formatter for duplicate scan results.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "hash": "abc123...",
//!       "size": 1024,
//!       "files": ["/path/to/file1.txt", "/path/to/file2.txt"]
//!     }
//!   ],
//!   "errors": [
//!     { "path": "/path/locked", "message": "Permission denied: /path/locked" }
//!   ],
//!   "summary": {
//!     "total_files": 100,
//!     "candidate_files": 80,
//!     "hashed_files": 12,
//!     "duplicate_groups": 5,
//!     "duplicate_files": 6,
//!     "reclaimable_space": 51200,
//!     "greater_than": 0,
//!     "error_count": 1,
//!     "scan_duration_ms": 1234
//!   }
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, ScanSummary};

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// BLAKE3 hash as hexadecimal string (64 characters)
    pub hash: String,
    /// File size in bytes
    pub size: u64,
    /// Paths of all duplicate files, as found by the walker
    pub files: Vec<String>,
}

impl From<&DuplicateGroup> for JsonDuplicateGroup {
    fn from(group: &DuplicateGroup) -> Self {
        Self {
            hash: group.hash_hex(),
            size: group.size,
            files: group
                .paths
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// A per-file error in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonScanError {
    /// Path the error refers to
    pub path: String,
    /// Human-readable description
    pub message: String,
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Files visited by the walker
    pub total_files: usize,
    /// Files above the size threshold
    pub candidate_files: usize,
    /// Checksums computed
    pub hashed_files: usize,
    /// Number of duplicate sets
    pub duplicate_groups: usize,
    /// Copies beyond the first in each set
    pub duplicate_files: usize,
    /// Bytes held by those copies
    pub reclaimable_space: u64,
    /// Size threshold in bytes
    pub greater_than: u64,
    /// Number of per-file errors
    pub error_count: usize,
    /// Scan duration in milliseconds
    pub scan_duration_ms: u64,
}

impl From<&ScanSummary> for JsonSummary {
    fn from(summary: &ScanSummary) -> Self {
        Self {
            total_files: summary.total_files,
            candidate_files: summary.candidate_files,
            hashed_files: summary.hashed_files,
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            reclaimable_space: summary.reclaimable_space,
            greater_than: summary.greater_than,
            error_count: summary.error_count(),
            scan_duration_ms: u64::try_from(summary.scan_duration.as_millis())
                .unwrap_or(u64::MAX),
        }
    }
}

/// Complete JSON document.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Duplicate sets
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Per-file errors
    pub errors: Vec<JsonScanError>,
    /// Summary statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build the JSON document from scan results.
    #[must_use]
    pub fn new(groups: &[DuplicateGroup], summary: &ScanSummary) -> Self {
        Self {
            duplicates: groups.iter().map(JsonDuplicateGroup::from).collect(),
            errors: summary
                .scan_errors
                .iter()
                .map(|e| JsonScanError {
                    path: e.path().to_string_lossy().into_owned(),
                    message: e.to_string(),
                })
                .collect(),
            summary: JsonSummary::from(summary),
        }
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}
