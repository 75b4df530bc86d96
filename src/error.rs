//! Structured error handling and exit codes.

use serde::Serialize;

use crate::duplicates::FinderError;

/// Exit codes for the find_duplicates application.
///
/// - 0: Success (the scan ran to completion, with or without duplicates)
/// - 1: General error (unexpected failure, e.g. unwritable log file)
/// - 2: Invalid arguments (bad flags, missing or non-directory root)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Scan completed normally.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Invalid arguments: The scan never started.
    InvalidArguments = 2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "FD000",
            Self::GeneralError => "FD001",
            Self::InvalidArguments => "FD002",
        }
    }

    /// Pick the exit code for a fatal error.
    ///
    /// Root validation failures are argument errors; anything else is a
    /// general error.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        if err.downcast_ref::<FinderError>().is_some()
            || err.downcast_ref::<ArgumentError>().is_some()
        {
            Self::InvalidArguments
        } else {
            Self::GeneralError
        }
    }
}

/// Invalid option values that clap cannot reject on its own.
#[derive(thiserror::Error, Debug)]
pub enum ArgumentError {
    /// The size threshold is negative or not a finite number.
    #[error("Invalid size threshold: {0} MB")]
    InvalidThreshold(f64),
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "FD002")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{:#}", err),
        }
    }
}
