//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Single-threaded directory walking across several roots using walkdir
//! - Streaming content checksums with BLAKE3
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: BLAKE3 file hashing (streaming, bounded buffer)
//!
//! # Example
//!
//! ```no_run
//! use find_duplicates::scanner::{Walker, WalkerConfig};
//! use std::path::PathBuf;
//!
//! // Only consider files larger than 1 KiB
//! let config = WalkerConfig::default().with_greater_than(1024);
//!
//! let walker = Walker::new(vec![PathBuf::from(".")], config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use hasher::{hash_to_hex, hex_to_hash, Hash, Hasher, DEFAULT_BUFFER_SIZE};
pub use walker::Walker;

/// A regular file discovered during the walk.
///
/// Created once by the walker and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path to the file, rooted at the walk root it was found under
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileEntry {
    /// Create a new FileEntry.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Size threshold in bytes. Only files strictly larger than this are
    /// reported, so the default of 0 also drops empty files.
    pub greater_than: u64,
}

impl WalkerConfig {
    /// Set the exclusive size threshold in bytes.
    #[must_use]
    pub fn with_greater_than(mut self, bytes: u64) -> Self {
        self.greater_than = bytes;
        self
    }

    /// Check whether a file of `size` bytes passes the threshold.
    #[must_use]
    pub fn accepts_size(&self, size: u64) -> bool {
        size > self.greater_than
    }
}

/// Per-file errors raised while scanning.
///
/// None of these abort a scan; they are counted, reported with an error
/// marker, and the file is left out of further processing.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path vanished between being listed and being inspected.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed below a root (e.g. unreadable directory).
    #[error("Cannot read {path}: {message}")]
    Walk {
        /// Path the walker failed on
        path: PathBuf,
        /// Description from the traversal library
        message: String,
    },

    /// Checksum computation failed.
    #[error(transparent)]
    HashError(#[from] HashError),
}

impl ScanError {
    /// Classify an I/O error raised for `path`.
    #[must_use]
    pub fn from_io(path: PathBuf, error: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            ErrorKind::NotFound => Self::NotFound(path),
            _ => Self::Io {
                path,
                source: error,
            },
        }
    }

    /// The path this error refers to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::PermissionDenied(path) | Self::NotFound(path) => path.as_path(),
            Self::Io { path, .. } | Self::Walk { path, .. } => path.as_path(),
            Self::HashError(e) => e.path(),
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Classify an I/O error raised while reading `path`.
    #[must_use]
    pub fn from_io(path: PathBuf, error: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::NotFound => Self::NotFound(path),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io {
                path,
                source: error,
            },
        }
    }

    /// The path this error refers to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound(path) | Self::PermissionDenied(path) => path.as_path(),
            Self::Io { path, .. } => path.as_path(),
        }
    }
}
