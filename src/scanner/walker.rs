//! Directory walker built on walkdir.
//!
//! # Overview
//!
//! [`Walker`] visits every regular file below one or more roots, one root
//! after another, and yields a [`FileEntry`] for each file larger than the
//! configured threshold.
//!
//! # Behavior
//!
//! - Symbolic links are never followed and never reported
//! - Fifos, sockets and device files are skipped
//! - Directory entries are visited in file-name order
//! - Unreadable directories and files become [`ScanError`] items; the walk
//!   carries on with the next entry
//! - Roots that repeat, or sit inside another root, are dropped so each file
//!   is visited once
//!
//! # Example
//!
//! ```no_run
//! use find_duplicates::scanner::{Walker, WalkerConfig};
//! use std::path::PathBuf;
//!
//! let roots = vec![PathBuf::from("/home/user/Downloads"), PathBuf::from("/mnt/backup")];
//! let walker = Walker::new(roots, WalkerConfig::default());
//!
//! let mut walk = walker.walk();
//! let files: Vec<_> = walk.by_ref().filter_map(Result::ok).collect();
//! println!("{} candidates out of {} files", files.len(), walk.files_visited());
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use super::{FileEntry, ScanError, WalkerConfig};
use crate::progress::{Marker, ProgressCallback};

/// Sequential walker over a set of roots.
pub struct Walker {
    /// Roots left after overlap removal
    roots: Vec<PathBuf>,
    /// Walker configuration
    config: WalkerConfig,
    /// Optional progress callback
    progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for Walker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walker")
            .field("roots", &self.roots)
            .field("config", &self.config)
            .field("progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}

impl Walker {
    /// Create a walker for the given roots.
    ///
    /// Overlapping roots are collapsed here; see [`Walker::roots`].
    #[must_use]
    pub fn new(roots: Vec<PathBuf>, config: WalkerConfig) -> Self {
        Self {
            roots: remove_overlapping_roots(roots),
            config,
            progress_callback: None,
        }
    }

    /// Report a marker for every file visited and every error.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// The roots that will actually be walked.
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Start walking.
    ///
    /// The returned iterator also keeps counts of files visited and errors
    /// seen; drive it with `by_ref()` to read them afterwards.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            walker: self,
            next_root: 0,
            current: None,
            files_visited: 0,
            errors: 0,
        }
    }

    fn mark(&self, marker: Marker) {
        if let Some(ref callback) = self.progress_callback {
            callback.on_marker(marker);
        }
    }
}

/// Iterator over the files found by a [`Walker`].
pub struct Walk<'a> {
    walker: &'a Walker,
    next_root: usize,
    current: Option<walkdir::IntoIter>,
    files_visited: usize,
    errors: usize,
}

impl Walk<'_> {
    /// Files seen so far, whether or not they passed the size threshold.
    #[must_use]
    pub fn files_visited(&self) -> usize {
        self.files_visited
    }

    /// Errors yielded so far.
    #[must_use]
    pub fn errors(&self) -> usize {
        self.errors
    }

    fn open_next_root(&mut self) -> bool {
        let Some(root) = self.walker.roots.get(self.next_root) else {
            return false;
        };
        self.next_root += 1;
        log::debug!("Walking {}", root.display());
        self.current = Some(
            WalkDir::new(root)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter(),
        );
        true
    }

    fn error(&mut self, error: ScanError) -> Option<Result<FileEntry, ScanError>> {
        log::warn!("{}", error);
        self.errors += 1;
        self.walker.mark(Marker::Error);
        Some(Err(error))
    }

    fn visit(&mut self, entry: &walkdir::DirEntry) -> Option<Result<FileEntry, ScanError>> {
        let file_type = entry.file_type();
        if file_type.is_dir() {
            return None;
        }
        if file_type.is_symlink() {
            log::trace!("Skipping symlink: {}", entry.path().display());
            return None;
        }
        if !file_type.is_file() {
            log::trace!("Skipping special file: {}", entry.path().display());
            return None;
        }

        self.files_visited += 1;
        let path = entry.path();
        let metadata = match std::fs::symlink_metadata(path) {
            Ok(m) => m,
            Err(e) => return self.error(ScanError::from_io(path.to_path_buf(), e)),
        };
        self.walker.mark(Marker::Scanned);

        let size = metadata.len();
        if !self.walker.config.accepts_size(size) {
            log::trace!(
                "Skipping file at or below threshold ({} bytes): {}",
                size,
                path.display()
            );
            return None;
        }

        Some(Ok(FileEntry::new(path.to_path_buf(), size)))
    }
}

impl Iterator for Walk<'_> {
    type Item = Result<FileEntry, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(current) = self.current.as_mut() else {
                if self.open_next_root() {
                    continue;
                }
                return None;
            };

            match current.next() {
                None => self.current = None,
                Some(Ok(entry)) => {
                    if let Some(item) = self.visit(&entry) {
                        return Some(item);
                    }
                }
                Some(Err(e)) => {
                    let path = e
                        .path()
                        .map_or_else(PathBuf::new, std::borrow::ToOwned::to_owned);
                    let error = match e.into_io_error() {
                        Some(io) => ScanError::from_io(path, io),
                        None => ScanError::Walk {
                            path,
                            message: "filesystem loop".to_string(),
                        },
                    };
                    return self.error(error);
                }
            }
        }
    }
}

/// Drop roots that repeat or live inside another root.
///
/// Roots are compared by canonical path. A root that cannot be canonicalized
/// is kept as given so that walking it surfaces the error.
fn remove_overlapping_roots(roots: Vec<PathBuf>) -> Vec<PathBuf> {
    let canonical: Vec<Option<PathBuf>> = roots
        .iter()
        .map(|root| std::fs::canonicalize(root).ok())
        .collect();

    roots
        .into_iter()
        .enumerate()
        .filter(|(i, root)| {
            let Some(ref mine) = canonical[*i] else {
                return true;
            };
            let covered_by = canonical.iter().enumerate().find_map(|(j, other)| {
                let other = other.as_ref()?;
                let covers = if other == mine {
                    j < *i
                } else {
                    mine.starts_with(other)
                };
                covers.then_some(other)
            });
            if let Some(parent) = covered_by {
                log::info!(
                    "Skipping root {} (already covered by {})",
                    root.display(),
                    parent.display()
                );
            }
            covered_by.is_none()
        })
        .map(|(_, root)| root)
        .collect()
}

/// Check that a root exists and is a directory.
///
/// # Errors
///
/// Returns the underlying I/O error if the path cannot be inspected.
pub fn root_is_dir(path: &Path) -> std::io::Result<bool> {
    Ok(std::fs::metadata(path)?.is_dir())
}
