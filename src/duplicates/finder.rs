//! Duplicate finder implementation with two-phase detection.
//!
//! # Overview
//!
//! This module orchestrates the duplicate detection pipeline:
//! 1. **Walk**: Collect every regular file under the roots
//! 2. **Phase 1 - Size grouping**: Group files by size (see [`crate::duplicates::groups`])
//! 3. **Phase 2 - Checksums**: Hash files that share a size and group them by hash
//!
//! Everything runs on the calling thread, one file at a time.
//!
//! # Example
//!
//! ```no_run
//! use find_duplicates::scanner::{Hasher, Walker, WalkerConfig, FileEntry};
//! use find_duplicates::duplicates::{group_by_size_structured, hash_size_groups};
//! use std::path::PathBuf;
//!
//! // Phase 1: Collect and group files by size
//! let walker = Walker::new(vec![PathBuf::from(".")], WalkerConfig::default());
//! let files: Vec<FileEntry> = walker.walk().filter_map(Result::ok).collect();
//! let (size_groups, _) = group_by_size_structured(files);
//!
//! // Phase 2: Checksum the survivors
//! let (groups, stats) = hash_size_groups(size_groups, &Hasher::new(), None);
//!
//! println!("{} duplicate sets from {} checksums", groups.len(), stats.hashed_files);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytesize::ByteSize;

use super::{group_by_size_structured, DuplicateGroup, SizeGroup};
use crate::progress::{Marker, Phase, ProgressCallback};
use crate::scanner::{walker, FileEntry, Hash, HashError, Hasher, ScanError, Walker, WalkerConfig};

/// Statistics from the checksum phase.
#[derive(Debug, Default)]
pub struct HashStats {
    /// Number of files handed to the phase
    pub input_files: usize,
    /// Number of files successfully hashed
    pub hashed_files: usize,
    /// Files that could not be read
    pub errors: Vec<HashError>,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
}

/// Checksum every file of every size group and collect the duplicate sets
/// (Phase 2 of duplicate detection).
///
/// Groups are emitted in the order of `size_groups`. Within one size group,
/// hash groups appear in the order their first member was hashed and paths
/// keep their input order. Unreadable files are logged, reported with an
/// error marker and dropped; the remaining files are still grouped.
#[must_use]
pub fn hash_size_groups(
    size_groups: Vec<SizeGroup>,
    hasher: &Hasher,
    progress: Option<&Arc<dyn ProgressCallback>>,
) -> (Vec<DuplicateGroup>, HashStats) {
    let input_files: usize = size_groups.iter().map(SizeGroup::len).sum();
    let mut stats = HashStats {
        input_files,
        ..Default::default()
    };
    let mut duplicates = Vec::new();

    if input_files == 0 {
        log::debug!("Phase 2: No files to process");
        return (duplicates, stats);
    }

    if let Some(callback) = progress {
        callback.on_phase_start(Phase::Hashing, input_files);
    }
    log::info!("Phase 2: Computing checksums for {} files", input_files);

    for group in size_groups {
        let mut order: Vec<(Hash, Vec<PathBuf>)> = Vec::new();
        let mut index: HashMap<Hash, usize> = HashMap::new();

        for file in group.files {
            match hasher.full_hash(&file.path) {
                Ok(hash) => {
                    stats.hashed_files += 1;
                    if let Some(callback) = progress {
                        callback.on_marker(Marker::Hashed);
                    }
                    match index.get(&hash) {
                        Some(&i) => order[i].1.push(file.path),
                        None => {
                            index.insert(hash, order.len());
                            order.push((hash, vec![file.path]));
                        }
                    }
                }
                Err(e) => {
                    log::warn!("{}", e);
                    if let Some(callback) = progress {
                        callback.on_marker(Marker::Error);
                    }
                    stats.errors.push(e);
                }
            }
        }

        for (hash, paths) in order {
            if paths.len() > 1 {
                log::debug!(
                    "Duplicate set of {} files ({} bytes each)",
                    paths.len(),
                    group.size
                );
                duplicates.push(DuplicateGroup::new(hash, group.size, paths));
            }
        }
    }

    stats.duplicate_groups = duplicates.len();

    if let Some(callback) = progress {
        callback.on_phase_end(Phase::Hashing);
    }
    log::info!(
        "Phase 2 complete: {} checksums, {} duplicate sets, {} errors",
        stats.hashed_files,
        stats.duplicate_groups,
        stats.errors.len()
    );

    (duplicates, stats)
}

/// Configuration for the duplicate finder.
#[derive(Clone, Default)]
pub struct FinderConfig {
    /// Walker configuration (size threshold)
    pub walker_config: WalkerConfig,
    /// Read buffer size for checksums; `None` uses the hasher default
    pub buffer_size: Option<usize>,
    /// Optional progress callback
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("walker_config", &self.walker_config)
            .field("buffer_size", &self.buffer_size)
            .field("progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}

impl FinderConfig {
    /// Only consider files strictly larger than `bytes`.
    #[must_use]
    pub fn with_greater_than(mut self, bytes: u64) -> Self {
        self.walker_config = self.walker_config.with_greater_than(bytes);
        self
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the checksum read buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = Some(size);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Number of files visited by the walker, including unreadable ones
    pub total_files: usize,
    /// Number of files above the size threshold
    pub candidate_files: usize,
    /// Total size of the candidate files in bytes
    pub total_size: u64,
    /// Number of files eliminated by size grouping (unique sizes)
    pub eliminated_by_size: usize,
    /// Number of checksums computed
    pub hashed_files: usize,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Total number of duplicate files (excluding one original per group)
    pub duplicate_files: usize,
    /// Total space that could be reclaimed by removing duplicates
    pub reclaimable_space: u64,
    /// Size threshold in effect, in bytes
    pub greater_than: u64,
    /// Duration of the entire scan
    pub scan_duration: Duration,
    /// Per-file errors encountered during the scan
    pub scan_errors: Vec<ScanError>,
}

impl ScanSummary {
    /// Number of per-file errors.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.scan_errors.len()
    }

    /// Format reclaimable space as human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize::b(self.reclaimable_space).to_string()
    }

    fn record_groups(&mut self, groups: &[DuplicateGroup]) {
        self.duplicate_groups = groups.len();
        self.duplicate_files = groups.iter().map(DuplicateGroup::duplicate_count).sum();
        self.reclaimable_space = groups.iter().map(DuplicateGroup::wasted_space).sum();
    }
}

/// Fatal errors that stop a scan before it starts.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// No roots were given.
    #[error("No paths given to scan")]
    NoPaths,

    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The provided path could not be inspected.
    #[error("Cannot access {path}: {source}")]
    Inaccessible {
        /// Path that failed validation
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Duplicate finder that runs the full pipeline.
///
/// # Example
///
/// ```no_run
/// use find_duplicates::duplicates::{DuplicateFinder, FinderConfig};
/// use std::path::PathBuf;
///
/// let config = FinderConfig::default().with_greater_than(5 * 1024 * 1024);
/// let finder = DuplicateFinder::new(config);
///
/// let roots = vec![PathBuf::from("/home/user/Downloads"), PathBuf::from("/mnt/backup")];
/// let (groups, summary) = finder.find_duplicates_in_paths(&roots).unwrap();
///
/// println!("Found {} duplicate sets", summary.duplicate_groups);
/// println!("Reclaimable space: {}", summary.reclaimable_display());
/// ```
#[derive(Debug)]
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let mut hasher = Hasher::new();
        if let Some(size) = config.buffer_size {
            hasher = hasher.with_buffer_size(size);
        }
        Self { config, hasher }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find duplicates below a single root.
    ///
    /// # Errors
    ///
    /// See [`DuplicateFinder::find_duplicates_in_paths`].
    pub fn find_duplicates(
        &self,
        path: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        self.find_duplicates_in_paths(&[path.to_path_buf()])
    }

    /// Find duplicates across all given roots.
    ///
    /// Every root is validated before any scanning starts. Per-file problems
    /// found afterwards never fail the call; they are collected in
    /// [`ScanSummary::scan_errors`].
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if:
    /// - `paths` is empty
    /// - a path does not exist, cannot be inspected, or is not a directory
    pub fn find_duplicates_in_paths(
        &self,
        paths: &[PathBuf],
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = Instant::now();

        validate_roots(paths)?;

        let mut walker = Walker::new(paths.to_vec(), self.config.walker_config.clone());
        if let Some(ref callback) = self.config.progress_callback {
            walker = walker.with_progress_callback(callback.clone());
        }

        log::info!(
            "Scanning {} root(s): {:?}",
            walker.roots().len(),
            walker.roots().iter().map(|p| p.display()).collect::<Vec<_>>()
        );

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start(Phase::Walking, 0);
        }

        let mut files = Vec::new();
        let mut scan_errors = Vec::new();
        let mut walk = walker.walk();
        for result in walk.by_ref() {
            match result {
                Ok(file) => files.push(file),
                Err(e) => scan_errors.push(e),
            }
        }
        let total_files = walk.files_visited();

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end(Phase::Walking);
        }
        log::info!(
            "Walk complete: {} files visited, {} above threshold, {} errors",
            total_files,
            files.len(),
            scan_errors.len()
        );

        let (groups, mut summary) = self.run_phases(files);
        summary.total_files = total_files;
        scan_errors.append(&mut summary.scan_errors);
        summary.scan_errors = scan_errors;
        summary.scan_duration = start_time.elapsed();

        Ok((groups, summary))
    }

    /// Find duplicates among an already collected list of files.
    ///
    /// Entries at or below the configured threshold are ignored. Useful when
    /// the file list comes from somewhere other than a directory walk.
    pub fn find_duplicates_from_files(
        &self,
        files: Vec<FileEntry>,
    ) -> (Vec<DuplicateGroup>, ScanSummary) {
        let start_time = Instant::now();
        let total_files = files.len();

        let candidates: Vec<FileEntry> = files
            .into_iter()
            .filter(|f| self.config.walker_config.accepts_size(f.size))
            .collect();

        let (groups, mut summary) = self.run_phases(candidates);
        summary.total_files = total_files;
        summary.scan_duration = start_time.elapsed();

        (groups, summary)
    }

    fn run_phases(&self, files: Vec<FileEntry>) -> (Vec<DuplicateGroup>, ScanSummary) {
        let (size_groups, size_stats) = group_by_size_structured(files);

        let (groups, hash_stats) = hash_size_groups(
            size_groups,
            &self.hasher,
            self.config.progress_callback.as_ref(),
        );

        let mut summary = ScanSummary {
            candidate_files: size_stats.total_files,
            total_size: size_stats.total_size,
            eliminated_by_size: size_stats.eliminated_unique,
            hashed_files: hash_stats.hashed_files,
            greater_than: self.config.walker_config.greater_than,
            scan_errors: hash_stats.errors.into_iter().map(ScanError::from).collect(),
            ..Default::default()
        };
        summary.record_groups(&groups);

        (groups, summary)
    }
}

/// Reject an empty root list and roots that are missing or not directories.
fn validate_roots(paths: &[PathBuf]) -> Result<(), FinderError> {
    if paths.is_empty() {
        return Err(FinderError::NoPaths);
    }

    for path in paths {
        match walker::root_is_dir(path) {
            Ok(true) => {}
            Ok(false) => return Err(FinderError::NotADirectory(path.clone())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FinderError::PathNotFound(path.clone()))
            }
            Err(e) => {
                return Err(FinderError::Inaccessible {
                    path: path.clone(),
                    source: e,
                })
            }
        }
    }

    Ok(())
}
