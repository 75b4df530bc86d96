//! Progress reporting for the scan pipeline.
//!
//! The pipeline reports each event as a single-character [`Marker`]:
//!
//! | Marker | Meaning                                   |
//! |--------|-------------------------------------------|
//! | `.`    | a file was visited and its size recorded  |
//! | `C`    | a checksum was computed                   |
//! | `E`    | a file or directory could not be read     |
//!
//! [`MarkerProgress`] prints the markers to a terminal-style writer as they
//! happen, while [`CountingProgress`] only tallies them.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A single progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// A file was visited and its size recorded.
    Scanned,
    /// A checksum was computed for a file.
    Hashed,
    /// A file or directory could not be read.
    Error,
}

impl Marker {
    /// The character printed for this marker.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Scanned => '.',
            Self::Hashed => 'C',
            Self::Error => 'E',
        }
    }
}

/// Pipeline phases announced to progress callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Walking the roots and recording sizes.
    Walking,
    /// Computing checksums for files that share a size.
    Hashing,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Walking => write!(f, "walking"),
            Phase::Hashing => write!(f, "hashing"),
        }
    }
}

/// Progress callback for the duplicate finding pipeline.
///
/// Implement this trait to receive progress updates during a scan.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - The phase that is starting
    /// * `total` - Number of items the phase will process, 0 if unknown
    fn on_phase_start(&self, _phase: Phase, _total: usize) {}

    /// Called once per pipeline event.
    fn on_marker(&self, marker: Marker);

    /// Called when a phase completes.
    fn on_phase_end(&self, _phase: Phase) {}
}

/// Writes one character per marker to the wrapped writer.
///
/// Each marker is flushed immediately so that the output works as a live
/// progress bar on a terminal. Write failures are ignored: losing a progress
/// character must never fail a scan.
pub struct MarkerProgress<W: Write + Send> {
    out: Mutex<W>,
}

impl MarkerProgress<std::io::Stdout> {
    /// Progress reporter printing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> MarkerProgress<W> {
    /// Create a reporter over any writer.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Recover the wrapped writer.
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_char(&self, c: char) {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut buf = [0u8; 4];
        let _ = out.write_all(c.encode_utf8(&mut buf).as_bytes());
        let _ = out.flush();
    }
}

impl<W: Write + Send> ProgressCallback for MarkerProgress<W> {
    fn on_phase_start(&self, phase: Phase, total: usize) {
        log::debug!("Phase {} started ({} items)", phase, total);
    }

    fn on_marker(&self, marker: Marker) {
        self.write_char(marker.as_char());
    }

    fn on_phase_end(&self, phase: Phase) {
        log::debug!("Phase {} complete", phase);
    }
}

/// Counts markers without printing anything.
#[derive(Debug, Default)]
pub struct CountingProgress {
    scanned: AtomicUsize,
    hashed: AtomicUsize,
    errors: AtomicUsize,
}

impl CountingProgress {
    /// Create a counter with all tallies at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `.` markers seen.
    #[must_use]
    pub fn scanned(&self) -> usize {
        self.scanned.load(Ordering::Relaxed)
    }

    /// Number of `C` markers seen.
    #[must_use]
    pub fn hashed(&self) -> usize {
        self.hashed.load(Ordering::Relaxed)
    }

    /// Number of `E` markers seen.
    #[must_use]
    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }
}

impl ProgressCallback for CountingProgress {
    fn on_marker(&self, marker: Marker) {
        let counter = match marker {
            Marker::Scanned => &self.scanned,
            Marker::Hashed => &self.hashed,
            Marker::Error => &self.errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}
