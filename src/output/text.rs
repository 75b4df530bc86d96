//! Plain-text report.
//!
//! Each duplicate set is printed as its own block, followed by a rule and a
//! one-line summary:
//!
//! ```text
//!
//! Duplicate files found for hash 5f1d...:
//!     - /data/a/x.txt
//!     - /data/b/x.txt
//! ------------------------------------------------------------
//! 1 duplicate sets found among 3 files (0 errors)
//! Reclaimable space: 10 B
//! ```

use std::io::{self, Write};

use crate::duplicates::{DuplicateGroup, ScanSummary};

/// Width of the rule between the groups and the summary.
const RULE_WIDTH: usize = 60;

/// Text formatter for scan results.
pub struct TextOutput<'a> {
    groups: &'a [DuplicateGroup],
    summary: &'a ScanSummary,
    greater_than_mb: Option<f64>,
}

impl<'a> TextOutput<'a> {
    /// Create a formatter over scan results.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup], summary: &'a ScanSummary) -> Self {
        Self {
            groups,
            summary,
            greater_than_mb: None,
        }
    }

    /// Mention the size threshold (in MB, as given by the user) in the summary.
    #[must_use]
    pub fn with_threshold(mut self, greater_than_mb: Option<f64>) -> Self {
        self.greater_than_mb = greater_than_mb;
        self
    }

    /// Write the report.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for group in self.groups {
            writeln!(out)?;
            writeln!(out, "Duplicate files found for hash {}:", group.hash_hex())?;
            for path in &group.paths {
                writeln!(out, "    - {}", path.display())?;
            }
        }

        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(out, "{}", self.summary_line())?;
        if !self.groups.is_empty() {
            writeln!(
                out,
                "Reclaimable space: {}",
                self.summary.reclaimable_display()
            )?;
        }
        Ok(())
    }

    /// Render the report into a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn summary_line(&self) -> String {
        let above = self
            .greater_than_mb
            .map(|mb| format!(" above {} MB", mb))
            .unwrap_or_default();
        let tail = format!(
            "found among {} files ({} errors)",
            self.summary.total_files,
            self.summary.error_count()
        );

        if self.groups.is_empty() {
            format!("No duplicate files{} {}", above, tail)
        } else {
            format!("{} duplicate sets{} {}", self.groups.len(), above, tail)
        }
    }
}
