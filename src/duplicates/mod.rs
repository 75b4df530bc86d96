//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Size-based file grouping (Phase 1)
//! - Checksum comparison within size groups (Phase 2)
//! - Duplicate group management

pub mod finder;
pub mod groups;

pub use finder::{
    hash_size_groups, DuplicateFinder, FinderConfig, FinderError, HashStats, ScanSummary,
};
pub use groups::{
    group_by_size, group_by_size_structured, DuplicateGroup, GroupingStats, SizeGroup,
};
