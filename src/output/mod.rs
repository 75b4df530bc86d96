//! Output formatters for duplicate scan results.
//!
//! This module provides the report formats:
//! - Text: one block per duplicate set plus a summary line
//! - JSON for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use find_duplicates::duplicates::DuplicateFinder;
//! use find_duplicates::output::{JsonOutput, TextOutput};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! print!("{}", TextOutput::new(&groups, &summary).render());
//! println!("{}", JsonOutput::new(&groups, &summary).to_json_pretty().unwrap());
//! ```

pub mod json;
pub mod text;

pub use json::JsonOutput;
pub use text::TextOutput;
