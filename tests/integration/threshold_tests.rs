use find_duplicates::cli::megabytes_to_bytes;
use find_duplicates::duplicates::{DuplicateFinder, FinderConfig};
use std::fs;
use tempfile::tempdir;

fn write_pair(dir: &std::path::Path, prefix: &str, size: usize) {
    let content = vec![b'x'; size];
    fs::write(dir.join(format!("{}_1", prefix)), &content).unwrap();
    fs::write(dir.join(format!("{}_2", prefix)), &content).unwrap();
}

#[test]
fn test_threshold_is_exclusive() {
    let dir = tempdir().unwrap();
    write_pair(dir.path(), "below", 99);
    write_pair(dir.path(), "equal", 100);
    write_pair(dir.path(), "above", 101);

    let finder = DuplicateFinder::new(FinderConfig::default().with_greater_than(100));
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size, 101);
    assert_eq!(summary.total_files, 6);
    assert_eq!(summary.candidate_files, 2);
    assert_eq!(summary.hashed_files, 2);
    assert_eq!(summary.greater_than, 100);
}

#[test]
fn test_zero_threshold_keeps_everything_but_empty_files() {
    let dir = tempdir().unwrap();
    write_pair(dir.path(), "empty", 0);
    write_pair(dir.path(), "one", 1);

    let finder = DuplicateFinder::new(FinderConfig::default().with_greater_than(0));
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size, 1);
    assert_eq!(summary.candidate_files, 2);
}

#[test]
fn test_fractional_megabytes() {
    // 0.0001 MB rounds down to 104 bytes
    let threshold = megabytes_to_bytes(0.0001);
    assert_eq!(threshold, 104);

    let dir = tempdir().unwrap();
    write_pair(dir.path(), "at", 104);
    write_pair(dir.path(), "over", 105);

    let finder = DuplicateFinder::new(FinderConfig::default().with_greater_than(threshold));
    let (groups, _) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size, 105);
}

#[test]
fn test_threshold_above_everything() {
    let dir = tempdir().unwrap();
    write_pair(dir.path(), "pair", 2048);

    let finder = DuplicateFinder::new(
        FinderConfig::default().with_greater_than(megabytes_to_bytes(1.0)),
    );
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 2);
    assert_eq!(summary.candidate_files, 0);
}
