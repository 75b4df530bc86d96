use find_duplicates::duplicates::{DuplicateFinder, FinderError};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_duplicates_across_roots() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();

    fs::write(dir1.path().join("report.pdf"), "quarterly numbers").unwrap();
    fs::write(dir2.path().join("report-copy.pdf"), "quarterly numbers").unwrap();
    fs::write(dir2.path().join("other.pdf"), "something else entirely").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let roots = vec![dir1.path().to_path_buf(), dir2.path().to_path_buf()];
    let (groups, summary) = finder.find_duplicates_in_paths(&roots).unwrap();

    assert_eq!(groups.len(), 1);
    // First root's file comes first
    assert_eq!(
        groups[0].paths,
        vec![
            dir1.path().join("report.pdf"),
            dir2.path().join("report-copy.pdf")
        ]
    );
    assert_eq!(summary.total_files, 3);
}

#[test]
fn test_root_order_decides_path_order() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    fs::write(dir1.path().join("a"), "same").unwrap();
    fs::write(dir2.path().join("b"), "same").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let roots = vec![dir2.path().to_path_buf(), dir1.path().to_path_buf()];
    let (groups, _) = finder.find_duplicates_in_paths(&roots).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].paths[0], dir2.path().join("b"));
    assert_eq!(groups[0].paths[1], dir1.path().join("a"));
}

#[test]
fn test_repeated_root_is_scanned_once() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("only.txt"), "lonely").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let roots = vec![dir.path().to_path_buf(), dir.path().to_path_buf()];
    let (groups, summary) = finder.find_duplicates_in_paths(&roots).unwrap();

    // A file is never its own duplicate
    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 1);
}

#[test]
fn test_nested_root_is_scanned_once() {
    let dir = tempdir().unwrap();
    let inner = dir.path().join("inner");
    fs::create_dir(&inner).unwrap();
    fs::write(inner.join("file.txt"), "content").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let roots = vec![dir.path().to_path_buf(), inner.clone()];
    let (groups, summary) = finder.find_duplicates_in_paths(&roots).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 1);
}

#[test]
fn test_missing_root_fails_before_scanning() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "same").unwrap();
    fs::write(dir.path().join("b"), "same").unwrap();
    let missing = dir.path().join("does-not-exist");

    let finder = DuplicateFinder::with_defaults();
    let roots = vec![dir.path().to_path_buf(), missing.clone()];
    let err = finder.find_duplicates_in_paths(&roots).unwrap_err();

    assert!(matches!(err, FinderError::PathNotFound(ref p) if *p == missing));
}

#[test]
fn test_file_root_is_rejected() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    fs::write(&file, "not a directory").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let err = finder.find_duplicates(&file).unwrap_err();

    assert!(matches!(err, FinderError::NotADirectory(_)));
    assert!(err.to_string().contains("plain.txt"));
}

#[test]
fn test_empty_root_list_is_rejected() {
    let finder = DuplicateFinder::with_defaults();
    let roots: Vec<PathBuf> = Vec::new();

    let err = finder.find_duplicates_in_paths(&roots).unwrap_err();
    assert!(matches!(err, FinderError::NoPaths));
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_followed() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    let outside = tempdir().unwrap();
    fs::write(dir.path().join("real.txt"), "linked content").unwrap();
    fs::write(outside.path().join("target.txt"), "linked content").unwrap();

    // A link to a sibling file and a link to a directory holding a copy
    symlink(dir.path().join("real.txt"), dir.path().join("alias.txt")).unwrap();
    symlink(outside.path(), dir.path().join("elsewhere")).unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 1);
}
