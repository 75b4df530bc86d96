use find_duplicates::duplicates::DuplicateFinder;
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 0);
    assert_eq!(summary.duplicate_groups, 0);
    assert_eq!(summary.error_count(), 0);
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();

    // Same size, different content
    fs::write(dir.path().join("a.txt"), "content a").unwrap();
    fs::write(dir.path().join("b.txt"), "content b").unwrap();
    fs::write(dir.path().join("c.txt"), "content c").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.hashed_files, 3);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_scan_duplicate_files() {
    let dir = tempdir().unwrap();

    File::create(dir.path().join("a.txt"))
        .unwrap()
        .write_all(b"duplicate")
        .unwrap();
    File::create(dir.path().join("b.txt"))
        .unwrap()
        .write_all(b"duplicate")
        .unwrap();
    File::create(dir.path().join("c.txt"))
        .unwrap()
        .write_all(b"unique")
        .unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups[0].paths,
        vec![dir.path().join("a.txt"), dir.path().join("b.txt")]
    );
    assert_eq!(groups[0].size, 9);
    assert_eq!(summary.total_files, 3);
    // c.txt has a unique size and is never read
    assert_eq!(summary.hashed_files, 2);
    assert_eq!(summary.duplicate_groups, 1);
    assert_eq!(summary.duplicate_files, 1);
    assert_eq!(summary.reclaimable_space, 9);
}

#[test]
fn test_scan_across_subdirectories() {
    let dir = tempdir().unwrap();
    for sub in ["a", "b", "c"] {
        fs::create_dir(dir.path().join(sub)).unwrap();
    }
    fs::write(dir.path().join("a/x.txt"), "hello").unwrap();
    fs::write(dir.path().join("b/x.txt"), "hello").unwrap();
    fs::write(dir.path().join("c/y.txt"), "world!").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
    assert!(groups[0].contains(&dir.path().join("a/x.txt")));
    assert!(groups[0].contains(&dir.path().join("b/x.txt")));
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.hashed_files, 2);
}

#[test]
fn test_scan_deeply_nested() {
    let dir = tempdir().unwrap();
    let deep = dir.path().join("one/two/three/four");
    fs::create_dir_all(&deep).unwrap();

    fs::write(dir.path().join("top.bin"), [7u8; 300]).unwrap();
    fs::write(deep.join("bottom.bin"), [7u8; 300]).unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, _) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert!(groups[0].contains(&deep.join("bottom.bin")));
}

#[test]
fn test_scan_ignores_empty_files() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("empty1")).unwrap();
    File::create(dir.path().join("empty2")).unwrap();
    File::create(dir.path().join("empty3")).unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.candidate_files, 0);
    assert_eq!(summary.hashed_files, 0);
}

#[test]
fn test_scan_several_sets_of_one_size() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a1"), "aaaa").unwrap();
    fs::write(dir.path().join("a2"), "aaaa").unwrap();
    fs::write(dir.path().join("b1"), "bbbb").unwrap();
    fs::write(dir.path().join("b2"), "bbbb").unwrap();
    fs::write(dir.path().join("c1"), "cccc").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].paths[0], dir.path().join("a1"));
    assert_eq!(groups[1].paths[0], dir.path().join("b1"));
    assert_eq!(summary.hashed_files, 5);
    assert_eq!(summary.duplicate_files, 2);
}

#[test]
fn test_scan_reports_larger_sets_first() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("small1"), "xy").unwrap();
    fs::write(dir.path().join("small2"), "xy").unwrap();
    fs::write(dir.path().join("big1"), [1u8; 4096]).unwrap();
    fs::write(dir.path().join("big2"), [1u8; 4096]).unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].size, 4096);
    assert_eq!(groups[1].size, 2);
    assert_eq!(summary.reclaimable_space, 4098);
}

#[test]
fn test_scan_groups_every_copy() {
    let dir = tempdir().unwrap();
    for i in 0..5 {
        fs::write(dir.path().join(format!("copy{}.dat", i)), "same bytes").unwrap();
    }

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 5);
    assert_eq!(summary.duplicate_files, 4);
    assert_eq!(summary.reclaimable_space, 40);
}
