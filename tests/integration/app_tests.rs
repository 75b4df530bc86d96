//! End-to-end runs through `run_app_with_output`.

use clap::Parser;
use find_duplicates::cli::Cli;
use find_duplicates::error::ExitCode;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn fixture() -> TempDir {
    let dir = tempdir().unwrap();
    for sub in ["a", "b", "c"] {
        fs::create_dir(dir.path().join(sub)).unwrap();
    }
    fs::write(dir.path().join("a/x.txt"), "hello").unwrap();
    fs::write(dir.path().join("b/x.txt"), "hello").unwrap();
    fs::write(dir.path().join("c/y.txt"), "world!").unwrap();
    dir
}

/// Parse arguments with progress off and a config file that does not exist,
/// so that a user's own config cannot affect the result.
fn parse(config_dir: &Path, args: &[&str]) -> Cli {
    let config = config_dir.join("absent-config.json");
    let mut full = vec![
        "find_duplicates",
        "--no-progress",
        "--config",
        config.to_str().unwrap(),
    ];
    full.extend_from_slice(args);
    Cli::try_parse_from(full).unwrap()
}

fn run(cli: Cli) -> (anyhow::Result<ExitCode>, String) {
    let mut out = Vec::new();
    let result = find_duplicates::run_app_with_output(cli, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_text_report() {
    let dir = fixture();
    let root = dir.path().to_str().unwrap();

    let (result, out) = run(parse(dir.path(), &[root]));

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(out.contains("Duplicate files found for hash "));
    assert!(out.contains(&format!("    - {}", dir.path().join("a/x.txt").display())));
    assert!(out.contains(&format!("    - {}", dir.path().join("b/x.txt").display())));
    assert!(!out.contains("y.txt"));
    assert!(out.contains(&"-".repeat(60)));
    assert!(out.contains("1 duplicate sets found among 3 files (0 errors)"));
}

#[test]
fn test_text_report_with_threshold() {
    let dir = fixture();
    let root = dir.path().to_str().unwrap();

    let (result, out) = run(parse(dir.path(), &["--greater-than", "5", root]));

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(out.contains("No duplicate files above 5 MB found among 3 files (0 errors)"));
}

#[test]
fn test_json_report() {
    let dir = fixture();
    let root = dir.path().to_str().unwrap();

    let (result, out) = run(parse(dir.path(), &["--output", "json", root]));

    assert_eq!(result.unwrap(), ExitCode::Success);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let duplicates = value["duplicates"].as_array().unwrap();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0]["size"], 5);
    assert_eq!(duplicates[0]["hash"].as_str().unwrap().len(), 64);
    assert_eq!(duplicates[0]["files"].as_array().unwrap().len(), 2);
    assert_eq!(value["summary"]["total_files"], 3);
    assert_eq!(value["summary"]["hashed_files"], 2);
}

#[test]
fn test_config_file_supplies_threshold() {
    let dir = fixture();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{ "greater_than": 1.0, "progress": false }"#).unwrap();

    let cli = Cli::try_parse_from([
        "find_duplicates",
        "--config",
        config.to_str().unwrap(),
        dir.path().to_str().unwrap(),
    ])
    .unwrap();
    let (result, out) = run(cli);

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(out.contains("No duplicate files above 1 MB found"));
}

#[test]
fn test_missing_root_is_an_argument_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let (result, out) = run(parse(dir.path(), &[missing.to_str().unwrap()]));

    let err = result.unwrap_err();
    assert_eq!(ExitCode::for_error(&err), ExitCode::InvalidArguments);
    assert!(err.to_string().contains("Path not found"));
    assert!(out.is_empty());
}

#[test]
fn test_negative_config_threshold_is_an_argument_error() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{ "greater_than": -1.0 }"#).unwrap();

    let cli = Cli::try_parse_from([
        "find_duplicates",
        "--config",
        config.to_str().unwrap(),
        dir.path().to_str().unwrap(),
    ])
    .unwrap();
    let (result, _) = run(cli);

    let err = result.unwrap_err();
    assert_eq!(ExitCode::for_error(&err), ExitCode::InvalidArguments);
}
