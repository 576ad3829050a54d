//! Integration tests for the candump2csv binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run(candump: &Path, dbc: &Path, output: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_candump2csv"))
        .arg("-c")
        .arg(candump)
        .arg("--dbc")
        .arg(dbc)
        .arg("-o")
        .arg(output)
        .output()
        .expect("Failed to run candump2csv")
}

#[test]
fn test_cli_converts_fixture() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("capture.csv");

    let result = run(&fixture("capture.log"), &fixture("vehicle.dbc"), &output);
    assert!(
        result.status.success(),
        "Converter failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Conversion completed successfully!"));

    let content = fs::read_to_string(&output).expect("Failed to read generated CSV file");
    assert!(content.starts_with("Timestamp,Interface,Message Name,"));
    assert_eq!(content.lines().count(), 5);
}

#[test]
fn test_cli_skips_do_not_change_exit_code() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log = temp_dir.path().join("bad.log");
    let output = temp_dir.path().join("bad.csv");
    fs::write(&log, "not a frame\n").unwrap();

    let result = run(&log, &fixture("vehicle.dbc"), &output);
    assert!(result.status.success());
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "Timestamp,Interface,Message Name\n"
    );
}

#[test]
fn test_cli_refuses_existing_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("exists.csv");
    fs::write(&output, "keep").unwrap();

    let result = run(&fixture("capture.log"), &fixture("vehicle.dbc"), &output);
    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("already exists"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "keep");
}

#[test]
fn test_cli_missing_candump() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("out.csv");

    let result = run(
        &temp_dir.path().join("missing.log"),
        &fixture("vehicle.dbc"),
        &output,
    );
    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("is missing"));
    assert!(!output.exists());
}

#[test]
fn test_cli_missing_dbc() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("out.csv");

    let result = run(
        &fixture("capture.log"),
        &temp_dir.path().join("missing.dbc"),
        &output,
    );
    assert_eq!(result.status.code(), Some(1));
    assert!(!output.exists());
}

#[test]
fn test_cli_requires_arguments() {
    let result = Command::new(env!("CARGO_BIN_EXE_candump2csv"))
        .output()
        .expect("Failed to run candump2csv");
    assert!(!result.status.success());
}
