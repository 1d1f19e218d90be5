//! CLI diff integration tests
//!
//! These tests drive the built `jardiff` binary over snapshot files written
//! to a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const OLD_SNAPSHOT: &str = r#"{
  "com.acme": {
    "com.acme.Widget": {
      "name": "com.acme.Widget",
      "fields": [
        {
          "name": "SIZE",
          "full_signature": "com.acme.Widget.SIZE",
          "constant_value": {"type": "int", "value": 4}
        }
      ],
      "methods": [
        {"signature": "draw()", "full_signature": "com.acme.Widget.draw()", "code": "01"}
      ]
    }
  }
}"#;

const NEW_SNAPSHOT: &str = r#"{
  "com.acme": {
    "com.acme.Widget": {
      "name": "com.acme.Widget",
      "fields": [
        {
          "name": "SIZE",
          "full_signature": "com.acme.Widget.SIZE",
          "constant_value": {"type": "int", "value": 8}
        }
      ],
      "methods": [
        {"signature": "draw()", "full_signature": "com.acme.Widget.draw()", "code": "02"}
      ]
    }
  }
}"#;

fn write_snapshots(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
    let old_path = temp_dir.path().join("old.json");
    let new_path = temp_dir.path().join("new.json");
    fs::write(&old_path, OLD_SNAPSHOT).unwrap();
    fs::write(&new_path, NEW_SNAPSHOT).unwrap();
    (old_path, new_path)
}

fn run_jardiff(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jardiff"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_cli_diff_markdown_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let (old_path, new_path) = write_snapshots(&temp_dir);

    let output = run_jardiff(
        temp_dir.path(),
        &[
            "diff",
            "--old",
            path_str(&old_path),
            "--new",
            path_str(&new_path),
            "--name",
            "acme",
            "--old-label",
            "1.0",
            "--new-label",
            "2.0",
        ],
    );

    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("## API Differences: acme"));
    assert!(stdout.contains("**Old**: `1.0`"));
    assert!(stdout.contains("- Modified field `com.acme.Widget.SIZE`: constant value 4 to 8"));
    assert!(stdout.contains("- Modified method `com.acme.Widget.draw()`: code changed"));
}

#[test]
fn test_cli_diff_json_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let (old_path, new_path) = write_snapshots(&temp_dir);
    let report_path = temp_dir.path().join("report.json");

    let output = run_jardiff(
        temp_dir.path(),
        &[
            "diff",
            "--old",
            path_str(&old_path),
            "--new",
            path_str(&new_path),
            "--format",
            "json",
            "--output",
            path_str(&report_path),
        ],
    );

    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Report written to"));

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["project"], "project");
    assert_eq!(report["old_label"], "old");
    assert_eq!(report["modified"], true);
    assert_eq!(report["summary"]["features"]["modified"], 2);
}

#[test]
fn test_cli_config_file_with_flag_override() {
    let temp_dir = TempDir::new().unwrap();
    let (old_path, new_path) = write_snapshots(&temp_dir);
    let config_path = temp_dir.path().join("jardiff.toml");
    fs::write(
        &config_path,
        "project_name = \"from-config\"\nstrategy = \"code\"\nlog_profile = \"production\"\n",
    )
    .unwrap();

    // Incompatible ignores constant and body changes, so nothing is left
    let output = run_jardiff(
        temp_dir.path(),
        &[
            "diff",
            "--old",
            path_str(&old_path),
            "--new",
            path_str(&new_path),
            "--config",
            path_str(&config_path),
            "--strategy",
            "incompatible",
        ],
    );

    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("## API Differences: from-config"));
    assert!(stdout.contains("_No differences detected._"));
}

#[test]
fn test_cli_unknown_strategy_fails() {
    let temp_dir = TempDir::new().unwrap();
    let (old_path, new_path) = write_snapshots(&temp_dir);

    let output = run_jardiff(
        temp_dir.path(),
        &[
            "diff",
            "--old",
            path_str(&old_path),
            "--new",
            path_str(&new_path),
            "--strategy",
            "strict",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Unknown difference strategy: strict"));
}

#[test]
fn test_cli_missing_snapshot_fails() {
    let temp_dir = TempDir::new().unwrap();
    let (old_path, _) = write_snapshots(&temp_dir);

    let output = run_jardiff(
        temp_dir.path(),
        &[
            "diff",
            "--old",
            path_str(&old_path),
            "--new",
            "does-not-exist.json",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: I/O error on does-not-exist.json"));
}

#[test]
fn test_cli_validate_reports_contract_violation() {
    let temp_dir = TempDir::new().unwrap();
    let (old_path, _) = write_snapshots(&temp_dir);
    let misplaced = temp_dir.path().join("misplaced.json");
    fs::write(&misplaced, r#"{"org.other": {"com.acme.Widget": {"name": "com.acme.Widget"}}}"#)
        .unwrap();

    let ok = run_jardiff(temp_dir.path(), &["validate", path_str(&old_path)]);
    assert!(ok.status.success());
    assert!(String::from_utf8_lossy(&ok.stdout).contains("1 classes in 1 packages"));

    let bad = run_jardiff(temp_dir.path(), &["validate", path_str(&misplaced)]);
    assert_eq!(bad.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&bad.stderr)
        .contains("Class com.acme.Widget does not belong to package org.other"));
}
