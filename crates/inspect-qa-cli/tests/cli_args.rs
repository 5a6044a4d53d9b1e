//! CLI argument validation tests.
//!
//! Tests command-line argument parsing, validation, and error handling.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::path::PathBuf;

use assert_cmd::Command;
use inspect_qa_test_support::PredictionBuilder;
use predicates::prelude::*;

/// Writes a passing prediction file and returns its directory and path.
fn good_fixture() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("good.json");
    std::fs::write(&path, PredictionBuilder::to_json(&PredictionBuilder::good_pill())).unwrap();
    (dir, path)
}

fn cmd() -> Command {
    Command::cargo_bin("inspect-qa").unwrap()
}

// === Missing/Invalid Path Tests ===

#[test]
fn test_missing_path_shows_error() {
    cmd().assert().code(2).stderr(
        predicate::str::contains("No paths specified")
            .or(predicate::str::contains("required"))
            .or(predicate::str::contains("PATHS")),
    );
}

#[test]
fn test_nonexistent_path_warns_but_continues() {
    cmd()
        .arg("/nonexistent/path/to/predictions.json")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_empty_directory() {
    let temp_dir = tempfile::tempdir().unwrap();

    cmd()
        .arg(temp_dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_unsupported_file_warns() {
    let temp_dir = tempfile::tempdir().unwrap();
    let notes = temp_dir.path().join("notes.txt");
    std::fs::write(&notes, "not predictions").unwrap();

    cmd()
        .arg(&notes)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Unsupported file type"));
}

#[test]
fn test_malformed_prediction_file_skipped() {
    let temp_dir = tempfile::tempdir().unwrap();
    let bad = temp_dir.path().join("bad.json");
    std::fs::write(&bad, "{ not json").unwrap();

    cmd()
        .arg(&bad)
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("bad.json"));
}

// === Format Validation Tests ===

#[test]
fn test_invalid_format_rejected() {
    let (_dir, path) = good_fixture();

    cmd()
        .arg("--format")
        .arg("xml")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("json").or(predicate::str::contains("jsonl")));
}

#[test]
fn test_valid_formats_accepted() {
    let (_dir, path) = good_fixture();

    for format in ["json", "jsonl"] {
        cmd().arg("--format").arg(format).arg(&path).assert().code(0);
    }
}

// === Threshold Validation Tests ===

#[test]
fn test_threshold_above_one_rejected() {
    let (_dir, path) = good_fixture();

    cmd()
        .arg("--threshold")
        .arg("1.5")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("0.0..=1.0").or(predicate::str::contains("invalid")));
}

#[test]
fn test_threshold_negative_rejected() {
    let (_dir, path) = good_fixture();

    cmd()
        .arg("--threshold")
        .arg("-0.1")
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn test_threshold_non_numeric_rejected() {
    let (_dir, path) = good_fixture();

    cmd()
        .arg("--threshold")
        .arg("abc")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn test_valid_threshold_boundaries() {
    let (_dir, path) = good_fixture();

    for threshold in ["0.0", "1.0"] {
        cmd()
            .arg("--threshold")
            .arg(threshold)
            .arg(&path)
            .assert()
            .code(predicate::in_iter([0, 1]));
    }
}

// === Enum Flag Tests ===

#[test]
fn test_invalid_ambiguous_rejected() {
    let (_dir, path) = good_fixture();

    cmd()
        .arg("--ambiguous")
        .arg("fail")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pass").and(predicate::str::contains("review")));
}

#[test]
fn test_invalid_review_status_rejected() {
    let (_dir, path) = good_fixture();

    cmd()
        .arg("--review-status")
        .arg("passed")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pending"));
}

// === Subcommand Tests ===

#[test]
fn test_analyze_subcommand_matches_default() {
    let (_dir, path) = good_fixture();

    let default = cmd().arg(&path).output().unwrap();
    let explicit = cmd().arg("analyze").arg(&path).output().unwrap();

    assert_eq!(default.status.code(), Some(0));
    assert_eq!(explicit.status.code(), Some(0));

    let strip = |out: &[u8]| -> serde_json::Value {
        let mut v: serde_json::Value =
            serde_json::from_str(String::from_utf8_lossy(out).trim()).unwrap();
        v["timestamp"] = serde_json::Value::Null;
        v
    };
    assert_eq!(strip(&default.stdout), strip(&explicit.stdout));
}

#[test]
fn test_metrics_requires_files() {
    cmd()
        .arg("metrics")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required").or(predicate::str::contains("FILES")));
}

#[test]
fn test_metrics_invalid_month_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("inspections.jsonl");
    std::fs::write(&path, "").unwrap();

    cmd()
        .arg("metrics")
        .arg("--month")
        .arg("Smarch")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("month label"));
}

#[test]
fn test_metrics_missing_file_is_error() {
    cmd()
        .arg("metrics")
        .arg("/nonexistent/inspections.jsonl")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error:"));
}

// === Verbosity Level Tests ===

#[test]
fn test_verbosity_levels() {
    let (_dir, path) = good_fixture();

    for flag in ["-v", "-vv", "-vvv"] {
        cmd().arg(flag).arg(&path).assert().code(0);
    }
}

#[test]
fn test_verbose_logs_to_stderr() {
    let (_dir, path) = good_fixture();

    cmd()
        .arg("-v")
        .arg(&path)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Running analyze command"));
}

// === Help and Version ===

#[test]
fn test_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze").and(predicate::str::contains("metrics")));
}

#[test]
fn test_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("inspect-qa"));
}
