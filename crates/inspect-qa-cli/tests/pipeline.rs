//! Pipeline integration tests.
//!
//! Runs the full classify, score and aggregate pipeline through the binary.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::missing_panics_doc,
    deprecated
)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use inspect_qa_core::RawPrediction;
use inspect_qa_test_support::{InspectionBuilder, PredictionBuilder};
use predicates::prelude::*;
use serde_json::Value;

/// Create a temporary directory with prediction files.
fn create_predictions(files: Vec<(&str, Vec<RawPrediction>)>) -> tempfile::TempDir {
    let temp_dir = tempfile::tempdir().unwrap();

    for (name, predictions) in files {
        let path = temp_dir.path().join(name);
        std::fs::write(path, PredictionBuilder::to_json(&predictions)).unwrap();
    }

    temp_dir
}

fn analyze(args: &[&str], paths: &[PathBuf]) -> (Option<i32>, Vec<Value>) {
    let output = Command::cargo_bin("inspect-qa")
        .unwrap()
        .args(args)
        .args(paths)
        .output()
        .unwrap();
    let values = String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    (output.status.code(), values)
}

fn metrics(args: &[&str], files: &[&Path]) -> Value {
    let output = Command::cargo_bin("inspect-qa")
        .unwrap()
        .arg("metrics")
        .args(args)
        .args(files)
        .output()
        .unwrap();
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

// === Analysis Scenarios ===

#[test]
fn test_strong_crack_fails() {
    let dir = create_predictions(vec![("crack.json", vec![RawPrediction::new("Crack", 0.85)])]);
    let (code, values) = analyze(&[], &[dir.path().join("crack.json")]);

    assert_eq!(code, Some(1));
    let record = &values[0];
    assert_eq!(record["status"], "fail");
    assert_eq!(record["overallScore"], 60);
    assert_eq!(record["defects"].as_array().unwrap().len(), 1);
    assert_eq!(record["defects"][0]["category"], "crack");
    assert_eq!(record["defects"][0]["severity"], "high");
    assert_eq!(record["defects"][0]["confidence"], 85);
}

#[test]
fn test_good_pill_passes() {
    let dir = create_predictions(vec![("good.json", vec![RawPrediction::new("Good Pill", 0.90)])]);
    let (code, values) = analyze(&[], &[dir.path().join("good.json")]);

    assert_eq!(code, Some(0));
    assert_eq!(values[0]["status"], "pass");
    assert_eq!(values[0]["overallScore"], 95);
    assert!(values[0]["defects"].as_array().unwrap().is_empty());
}

#[test]
fn test_empty_predictions_skipped() {
    let dir = create_predictions(vec![("empty.json", vec![])]);

    Command::cargo_bin("inspect-qa")
        .unwrap()
        .arg(dir.path().join("empty.json"))
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Insufficient evidence"));
}

#[test]
fn test_mixed_batch() {
    let dir = create_predictions(vec![
        ("1.json", PredictionBuilder::strong_crack()),
        ("2.json", PredictionBuilder::scratch_and_stain()),
        ("3.json", PredictionBuilder::faint_discoloration()),
        ("4.json", PredictionBuilder::good_pill()),
        ("5.json", PredictionBuilder::ambiguous()),
    ]);
    let (code, values) = analyze(&[], &[dir.path().to_path_buf()]);

    assert_eq!(code, Some(1));
    let summary: Vec<(String, u64)> = values
        .iter()
        .map(|v| {
            (
                v["status"].as_str().unwrap().to_string(),
                v["overallScore"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("fail".to_string(), 60),
            ("review".to_string(), 75),
            ("review".to_string(), 85),
            ("pass".to_string(), 95),
            ("pass".to_string(), 85),
        ]
    );

    // Unknown labels land in "other"
    assert_eq!(values[1]["defects"][1]["category"], "other");
    // "discoloration" is a colour defect
    assert_eq!(values[2]["defects"][0]["category"], "color");
}

#[test]
fn test_wrapped_prediction_file_uses_image_path() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("wrapped.json");
    std::fs::write(
        &path,
        r#"{"image": "line2/pill-17.jpg", "predictions": [{"label": "Contamination", "confidence": 0.5}]}"#,
    )
    .unwrap();

    let (code, values) = analyze(&[], &[path]);
    assert_eq!(code, Some(1));
    assert_eq!(values[0]["path"], "line2/pill-17.jpg");
    assert_eq!(values[0]["defects"][0]["category"], "contamination");
    assert_eq!(values[0]["defects"][0]["severity"], "medium");
}

#[test]
fn test_images_use_sidecar_predictions() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("pill.jpg"), b"").unwrap();
    std::fs::write(
        temp_dir.path().join("pill.jpg.json"),
        PredictionBuilder::to_json(&PredictionBuilder::strong_crack()),
    )
    .unwrap();
    std::fs::write(temp_dir.path().join("orphan.png"), b"").unwrap();

    let output = Command::cargo_bin("inspect-qa")
        .unwrap()
        .arg(temp_dir.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    // The sidecar is read once, through its image
    let values: Vec<Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(values.len(), 1);
    assert!(values[0]["path"].as_str().unwrap().ends_with("pill.jpg"));
    assert_eq!(values[0]["status"], "fail");

    // The image without a sidecar is skipped
    assert!(stderr.contains("orphan.png"));
    assert_eq!(output.status.code(), Some(1));
}

// === Aggregation ===

#[test]
fn test_metrics_two_inspections() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("inspections.json");
    let inspections = vec![
        InspectionBuilder::passed("INS-001", 96).build(),
        InspectionBuilder::failed("INS-002", 72).build(),
    ];
    std::fs::write(&path, serde_json::to_string(&inspections).unwrap()).unwrap();

    let m = metrics(&["--month", "Oct"], &[&path]);
    assert_eq!(m["totalInspections"], 2);
    assert_eq!(m["passRate"].as_f64().unwrap(), 50.0);
    assert_eq!(m["defectRate"].as_f64().unwrap(), 50.0);
    assert_eq!(m["overallScore"], 84);
    assert_eq!(m["criticalIssues"], 1);

    let trends = m["monthlyTrends"].as_array().unwrap();
    assert_eq!(trends.len(), 6);
    assert_eq!(trends[0]["month"], "Feb");
    assert_eq!(trends[5]["month"], "Oct");
    assert_eq!(trends[5]["score"], 84);
    assert_eq!(trends[5]["defects"], 1);
    assert_eq!(trends[5]["passRate"], 50);

    let types = m["defectTypes"].as_array().unwrap();
    assert_eq!(types.len(), 1);
    assert_eq!(types[0]["name"], "Crack");
    assert_eq!(types[0]["value"], 100);
    assert_eq!(types[0]["colorRef"], "chart-1");
}

#[test]
fn test_metrics_empty_returns_seed() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("none.jsonl");
    std::fs::write(&path, "\n").unwrap();

    let m = metrics(&[], &[&path]);
    assert_eq!(m["totalInspections"], 0);
    assert_eq!(m["overallScore"], 92);
    assert_eq!(m["passRate"].as_f64().unwrap(), 95.2);
    assert_eq!(m["monthlyTrends"].as_array().unwrap().len(), 6);
    assert_eq!(m["defectTypes"].as_array().unwrap().len(), 5);
}

#[test]
fn test_metrics_custom_seed() {
    let temp_dir = tempfile::tempdir().unwrap();
    let seed = temp_dir.path().join("seed.json");
    std::fs::write(
        &seed,
        r#"{
            "overallScore": 70, "passRate": 80.0, "defectRate": 20.0,
            "criticalIssues": 0, "totalInspections": 9,
            "monthlyTrends": [{"month": "Jan", "score": 70, "defects": 2, "passRate": 80}],
            "defectTypes": [{"name": "Scratch", "value": 100, "colorRef": "chart-1"}]
        }"#,
    )
    .unwrap();
    let path = temp_dir.path().join("none.jsonl");
    std::fs::write(&path, "").unwrap();

    let m = metrics(&["--seed", seed.to_str().unwrap()], &[&path]);
    assert_eq!(m["overallScore"], 70);
    assert_eq!(m["totalInspections"], 0);
    assert_eq!(m["monthlyTrends"].as_array().unwrap().len(), 1);
}

#[test]
fn test_metrics_duplicate_ids_warned() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("dupes.jsonl");
    let a = serde_json::to_string(&InspectionBuilder::passed("INS-001", 90).build()).unwrap();
    std::fs::write(&path, format!("{a}\n{a}\n")).unwrap();

    Command::cargo_bin("inspect-qa")
        .unwrap()
        .arg("metrics")
        .arg(&path)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"totalInspections\":1"))
        .stderr(predicate::str::contains("Inspection already exists: INS-001"));
}

#[test]
fn test_metrics_invalid_record_is_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("bad.jsonl");
    std::fs::write(&path, "{\"id\": \"INS-001\"}\n").unwrap();

    Command::cargo_bin("inspect-qa")
        .unwrap()
        .arg("metrics")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("line 1"));
}

#[test]
fn test_metrics_pretty() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("none.jsonl");
    std::fs::write(&path, "").unwrap();

    let output = Command::cargo_bin("inspect-qa")
        .unwrap()
        .args(["metrics", "--pretty"])
        .arg(&path)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\n  \"overallScore\": 92"));
}

// === Analyze Then Aggregate ===

#[test]
fn test_analyze_inspections_feed_metrics() {
    let dir = create_predictions(vec![
        ("a.json", PredictionBuilder::strong_crack()),
        ("b.json", PredictionBuilder::good_pill()),
        ("c.json", PredictionBuilder::scratch_and_stain()),
        ("d.json", PredictionBuilder::good_pill()),
    ]);

    let output = Command::cargo_bin("inspect-qa")
        .unwrap()
        .args(["--as-inspections", "--review-status", "failed"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let inspections = dir.path().join("inspections.jsonl");
    std::fs::write(&inspections, &output.stdout).unwrap();

    let m = metrics(&["--month", "Jul"], &[&inspections]);
    assert_eq!(m["totalInspections"], 4);
    // Two passed, crack failed, scratch review counted as failed
    assert_eq!(m["passRate"].as_f64().unwrap(), 50.0);
    assert_eq!(m["defectRate"].as_f64().unwrap(), 50.0);
    // (60 + 95 + 75 + 95) / 4 = 81.25
    assert_eq!(m["overallScore"], 81);
    assert_eq!(m["criticalIssues"], 1);

    let types = m["defectTypes"].as_array().unwrap();
    let names: Vec<_> = types.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Crack", "Scratch", "Other"]);
    let total: u64 = types.iter().map(|t| t["value"].as_u64().unwrap()).sum();
    assert!((97..=103).contains(&total));
}
