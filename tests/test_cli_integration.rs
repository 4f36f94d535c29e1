//! CLI Integration Tests for atlas
//!
//! These tests execute the binary and verify correct behavior for:
//! - Text and JSON reports
//! - Date range, hide and cell-size flags
//! - Focus and link inspection
//! - Error handling

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a directory holding a small artifact list
fn create_test_list() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("artifacts.json"),
        r#"{
  "artifacts": [
    {"artifact_id": "HU-1", "vr_position": [0.2, 0, 0.3], "type": "Ushabti",
     "mention": "Blue faience ushabti", "date": "1925-01-04",
     "source_url": "https://diaries.example.org/p/12#scan"},
    {"artifact_id": "HU-2", "vr_position": [1.1, 0, 0.9], "type": "ushabti",
     "mention": "Ushabti with hieroglyphs", "date": "1925-01-20"},
    {"artifact_id": "HU-3", "vr_position": [6.5, 0, 6.1],
     "mention": "Falcon amulet from the burial shaft", "date": "1925-01-08",
     "source_url": "https://diaries.example.org/p/14"},
    {"artifact_id": "HU-4", "vr_position": [7.9, 0, 7.0],
     "mention": "Falcon pendant", "date": "1925-01-10"},
    {"artifact_id": "HU-5", "vr_position": [20, 0, 20], "mention": "Copper chisel"},
    {"artifact_id": "HU-6", "vr_position": [-20, 0, -20], "mention": "Mirror handle"},
    {"artifact_id": "HU-7", "vr_position": [40, 0, -40], "mention": "Reserve head"}
  ]
}"#,
    )
    .unwrap();
    temp_dir
}

fn atlas() -> Command {
    Command::cargo_bin("atlas").unwrap()
}

// =============================================================================
// Reports
// =============================================================================

#[test]
fn test_text_report() {
    let temp_dir = create_test_list();
    atlas()
        .arg(temp_dir.path().join("artifacts.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Artifacts: 7 loaded, 7 visible"))
        .stdout(predicate::str::contains("Date extent: 1925-01-04 .. 1925-01-20"))
        .stdout(predicate::str::contains("#1 “ushabti” — 2 items"))
        .stdout(predicate::str::contains("#2 “falcon” — 2 items"));
}

#[test]
fn test_json_report() {
    let temp_dir = create_test_list();
    let output = atlas()
        .arg(temp_dir.path().join("artifacts.json"))
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["view"]["visible_count"], 7);
    assert_eq!(report["view"]["clusters"][0]["label"]["text"], "ushabti");
    assert_eq!(report["view"]["clusters"][0]["label"]["strategy"], "explicit_field");
    assert!(report.get("focus").is_none());
}

#[test]
fn test_output_is_deterministic() {
    let temp_dir = create_test_list();
    let path = temp_dir.path().join("artifacts.json");
    let first = atlas().arg(&path).args(["--format", "json"]).output().unwrap();
    let second = atlas().arg(&path).args(["--format", "json"]).output().unwrap();
    assert_eq!(first.stdout, second.stdout);
}

// =============================================================================
// Visibility Flags
// =============================================================================

#[test]
fn test_date_range_flags() {
    let temp_dir = create_test_list();
    atlas()
        .arg(temp_dir.path().join("artifacts.json"))
        .args(["--from", "1925-01-01", "--to", "1925-01-09"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Artifacts: 7 loaded, 5 visible"))
        .stdout(predicate::str::contains("Active range: 1925-01-01 .. 1925-01-09 (9 days)"))
        .stdout(predicate::str::contains("No clusters detected…"));
}

#[test]
fn test_hide_flag() {
    let temp_dir = create_test_list();
    atlas()
        .arg(temp_dir.path().join("artifacts.json"))
        .args(["--hide", "HU-1", "--hide", "HU-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 visible"))
        .stdout(predicate::str::contains("No clusters detected…"));
}

#[test]
fn test_cell_size_flag() {
    let temp_dir = create_test_list();
    atlas()
        .arg(temp_dir.path().join("artifacts.json"))
        .args(["--cell-size", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("— 5 items"));
}

// =============================================================================
// Inspection
// =============================================================================

#[test]
fn test_focus_flag() {
    let temp_dir = create_test_list();
    atlas()
        .arg(temp_dir.path().join("artifacts.json"))
        .args(["--focus", "HU-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Focus [0|0]: Ushabti with hieroglyphs"))
        .stdout(predicate::str::contains("“ushabti” — 2 items"));
}

#[test]
fn test_focus_lone_artifact() {
    let temp_dir = create_test_list();
    atlas()
        .arg(temp_dir.path().join("artifacts.json"))
        .args(["--focus", "HU-5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("“(no cluster here)” — 1 item\n"));
}

#[test]
fn test_link_best_phrase() {
    let temp_dir = create_test_list();
    atlas()
        .arg(temp_dir.path().join("artifacts.json"))
        .args(["--link", "HU-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Link: https://diaries.example.org/p/14#:~:text=falcon%20amulet%20from%20the%20burial%20shaft",
        ));
}

#[test]
fn test_link_multi_candidate() {
    let temp_dir = create_test_list();
    atlas()
        .arg(temp_dir.path().join("artifacts.json"))
        .args(["--link", "HU-1", "--strategy", "multi-candidate"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Link: https://diaries.example.org/p/12#:~:text=Blue%20faience%20ushabti&text=blue%20faience%20ushabti",
        ))
        .stdout(predicate::str::contains("#scan").not());
}

// =============================================================================
// Error Handling
// =============================================================================

#[test]
fn test_missing_file() {
    atlas()
        .arg("/nonexistent/artifacts.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_malformed_list() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.json");
    fs::write(&path, r#"{"items": []}"#).unwrap();
    atlas()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid artifact list"));
}

#[test]
fn test_invalid_cell_size() {
    let temp_dir = create_test_list();
    atlas()
        .arg(temp_dir.path().join("artifacts.json"))
        .args(["--cell-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cell_size"));
}

#[test]
fn test_config_file() {
    let temp_dir = create_test_list();
    let config = temp_dir.path().join("atlas.json");
    fs::write(&config, r#"{"min_cluster_size": 3, "cell_size": 100}"#).unwrap();
    atlas()
        .arg(temp_dir.path().join("artifacts.json"))
        .args(["--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("cell size 100, min 3"));
}

#[test]
fn test_link_without_source() {
    let temp_dir = create_test_list();
    atlas()
        .arg(temp_dir.path().join("artifacts.json"))
        .args(["--link", "HU-4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no source_url"));
}
