//! End-to-end tests of the annot binary

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixtures_dir, isolated_config, metadata_path, temp_session};

fn annot(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("annot").expect("Binary should build");
    cmd.env("ANNOT_CONFIG", isolated_config(temp_dir));
    cmd
}

// ============================================================================
// Transcript Commands
// ============================================================================

#[test]
fn extract_summary_counts_turns() {
    let temp_dir = TempDir::new().unwrap();

    annot(&temp_dir)
        .arg("extract")
        .arg(fixtures_dir().join("deploy_session.log"))
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Turns:      6"))
        .stdout(predicate::str::contains("Human:      2"))
        .stdout(predicate::str::contains("Tool calls: 2"));
}

#[test]
fn extract_prints_result_json() {
    let temp_dir = TempDir::new().unwrap();

    let output = annot(&temp_dir)
        .arg("extract")
        .arg(fixtures_dir().join("deploy_session.log"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["human_count"], 2);
    assert_eq!(json["ai_count"], 2);
    assert_eq!(json["transcript"][0]["role"], "human");
    assert_eq!(json["tool_calls"][1]["tool_name"], "Update");
}

#[test]
fn sanitize_strips_escape_sequences() {
    let temp_dir = TempDir::new().unwrap();

    annot(&temp_dir)
        .arg("sanitize")
        .arg(fixtures_dir().join("deploy_session.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b").not())
        .stdout(predicate::str::contains("> add a --dry-run flag"));
}

#[test]
fn extract_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    annot(&temp_dir)
        .arg("extract")
        .arg(temp_dir.path().join("missing.log"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read transcript"));
}

// ============================================================================
// Session Commands
// ============================================================================

#[test]
fn session_lifecycle() {
    let (temp_dir, session_dir) = temp_session("deploy_session.log");

    annot(&temp_dir)
        .args(["session", "start"])
        .arg(&session_dir)
        .args(["--task-id", "7", "--base-commit", "abc123", "--model", "model-one"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session ID:  S"))
        .stdout(predicate::str::contains("model-one"));
    assert!(metadata_path(&session_dir).exists());

    annot(&temp_dir)
        .args(["session", "attach"])
        .arg(&session_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Extracted 2 human turns and 6 total interactions",
        ));

    annot(&temp_dir)
        .args(["session", "attach"])
        .arg(&session_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("already has transcript data"));

    annot(&temp_dir)
        .args(["session", "finish"])
        .arg(&session_dir)
        .args(["--code-changes", "1", "--cost", "0.42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Turns:        2"));

    annot(&temp_dir)
        .args(["session", "finish"])
        .arg(&session_dir)
        .args(["--code-changes", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already finished"));

    let output = annot(&temp_dir)
        .args(["session", "show"])
        .arg(&session_dir)
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["workflow_stage"], "model_a_complete");
    assert_eq!(json["total_cost"], 0.42);
    assert_eq!(json["total_code_changes"], 1);
}

#[test]
fn model_b_session_uses_other_model() {
    let (temp_dir, model_a_dir) = temp_session("deploy_session.log");
    let model_b_dir = temp_dir.path().join("TASK-7").join("model-b");
    fs::create_dir_all(&model_b_dir).unwrap();
    let [first, second] = annot::Config::default().models.pair;

    annot(&temp_dir)
        .args(["session", "start"])
        .arg(&model_a_dir)
        .args(["--task-id", "7", "--base-commit", "abc123", "--model", &first])
        .assert()
        .success();

    annot(&temp_dir)
        .args(["session", "start"])
        .arg(&model_b_dir)
        .args(["--task-id", "7", "--base-commit", "abc123", "--pair-with"])
        .arg(&model_a_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(second.as_str()))
        .stdout(predicate::str::contains("-modelB"));
}

#[test]
fn start_requires_existing_directory() {
    let temp_dir = TempDir::new().unwrap();

    annot(&temp_dir)
        .args(["session", "start"])
        .arg(temp_dir.path().join("nowhere"))
        .args(["--task-id", "7", "--base-commit", "abc123"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Session directory does not exist"));
}

#[test]
fn attach_without_metadata_fails() {
    let (temp_dir, session_dir) = temp_session("deploy_session.log");

    annot(&temp_dir)
        .args(["session", "attach"])
        .arg(&session_dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Session metadata not found"));
}

// ============================================================================
// Version Output
// ============================================================================

#[test]
fn version_carries_build_info() {
    let temp_dir = TempDir::new().unwrap();

    let output = annot(&temp_dir).arg("--version").output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();

    insta::with_settings!({filters => vec![
        (r"\d+\.\d+\.\d+", "[VERSION]"),
        (r"\((?:[0-9a-f]{7} )?(?:\d{4}-\d{2}-\d{2}|unknown)\)", "([BUILD])"),
    ]}, {
        insta::assert_snapshot!(stdout.trim(), @"annot [VERSION] ([BUILD])");
    });
}
