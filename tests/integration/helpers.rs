//! Shared fixtures and helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Directory holding the raw transcript fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Raw contents of a fixture file.
pub fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name))
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

/// A temporary task folder with one session directory holding `fixture` as
/// its transcript capture.
///
/// Returns the temp dir guard and the session directory path.
pub fn temp_session(fixture: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let session_dir = temp_dir.path().join("TASK-7").join("S0000abcd-modelA");
    fs::create_dir_all(&session_dir).expect("Failed to create session dir");
    fs::copy(
        fixtures_dir().join(fixture),
        session_dir.join("claude_transcript.log"),
    )
    .expect("Failed to copy fixture");
    (temp_dir, session_dir)
}

/// Config path inside the temp dir; the file itself never exists, so the
/// binary runs with default config regardless of the user's own.
pub fn isolated_config(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("config.toml")
}

/// `[role] content` per turn, one per line.
pub fn render_turns(result: &annot::TranscriptResult) -> String {
    result
        .transcript
        .iter()
        .map(|turn| format!("[{}] {}", turn.role, turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn metadata_path(session_dir: &Path) -> PathBuf {
    session_dir.join("session_metadata.json")
}
