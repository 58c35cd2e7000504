//! Transcript extraction for terminal captures of agent sessions.
//!
//! A session recorded with `script(1)` is a raw byte stream full of escape
//! sequences and UI framing. Extraction runs in two stages:
//!
//! - [`sanitize`] strips terminal noise and yields line-oriented text
//! - [`extract`] segments the cleaned lines into human, agent and tool call
//!   turns
//!
//! Both stages are pure and total: any input produces a (possibly empty)
//! [`TranscriptResult`].
//!
//! # Module Structure
//!
//! - [`sanitize`] - Control sequence and decoration stripping
//! - [`rules`] - Ordered line classification and status noise patterns
//! - [`extract`] - Turn segmentation state machine
//! - [`types`] - Turns, tool calls and the aggregate result

mod extract;
pub mod rules;
mod sanitize;
mod types;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

pub use extract::extract;
pub use rules::LineKind;
pub use sanitize::sanitize;
pub use types::{Role, ToolCall, TranscriptResult, Turn, TOOL_PREVIEW_CHARS};

/// Errors from reading a transcript file.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("Failed to read transcript {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Sanitize a raw capture and segment it into turns.
pub fn extract_transcript(raw: &str) -> TranscriptResult {
    let cleaned = sanitize(raw);
    extract(cleaned.split('\n'))
}

/// Read a capture from disk and extract its turns.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected; a
/// capture cut off mid-character is still worth parsing.
pub fn extract_transcript_file(path: impl AsRef<Path>) -> Result<TranscriptResult, TranscriptError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| TranscriptError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = String::from_utf8_lossy(&bytes);
    let result = extract_transcript(&raw);

    info!(
        path = %path.display(),
        human = result.human_count,
        agent = result.ai_count,
        tool_calls = result.tool_call_count,
        "extracted transcript"
    );
    Ok(result)
}
