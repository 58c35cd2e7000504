//! Session metadata errors.

use std::path::PathBuf;

use crate::transcript::TranscriptError;

/// Errors that can occur while reading, writing or updating session metadata.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session metadata not found at: {path}")]
    MetadataNotFound { path: PathBuf },

    #[error("Session directory does not exist: {path}")]
    DirectoryMissing { path: PathBuf },

    #[error("Could not find opposite model for: {0}")]
    UnknownModel(String),

    #[error("Invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Failed to access session metadata: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed session metadata: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Transcript(#[from] TranscriptError),
}

pub type SessionResult<T> = Result<T, SessionError>;
