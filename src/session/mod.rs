//! Session records for the two-model annotation workflow.
//!
//! Each task runs the same prompt against two models. Every run gets a
//! session directory `TASK-<task>/<session_id>-model{A,B}/` holding the
//! terminal capture and a `session_metadata.json` record; the record is
//! created when the session starts and updated when it finishes and when the
//! transcript is parsed.

mod error;
mod metadata;
mod models;

pub use error::{SessionError, SessionResult};
pub use metadata::{
    format_timestamp, generate_session_id, parse_timestamp, session_dir_name, RelatedSession,
    SessionMetadata, SnapshotPaths, WorkflowStage,
};
pub use models::{ModelLabel, ModelPair};
