//! annot - annotation session tooling for AI coding agents
//!
//! Parses terminal captures of interactive agent sessions into structured
//! human, agent and tool call turns, and keeps the per-session metadata
//! records of the two-model annotation workflow.

pub mod cli;
pub mod config;
pub mod session;
pub mod transcript;

pub use config::Config;
pub use session::{SessionError, SessionMetadata};
pub use transcript::{extract, extract_transcript, sanitize, TranscriptResult};
