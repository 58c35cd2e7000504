//! The `session_metadata.json` record written for every annotated session.

use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::error::{SessionError, SessionResult};
use super::models::{ModelLabel, ModelPair};
use crate::transcript::{TranscriptResult, Turn};

/// Progress of a session through the two-model workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    ModelAInit,
    ModelAComplete,
    ModelBInit,
    ModelBComplete,
}

impl WorkflowStage {
    pub fn initial(label: ModelLabel) -> Self {
        match label {
            ModelLabel::A => WorkflowStage::ModelAInit,
            ModelLabel::B => WorkflowStage::ModelBInit,
        }
    }

    /// Stage reached once the session is finished.
    pub fn completed(self) -> Self {
        match self {
            WorkflowStage::ModelAInit | WorkflowStage::ModelAComplete => {
                WorkflowStage::ModelAComplete
            }
            WorkflowStage::ModelBInit | WorkflowStage::ModelBComplete => {
                WorkflowStage::ModelBComplete
            }
        }
    }

    pub fn is_complete(self) -> bool {
        matches!(
            self,
            WorkflowStage::ModelAComplete | WorkflowStage::ModelBComplete
        )
    }
}

/// Task-relative locations of the before/after snapshots and the diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPaths {
    pub before: String,
    pub after: String,
    pub diff: String,
}

impl SnapshotPaths {
    pub fn for_session(task_id: &str, session_dir_name: &str) -> Self {
        let root = format!("TASK-{}/{}/snapshots", task_id, session_dir_name);
        Self {
            before: format!("{}/before_code_state/", root),
            after: format!("{}/after_code_state/", root),
            diff: format!("{}/git_diff.patch", root),
        }
    }
}

/// Link from a model B session back to its model A counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedSession {
    pub model_a_session_id: String,
    pub comparison_pair: bool,
}

/// Everything recorded about one model's session on a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub task_id: String,
    pub session_id: String,
    pub uuid: String,
    pub base_commit: String,
    pub model_id: String,
    pub timestamp_start: String,
    pub timestamp_end: Option<String>,
    /// Whole seconds between start and end
    pub total_duration: Option<i64>,
    pub total_cost: Option<f64>,
    /// Number of files changed relative to `base_commit`
    pub total_code_changes: Option<u64>,
    pub snapshot_paths: SnapshotPaths,
    #[serde(default)]
    pub transcript: Vec<Turn>,
    /// Number of human turns in `transcript`
    #[serde(default)]
    pub turns: usize,
    pub script_version: String,
    pub workflow_stage: WorkflowStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_session: Option<RelatedSession>,
}

/// New short session id: `S` followed by eight hex digits.
pub fn generate_session_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("S{}", &hex[..8])
}

/// Directory name of a session inside its task folder.
pub fn session_dir_name(session_id: &str, label: ModelLabel) -> String {
    format!("{}-{}", session_id, label)
}

/// UTC timestamp in ISO-8601 with a `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(value: &str) -> SessionResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|source| SessionError::InvalidTimestamp {
            value: value.to_string(),
            source,
        })
}

impl SessionMetadata {
    /// Metadata for a session that starts now.
    pub fn start(
        task_id: impl Into<String>,
        model_id: impl Into<String>,
        base_commit: impl Into<String>,
        label: ModelLabel,
        script_version: impl Into<String>,
    ) -> Self {
        let task_id = task_id.into();
        let session_id = generate_session_id();
        let snapshot_paths =
            SnapshotPaths::for_session(&task_id, &session_dir_name(&session_id, label));

        Self {
            task_id,
            session_id,
            uuid: Uuid::new_v4().to_string(),
            base_commit: base_commit.into(),
            model_id: model_id.into(),
            timestamp_start: format_timestamp(Utc::now()),
            timestamp_end: None,
            total_duration: None,
            total_cost: None,
            total_code_changes: None,
            snapshot_paths,
            transcript: Vec::new(),
            turns: 0,
            script_version: script_version.into(),
            workflow_stage: WorkflowStage::initial(label),
            related_session: None,
        }
    }

    /// Metadata for the model B session paired with `model_a`.
    ///
    /// Model B runs on the same task and base commit with the other model of
    /// the pair.
    pub fn for_model_b(
        model_a: &SessionMetadata,
        pair: &ModelPair,
        script_version: impl Into<String>,
    ) -> SessionResult<Self> {
        let model_b = pair.opposite(&model_a.model_id)?;
        let mut metadata = Self::start(
            model_a.task_id.clone(),
            model_b,
            model_a.base_commit.clone(),
            ModelLabel::B,
            script_version,
        );
        metadata.related_session = Some(RelatedSession {
            model_a_session_id: model_a.session_id.clone(),
            comparison_pair: true,
        });
        Ok(metadata)
    }

    pub fn label(&self) -> ModelLabel {
        match self.workflow_stage {
            WorkflowStage::ModelAInit | WorkflowStage::ModelAComplete => ModelLabel::A,
            WorkflowStage::ModelBInit | WorkflowStage::ModelBComplete => ModelLabel::B,
        }
    }

    pub fn dir_name(&self) -> String {
        session_dir_name(&self.session_id, self.label())
    }

    pub fn has_transcript(&self) -> bool {
        !self.transcript.is_empty()
    }

    /// Store the extracted conversation; `turns` counts human turns only.
    pub fn attach_transcript(&mut self, result: &TranscriptResult) {
        self.turns = result.human_count;
        self.transcript = result.transcript.clone();
    }

    /// Close the session at `end`.
    pub fn finish(&mut self, end: DateTime<Utc>, code_changes: u64) -> SessionResult<()> {
        let start = parse_timestamp(&self.timestamp_start)?;
        self.timestamp_end = Some(format_timestamp(end));
        self.total_duration = Some((end - start).num_seconds());
        self.total_code_changes = Some(code_changes);
        self.workflow_stage = self.workflow_stage.completed();
        Ok(())
    }

    pub fn load(path: &Path) -> SessionResult<Self> {
        if !path.exists() {
            return Err(SessionError::MetadataNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> SessionResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!(path = %path.display(), session = %self.session_id, "saved session metadata");
        Ok(())
    }
}
