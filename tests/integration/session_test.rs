//! Session metadata lifecycle against real session directories

use chrono::{Duration, Utc};

use annot::session::{ModelLabel, ModelPair, SessionError, SessionMetadata, WorkflowStage};
use annot::transcript::extract_transcript_file;

use crate::helpers::{metadata_path, temp_session};

#[test]
fn metadata_survives_save_and_load() {
    let (_temp_dir, session_dir) = temp_session("deploy_session.log");
    let path = metadata_path(&session_dir);

    let metadata = SessionMetadata::start("7", "model-one", "abc123", ModelLabel::A, "1.0");
    metadata.save(&path).expect("Should save metadata");

    let loaded = SessionMetadata::load(&path).expect("Should load metadata");
    assert_eq!(loaded, metadata);
    assert_eq!(loaded.workflow_stage, WorkflowStage::ModelAInit);
}

#[test]
fn saved_record_uses_workflow_field_names() {
    let (_temp_dir, session_dir) = temp_session("deploy_session.log");
    let path = metadata_path(&session_dir);

    SessionMetadata::start("7", "model-one", "abc123", ModelLabel::A, "1.0")
        .save(&path)
        .unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["task_id"], "7");
    assert_eq!(json["workflow_stage"], "model_a_init");
    assert_eq!(json["turns"], 0);
    assert!(json["timestamp_end"].is_null());
    assert!(json.get("related_session").is_none());
}

#[test]
fn loading_missing_metadata_fails() {
    let (_temp_dir, session_dir) = temp_session("deploy_session.log");

    let err = SessionMetadata::load(&metadata_path(&session_dir)).unwrap_err();

    assert!(matches!(err, SessionError::MetadataNotFound { .. }));
}

#[test]
fn finished_session_carries_transcript() {
    let (_temp_dir, session_dir) = temp_session("deploy_session.log");
    let path = metadata_path(&session_dir);
    let mut metadata = SessionMetadata::start("7", "model-one", "abc123", ModelLabel::A, "1.0");

    let result = extract_transcript_file(session_dir.join("claude_transcript.log")).unwrap();
    metadata.attach_transcript(&result);
    metadata
        .finish(Utc::now() + Duration::seconds(90), 3)
        .unwrap();
    metadata.save(&path).unwrap();

    let loaded = SessionMetadata::load(&path).unwrap();
    assert_eq!(loaded.turns, 2);
    assert_eq!(loaded.transcript.len(), 6);
    assert_eq!(loaded.total_code_changes, Some(3));
    assert!(loaded.total_duration.unwrap() >= 89);
    assert_eq!(loaded.workflow_stage, WorkflowStage::ModelAComplete);
}

#[test]
fn model_b_pairs_with_model_a() {
    let pair = ModelPair::new("model-one", "model-two");
    let model_a = SessionMetadata::start("7", "model-two", "abc123", ModelLabel::A, "1.0");

    let model_b = SessionMetadata::for_model_b(&model_a, &pair, "1.0").unwrap();

    assert_eq!(model_b.model_id, "model-one");
    assert_eq!(model_b.task_id, model_a.task_id);
    assert_eq!(model_b.base_commit, model_a.base_commit);
    assert_ne!(model_b.session_id, model_a.session_id);
    assert_eq!(
        model_b.related_session.as_ref().unwrap().model_a_session_id,
        model_a.session_id
    );
    assert!(model_b.dir_name().ends_with("-modelB"));
}
