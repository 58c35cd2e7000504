//! Session subcommands handler

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use tracing::warn;

use annot::session::{ModelLabel, SessionError, SessionMetadata};
use annot::transcript::extract_transcript_file;
use annot::Config;

/// Write the initial metadata record for a new session.
pub fn handle_start(
    dir: &Path,
    task_id: &str,
    base_commit: &str,
    model: Option<&str>,
    pair_with: Option<&Path>,
) -> Result<()> {
    let config = Config::load()?;
    if !dir.is_dir() {
        return Err(SessionError::DirectoryMissing {
            path: dir.to_path_buf(),
        }
        .into());
    }

    let metadata_path = config.metadata_path(dir);
    if metadata_path.exists() {
        bail!("Session metadata already exists at: {}", metadata_path.display());
    }

    let pair = config.model_pair();
    let metadata = match pair_with {
        Some(model_a_dir) => {
            let model_a = SessionMetadata::load(&config.metadata_path(model_a_dir))
                .context("Failed to load the model A session")?;
            if model_a.task_id != task_id || model_a.base_commit != base_commit {
                bail!(
                    "Model A session {} belongs to task {} at {}",
                    model_a.session_id,
                    model_a.task_id,
                    model_a.base_commit
                );
            }
            SessionMetadata::for_model_b(&model_a, &pair, &config.session.script_version)?
        }
        None => {
            let model = model.unwrap_or_else(|| pair.choose_random());
            if !pair.contains(model) {
                warn!(model, "model is not part of the configured pair");
            }
            SessionMetadata::start(
                task_id,
                model,
                base_commit,
                ModelLabel::A,
                &config.session.script_version,
            )
        }
    };

    metadata.save(&metadata_path)?;
    println!("Session ID:  {}", metadata.session_id);
    println!("Directory:   {}", metadata.dir_name());
    println!("Model:       {}", metadata.model_id);
    println!("Base commit: {}", metadata.base_commit);
    Ok(())
}

/// Parse the session transcript into the metadata record.
pub fn handle_attach(dir: &Path, force: bool) -> Result<()> {
    let config = Config::load()?;
    let metadata_path = config.metadata_path(dir);
    let mut metadata = SessionMetadata::load(&metadata_path)?;

    if metadata.has_transcript() && !force {
        println!(
            "Session {} already has transcript data (use --force to replace it)",
            metadata.session_id
        );
        return Ok(());
    }

    let transcript_path = config.transcript_path(dir);
    if !transcript_path.exists() {
        bail!("Transcript file not found: {}", transcript_path.display());
    }
    let result = extract_transcript_file(&transcript_path)?;
    metadata.attach_transcript(&result);
    metadata.save(&metadata_path)?;

    println!(
        "Extracted {} human turns and {} total interactions",
        result.human_count,
        result.transcript.len()
    );
    Ok(())
}

/// Close the session and attach its transcript.
///
/// A missing transcript is not fatal: the session may have run without
/// capture, and the metadata should still be closed.
pub fn handle_finish(dir: &Path, code_changes: u64, cost: Option<f64>) -> Result<()> {
    let config = Config::load()?;
    let metadata_path = config.metadata_path(dir);
    let mut metadata = SessionMetadata::load(&metadata_path)?;

    if metadata.workflow_stage.is_complete() {
        bail!("Session {} is already finished", metadata.session_id);
    }

    metadata.finish(Utc::now(), code_changes)?;
    if cost.is_some() {
        metadata.total_cost = cost;
    }

    let transcript_path = config.transcript_path(dir);
    if transcript_path.exists() {
        let result = extract_transcript_file(&transcript_path)?;
        metadata.attach_transcript(&result);
    } else {
        warn!(path = %transcript_path.display(), "transcript file not found");
    }

    metadata.save(&metadata_path)?;

    println!("Session {} finished:", metadata.session_id);
    println!("  Duration:     {} seconds", metadata.total_duration.unwrap_or(0));
    println!("  Code changes: {} files", code_changes);
    println!("  Turns:        {}", metadata.turns);
    println!("  Interactions: {}", metadata.transcript.len());
    Ok(())
}

/// Print the metadata record as JSON.
pub fn handle_show(dir: &Path) -> Result<()> {
    let config = Config::load()?;
    let metadata = SessionMetadata::load(&config.metadata_path(dir))?;
    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}
