//! Configuration file handling.
//!
//! The config lives at `<config_dir>/annot/config.toml` unless `ANNOT_CONFIG`
//! points elsewhere. Every section has defaults, so a missing file or a file
//! with only some fields set is valid.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::session::ModelPair;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "ANNOT_CONFIG";

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub models: ModelsConfig,
    pub session: SessionConfig,
}

/// Models compared by the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// The two model ids a task is run against
    pub pair: [String; 2],
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            pair: [
                "claude-opus-4-1-20250805".to_string(),
                "claude-sonnet-4-20250514".to_string(),
            ],
        }
    }
}

/// File names inside a session directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Terminal capture written by `script(1)`
    pub transcript_file: String,
    /// JSON metadata record
    pub metadata_file: String,
    /// Version stamped into new metadata records
    pub script_version: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            transcript_file: "claude_transcript.log".to_string(),
            metadata_file: "session_metadata.json".to_string(),
            script_version: "1.0".to_string(),
        }
    }
}

impl Config {
    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("annot").join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write the config file, creating its directory if needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    pub fn model_pair(&self) -> ModelPair {
        let [first, second] = self.models.pair.clone();
        ModelPair::new(first, second)
    }

    /// Transcript capture inside a session directory.
    pub fn transcript_path(&self, session_dir: &Path) -> PathBuf {
        session_dir.join(&self.session.transcript_file)
    }

    /// Metadata record inside a session directory.
    pub fn metadata_path(&self, session_dir: &Path) -> PathBuf {
        session_dir.join(&self.session.metadata_file)
    }
}
