//! Command line definitions.
//!
//! Kept in the library so integration tests and completion generation share
//! the same definitions as the binary.

use std::path::PathBuf;
use std::sync::LazyLock;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

/// Version string with the commit hash on development builds.
pub static VERSION: LazyLock<String> = LazyLock::new(|| {
    let version = env!("CARGO_PKG_VERSION");
    let build_date = env!("ANNOT_BUILD_DATE");
    match option_env!("VERGEN_GIT_SHA") {
        Some(sha) if sha != "unknown" => {
            format!("{} ({} {})", version, &sha[..sha.len().min(7)], build_date)
        }
        _ => format!("{} ({})", version, build_date),
    }
});

#[derive(Debug, Parser)]
#[command(
    name = "annot",
    version = VERSION.as_str(),
    about = "Parse AI agent terminal transcripts and manage annotation sessions",
    long_about = "Parse AI agent terminal transcripts into human, agent and tool call turns,\n\
                  and keep the session metadata of the two-model annotation workflow."
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract turns from a terminal transcript and print them as JSON
    Extract {
        /// Raw transcript captured from the terminal
        file: PathBuf,

        /// Print turn counts instead of the full JSON result
        #[arg(long)]
        summary: bool,
    },

    /// Print a transcript with terminal control sequences removed
    Sanitize {
        /// Raw transcript captured from the terminal
        file: PathBuf,
    },

    /// Create and update session metadata
    #[command(subcommand)]
    Session(SessionCommands),

    /// Show or edit the configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum SessionCommands {
    /// Write initial metadata into an existing session directory
    Start {
        /// Session directory
        dir: PathBuf,

        /// Task identifier
        #[arg(long)]
        task_id: String,

        /// Commit both sessions start from
        #[arg(long)]
        base_commit: String,

        /// Model id; chosen at random from the configured pair when omitted
        #[arg(long, conflicts_with = "pair_with")]
        model: Option<String>,

        /// Start the model B session paired with this model A session directory
        #[arg(long, value_name = "MODEL_A_DIR")]
        pair_with: Option<PathBuf>,
    },

    /// Parse the session transcript into its metadata
    Attach {
        /// Session directory
        dir: PathBuf,

        /// Replace a transcript that was already attached
        #[arg(long)]
        force: bool,
    },

    /// Close a session and attach its transcript
    Finish {
        /// Session directory
        dir: PathBuf,

        /// Number of files changed relative to the base commit
        #[arg(long)]
        code_changes: u64,

        /// Total API cost in dollars
        #[arg(long)]
        cost: Option<f64>,
    },

    /// Print session metadata
    Show {
        /// Session directory
        dir: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    Show,
    /// Open the configuration file in $EDITOR
    Edit,
}
