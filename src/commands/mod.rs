//! Subcommand handlers for the annot binary.

pub mod completions;
pub mod config;
pub mod extract;
pub mod session;
