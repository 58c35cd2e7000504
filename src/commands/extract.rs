//! Transcript subcommands handler

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use annot::transcript::{extract_transcript_file, sanitize, TranscriptResult};

/// Print the extracted transcript as JSON, or a count summary.
pub fn handle_extract(file: &Path, summary: bool) -> Result<()> {
    let result = extract_transcript_file(file)?;

    if summary {
        print!("{}", format_summary(&result));
    } else {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    Ok(())
}

/// Print the sanitized transcript text.
pub fn handle_sanitize(file: &Path) -> Result<()> {
    let bytes = fs::read(file)
        .with_context(|| format!("Failed to read transcript {}", file.display()))?;
    print!("{}", sanitize(&String::from_utf8_lossy(&bytes)));
    Ok(())
}

fn format_summary(result: &TranscriptResult) -> String {
    format!(
        "Turns:      {}\nHuman:      {}\nAgent:      {}\nTool calls: {}\n",
        result.transcript.len(),
        result.human_count,
        result.ai_count,
        result.tool_call_count
    )
}
