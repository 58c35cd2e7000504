//! Data structures produced by transcript extraction.

use serde::{Deserialize, Serialize};

/// Maximum number of output characters shown in a tool call preview.
pub const TOOL_PREVIEW_CHARS: usize = 100;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Text typed at the `> ` prompt
    Human,
    /// Narrative text printed by the agent
    Agent,
    /// A tool invocation, rendered as its preview string
    ToolCall,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Human => "human",
            Role::Agent => "agent",
            Role::ToolCall => "tool_call",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified unit of conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A named tool invocation with its raw arguments and collected result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool_name: String,
    /// Argument text exactly as printed between the parentheses
    pub parameters: String,
    /// Result lines joined with `\n`; empty when no result was printed
    pub output: String,
    /// Rendered preview used as the `tool_call` turn content.
    ///
    /// The preview is cut from the whole `output`, so with several result
    /// lines it contains `\n`.
    pub content: String,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>, parameters: impl Into<String>) -> Self {
        let tool_name = tool_name.into();
        let parameters = parameters.into();
        let content = format!("{}({})", tool_name, parameters);
        Self {
            tool_name,
            parameters,
            output: String::new(),
            content,
        }
    }

    /// Append one result line and refresh the preview.
    pub fn push_output(&mut self, line: &str) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        self.output.push_str(line);
        self.content = self.render_preview();
    }

    fn render_preview(&self) -> String {
        let mut preview: String = self.output.chars().take(TOOL_PREVIEW_CHARS).collect();
        if self.output.chars().count() > TOOL_PREVIEW_CHARS {
            preview.push_str("...");
        }
        format!("{}({}) → {}", self.tool_name, self.parameters, preview)
    }
}

/// Everything recovered from one transcript.
///
/// The role-filtered views and counts are derived from `transcript` and
/// `tool_calls` when the result is built and never change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptResult {
    pub transcript: Vec<Turn>,
    pub human_inputs: Vec<String>,
    pub ai_responses: Vec<String>,
    pub tool_calls: Vec<ToolCall>,
    pub human_count: usize,
    pub ai_count: usize,
    pub tool_call_count: usize,
}

impl TranscriptResult {
    pub fn new(transcript: Vec<Turn>, tool_calls: Vec<ToolCall>) -> Self {
        let contents_of = |role: Role| -> Vec<String> {
            transcript
                .iter()
                .filter(|turn| turn.role == role)
                .map(|turn| turn.content.clone())
                .collect()
        };
        let human_inputs = contents_of(Role::Human);
        let ai_responses = contents_of(Role::Agent);

        Self {
            human_count: human_inputs.len(),
            ai_count: ai_responses.len(),
            tool_call_count: tool_calls.len(),
            transcript,
            human_inputs,
            ai_responses,
            tool_calls,
        }
    }
}
