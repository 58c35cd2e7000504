//! Turn segmentation over cleaned transcript lines.
//!
//! A single pass over the lines drives a small state machine:
//! - an [`Accumulator`] that is idle or collecting either human or agent
//!   text, never both
//! - an independent in-flight [`ToolCall`] that collects `⎿` result lines
//! - a per-call set of emitted contents so no turn is emitted twice
//!
//! Terminal redraws repeat lines verbatim, which the seen set also absorbs.
//! The cost is that a genuinely repeated turn (the same short confirmation
//! typed twice) is only kept once.

use std::collections::HashSet;

use tracing::debug;

use super::rules::{self, LineKind};
use super::types::{Role, ToolCall, TranscriptResult, Turn};

/// Human text must be longer than this many characters to become a turn.
const MIN_HUMAN_CHARS: usize = 1;

/// Agent text must be longer than this many characters to become a turn.
const MIN_AGENT_CHARS: usize = 10;

/// A bullet line's content must be longer than this to join agent narrative.
const MIN_AGENT_LINE_CHARS: usize = 5;

/// Unmarked lines must be longer than this to continue an accumulator.
const MIN_CONTINUATION_CHARS: usize = 3;

/// Text being collected for the turn in progress.
#[derive(Debug, Default)]
enum Accumulator {
    #[default]
    Idle,
    Human(Vec<String>),
    Agent(Vec<String>),
}

/// Reconstruct the conversation from cleaned transcript lines.
///
/// Total over any input: lines that fit no rule are dropped.
pub fn extract<I, S>(lines: I) -> TranscriptResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut segmenter = Segmenter::default();
    for line in lines {
        segmenter.feed(line.as_ref());
    }
    segmenter.finish()
}

#[derive(Debug, Default)]
struct Segmenter {
    accumulator: Accumulator,
    tool_call: Option<ToolCall>,
    seen: HashSet<String>,
    transcript: Vec<Turn>,
    tool_calls: Vec<ToolCall>,
    dropped_lines: usize,
}

impl Segmenter {
    fn feed(&mut self, raw: &str) {
        let line = raw.trim();

        match rules::classify(line) {
            LineKind::Blank => {}
            LineKind::HumanPrompt => {
                if matches!(self.accumulator, Accumulator::Agent(_)) {
                    self.flush_accumulator();
                }
                // A repeated prompt line is a redraw of the input box: the
                // newest rendering replaces whatever was collected so far.
                let prompt = rules::strip_human_prompt(line).to_string();
                self.accumulator = Accumulator::Human(vec![prompt]);
            }
            LineKind::AgentBullet => {
                if matches!(self.accumulator, Accumulator::Human(_)) {
                    self.flush_accumulator();
                }
                self.flush_tool_call();

                let content = rules::strip_agent_bullet(line);
                if let Some((name, parameters)) = rules::parse_tool_call(content) {
                    self.tool_call = Some(ToolCall::new(name, parameters));
                } else if content.chars().count() > MIN_AGENT_LINE_CHARS
                    && !rules::is_status_noise(content)
                {
                    self.push_agent(content);
                } else {
                    self.dropped_lines += 1;
                }
            }
            LineKind::ToolResult => match self.tool_call.as_mut() {
                Some(call) => call.push_output(rules::strip_tool_result(line)),
                None => self.dropped_lines += 1,
            },
            LineKind::Text => self.continue_accumulator(raw, line),
            LineKind::BareMarker => self.dropped_lines += 1,
        }
    }

    fn continue_accumulator(&mut self, raw: &str, line: &str) {
        let long_enough = line.chars().count() > MIN_CONTINUATION_CHARS;

        match &mut self.accumulator {
            Accumulator::Human(parts) => {
                let indented = raw.starts_with(char::is_whitespace);
                if indented || long_enough {
                    parts.push(line.to_string());
                    return;
                }
            }
            Accumulator::Agent(parts) => {
                if long_enough && !rules::is_status_noise(line) {
                    parts.push(line.to_string());
                    return;
                }
            }
            Accumulator::Idle => {}
        }
        self.dropped_lines += 1;
    }

    fn push_agent(&mut self, content: &str) {
        match &mut self.accumulator {
            Accumulator::Agent(parts) => parts.push(content.to_string()),
            _ => self.accumulator = Accumulator::Agent(vec![content.to_string()]),
        }
    }

    /// Emit the accumulated human or agent text, if it qualifies, and go idle.
    fn flush_accumulator(&mut self) {
        match std::mem::take(&mut self.accumulator) {
            Accumulator::Idle => {}
            Accumulator::Human(parts) => {
                let text = parts.join(" ").trim().to_string();
                if text.chars().count() > MIN_HUMAN_CHARS {
                    self.emit(Role::Human, text);
                }
            }
            Accumulator::Agent(parts) => {
                let text = parts.join(" ").trim().to_string();
                if text.chars().count() > MIN_AGENT_CHARS && !rules::is_status_noise(&text) {
                    self.emit(Role::Agent, text);
                } else {
                    debug!(chars = text.chars().count(), "discarding agent text");
                }
            }
        }
    }

    fn flush_tool_call(&mut self) {
        if let Some(call) = self.tool_call.take() {
            self.emit(Role::ToolCall, call.content.clone());
            self.tool_calls.push(call);
        }
    }

    fn emit(&mut self, role: Role, content: String) {
        if content.is_empty() || self.seen.contains(&content) {
            return;
        }
        self.seen.insert(content.clone());
        self.transcript.push(Turn::new(role, content));
    }

    fn finish(mut self) -> TranscriptResult {
        if matches!(self.accumulator, Accumulator::Human(_)) {
            self.flush_accumulator();
        }
        self.flush_tool_call();
        self.flush_accumulator();

        debug!(
            turns = self.transcript.len(),
            tool_calls = self.tool_calls.len(),
            dropped_lines = self.dropped_lines,
            "transcript segmented"
        );
        TranscriptResult::new(self.transcript, self.tool_calls)
    }
}
