//! Line classification rules for cleaned transcript lines.
//!
//! The interactive CLI marks each part of the conversation with a leading
//! glyph: `> ` for the human prompt, a bullet or spinner glyph for agent
//! output and tool calls, and `⎿` for tool results. Every rule is a compiled
//! pattern tagged with the [`LineKind`] it produces; rules are tried in table
//! order and the first match wins.

use std::sync::LazyLock;

use regex::Regex;

/// Prefix of a line typed at the human prompt.
pub const HUMAN_PROMPT: &str = "> ";

/// Glyphs that lead agent narrative and tool call lines.
pub const AGENT_BULLETS: &[char] = &['⏺', '✻', '·', '✽', '✶', '✳', '✢'];

/// Glyph that leads a tool result line.
pub const TOOL_RESULT_MARKER: char = '⎿';

/// Structural shape of a single trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty after trimming
    Blank,
    /// `> ` followed by prompt text
    HumanPrompt,
    /// Agent bullet followed by whitespace
    AgentBullet,
    /// Tool result marker
    ToolResult,
    /// Led by `>` or an agent bullet without forming a complete start
    /// (`>text`, `⏺text`). Never continues an accumulator.
    BareMarker,
    /// Anything else
    Text,
}

struct LineRule {
    kind: LineKind,
    pattern: Regex,
}

static LINE_RULES: LazyLock<Vec<LineRule>> = LazyLock::new(|| {
    [
        (LineKind::Blank, r"^$"),
        (LineKind::HumanPrompt, r"^> "),
        (LineKind::AgentBullet, r"^[⏺✻·✽✶✳✢]\s"),
        (LineKind::ToolResult, r"^⎿"),
        (LineKind::BareMarker, r"^[>⏺✻·✽✶✳✢]"),
    ]
    .into_iter()
    .map(|(kind, pattern)| LineRule {
        kind,
        pattern: Regex::new(pattern).expect("line rule pattern"),
    })
    .collect()
});

static AGENT_BULLET_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[⏺✻·✽✶✳✢]\s*").expect("agent bullet pattern"));

/// `name(parameters)` with a bare identifier and a single unnested argument blob.
static TOOL_CALL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\(([^)]*)\)$").expect("tool call pattern"));

/// Spinner text, progress indicators, cost and usage summaries, truncation markers.
static STATUS_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\.\.\.|…|ing…|ing\.\.\.|esc to interrupt",
        r"|Forging|Transfiguring|Ideating|Combobulating|Crunching|Accomplishing|Waiting|Running",
        r"|Total cost|Total duration|Usage by model|ctrl\+o to expand",
        r"|\(.+\s+tokens\)|\(.+\s+lines\)",
        r"|Found \d+ files|Found \d+ lines|Found \d+ matches",
        r"|No content|Error:|Done \(|\.\.\. \+\d+ lines",
    ))
    .expect("status noise pattern")
});

/// Classify an already trimmed line.
pub fn classify(line: &str) -> LineKind {
    LINE_RULES
        .iter()
        .find(|rule| rule.pattern.is_match(line))
        .map(|rule| rule.kind)
        .unwrap_or(LineKind::Text)
}

/// Whether the text looks like transient status output rather than conversation.
pub fn is_status_noise(text: &str) -> bool {
    STATUS_NOISE.is_match(text)
}

/// Prompt text of a [`LineKind::HumanPrompt`] line.
pub fn strip_human_prompt(line: &str) -> &str {
    line.strip_prefix(HUMAN_PROMPT).unwrap_or(line).trim()
}

/// Content of a [`LineKind::AgentBullet`] line without its glyph.
pub fn strip_agent_bullet(line: &str) -> &str {
    match AGENT_BULLET_PREFIX.find(line) {
        Some(prefix) => line[prefix.end()..].trim(),
        None => line.trim(),
    }
}

/// Result text of a [`LineKind::ToolResult`] line without the marker.
pub fn strip_tool_result(line: &str) -> &str {
    line.strip_prefix(TOOL_RESULT_MARKER).unwrap_or(line).trim()
}

/// Split `name(parameters)` into its parts.
///
/// Nested parentheses and multi-line argument lists do not match; such lines
/// are treated as agent narrative by the caller.
pub fn parse_tool_call(content: &str) -> Option<(&str, &str)> {
    let captures = TOOL_CALL_SHAPE.captures(content)?;
    let name = captures.get(1)?.as_str();
    let parameters = captures.get(2)?.as_str();
    Some((name, parameters))
}
