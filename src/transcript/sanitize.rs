//! Terminal noise removal for raw transcript captures.
//!
//! A capture made with `script(1)` contains real escape sequences, escape
//! sequences whose ESC byte was lost (so only the printable tail such as
//! `[38;2;215;119;87m` remains), UI framing glyphs, and redraw whitespace.
//! The passes below run in a fixed order because later passes assume the
//! earlier noise is already gone.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// ESC followed by a single Fe byte or a complete CSI sequence.
static ESCAPE_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])").expect("escape sequence pattern")
});

/// Printable renderings of control codes that lost their ESC byte.
///
/// Order matters: the specific colour and toggle codes go before the generic
/// numeric SGR patterns.
static LITERAL_CONTROL_CODES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\[\?[0-9]+[hl]",
        r"\[38;2;[0-9]+;[0-9]+;[0-9]+m",
        r"\[39m|\[49m",
        r"\[1m|\[22m|\[2m|\[23m|\[3m|\[4m|\[24m|\[7m|\[27m",
        r"\[[0-9]+m",
        r"\[[0-9;]+m",
        r"\]0;[^\\]*\\",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("literal control code pattern"))
    .collect()
});

static BLANK_LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n+").expect("blank line pattern"));

static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"  +").expect("space pattern"));

/// Box drawing characters used for UI framing. `⎿` is deliberately absent.
const BOX_DRAWING: &[char] = &[
    '╭', '╮', '│', '╰', '╯', '─', '═', '║', '┌', '┐', '└', '┘', '├', '┤', '┬', '┴', '┼',
];

/// Leftover of the `ESC ( B` charset reset.
const CHARSET_RESET_ARTIFACT: &str = "(B";

/// Clean a raw terminal capture into line-oriented text.
///
/// Total and idempotent: removing one sequence can splice together the
/// pieces of another (`[3[1mm` becomes `[3m`), so the passes are repeated
/// until the text stops changing. Every pass that changes the text makes it
/// strictly shorter, which bounds the loop.
///
/// Ordinary captures settle in two passes. Deeply nested splices peel only a
/// few layers per pass, so the worst case is quadratic in the input length.
pub fn sanitize(raw: &str) -> String {
    let mut current = sanitize_pass(raw);
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn sanitize_pass(raw: &str) -> String {
    let text = strip_escape_sequences(raw);
    let text = strip_literal_control_codes(text);
    let text = strip_control_chars(text);
    let text = strip_box_drawing(text);
    let text = text.replace(CHARSET_RESET_ARTIFACT, "");
    collapse_whitespace(text)
}

fn replace_owned(re: &Regex, text: String, replacement: &str) -> String {
    match re.replace_all(&text, replacement) {
        Cow::Borrowed(_) => text,
        Cow::Owned(replaced) => replaced,
    }
}

fn strip_escape_sequences(raw: &str) -> String {
    ESCAPE_SEQUENCE.replace_all(raw, "").into_owned()
}

fn strip_literal_control_codes(text: String) -> String {
    LITERAL_CONTROL_CODES
        .iter()
        .fold(text, |text, re| replace_owned(re, text, ""))
}

fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{b}'..='\u{1f}' | '\u{7f}'..='\u{9f}')
}

fn strip_control_chars(mut text: String) -> String {
    text.retain(|c| !is_stripped_control(c));
    text
}

fn strip_box_drawing(mut text: String) -> String {
    text.retain(|c| !BOX_DRAWING.contains(&c));
    text
}

fn collapse_whitespace(text: String) -> String {
    let text = replace_owned(&SPACE_RUN, text, " ");
    replace_owned(&BLANK_LINE_RUN, text, "\n\n")
}
