//! Debug-comment stripping
//!
//! A line starting with `%%` is a debug comment when `%%` is the whole line or is
//! followed by a character that is not alphanumeric (space, tab, punctuation...).
//! `%%VERSION` is literal text. Comment lines are dropped together with their line
//! terminator; every other line is kept byte for byte, including `\r\n` endings.
//!
//! Because whole lines disappear, positions in the stripped text no longer match
//! the input. [`StrippedSource`] keeps a line map, and the [`SourceLocation`] it
//! builds reports every position against the lines the author actually wrote.

use crate::editml::ast::SourceLocation;

/// Text with debug comments removed, plus the mapping back to input lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedSource {
    pub text: String,
    /// `line_map[i]` is the 0-based input line of stripped line `i`.
    line_map: Vec<usize>,
    input_lines: usize,
}

impl StrippedSource {
    /// Identity mapping for text that was not stripped.
    pub fn unchanged(text: &str) -> Self {
        let lines = text.split_inclusive('\n').count().max(1);
        Self {
            text: text.to_string(),
            line_map: (0..lines).collect(),
            input_lines: lines,
        }
    }

    /// 0-based input line for a 0-based line of the stripped text.
    pub fn original_line(&self, stripped_line: usize) -> usize {
        match self.line_map.get(stripped_line) {
            Some(line) => *line,
            // Past the last kept line (e.g. after a trailing newline).
            None => self.input_lines + (stripped_line - self.line_map.len()),
        }
    }

    /// Number of input lines that were removed.
    pub fn removed_lines(&self) -> usize {
        self.input_lines.saturating_sub(self.line_map.len())
    }

    /// Line index over the stripped text whose positions name input lines.
    pub fn location(&self) -> SourceLocation {
        let scanned_lines = self.text.matches('\n').count() + 1;
        let input_lines = (0..scanned_lines)
            .map(|line| self.original_line(line))
            .collect();
        SourceLocation::with_input_lines(&self.text, input_lines)
    }
}

/// Returns `true` if `line` (without its terminator) is a debug comment.
pub fn is_debug_comment(line: &str) -> bool {
    let Some(rest) = line.strip_prefix("%%") else {
        return false;
    };
    match rest.chars().next() {
        None => true,
        Some(ch) => !ch.is_alphanumeric(),
    }
}

/// Remove debug-comment lines from `input`.
pub fn strip_debug_comments(input: &str) -> StrippedSource {
    let mut text = String::with_capacity(input.len());
    let mut line_map = Vec::new();
    let mut input_lines = 0;

    for (index, segment) in input.split_inclusive('\n').enumerate() {
        input_lines = index + 1;
        let line = segment
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(segment);
        if is_debug_comment(line) {
            continue;
        }
        text.push_str(segment);
        line_map.push(index);
    }

    StrippedSource {
        text,
        line_map,
        input_lines,
    }
}
