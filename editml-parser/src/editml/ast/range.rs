//! Position and location tracking for source text
//!
//! ## Types
//!
//! - [`Position`] - A line:column position in the input (0-based)
//! - [`Range`] - A byte span together with its start/end positions
//! - [`SourceLocation`] - Line index converting byte offsets to positions
//!
//! Byte spans index into the text the matcher scanned, which is the input after
//! debug-comment stripping. Lines are input lines: stripping only removes whole
//! lines, so a [`SourceLocation`] built with the stripped line map translates each
//! scanned line back. Columns count bytes from the start of the line.

use serde::Serialize;
use std::fmt;
use std::ops::Range as ByteRange;

/// Represents a position in source text (line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Represents a location in source text (byte span plus start and end positions)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub span: ByteRange<usize>,
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(span: ByteRange<usize>, start: Position, end: Position) -> Self {
        Self { span, start, end }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::new(0..0, Position::default(), Position::default())
    }
}

/// Provides fast conversion from byte offsets to line/column positions
#[derive(Debug, Clone)]
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
    /// Input line of each scanned line, when lines were removed before scanning
    input_lines: Option<Vec<usize>>,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            line_starts,
            input_lines: None,
        }
    }

    /// Line index whose positions report `input_lines[i]` for scanned line `i`.
    /// Scanned lines past the end of the map continue after its last entry.
    pub fn with_input_lines(source: &str, input_lines: Vec<usize>) -> Self {
        Self {
            input_lines: Some(input_lines),
            ..Self::new(source)
        }
    }

    fn input_line(&self, line: usize) -> usize {
        match &self.input_lines {
            None => line,
            Some(map) => match map.get(line) {
                Some(input) => *input,
                None => match map.last() {
                    Some(last) => last + 1 + (line - map.len()),
                    None => line,
                },
            },
        }
    }

    /// Convert a byte offset to a line/column position
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        let column = byte_offset - self.line_starts[line];

        Position::new(self.input_line(line), column)
    }

    /// Convert a byte range to a location
    pub fn byte_range_to_range(&self, range: &ByteRange<usize>) -> Range {
        Range::new(
            range.clone(),
            self.byte_to_position(range.start),
            self.byte_to_position(range.end),
        )
    }
}
