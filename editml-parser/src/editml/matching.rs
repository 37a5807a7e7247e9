//! Matching engine
//!
//!     Eight span kinds are searched independently over the whole text, each with its
//!     own delimiter pattern. Content groups are non-greedy and may span lines: a span
//!     ends at the first unescaped closing delimiter of its own kind. Candidates from
//!     different kinds may overlap; deciding between them is the job of the
//!     [overlap](crate::editml::overlap) resolver.
//!
//! Span Patterns
//!
//!     addition       {+ content + [id] }
//!     deletion       {- content - [id] }
//!     comment        {> content < [id] }
//!     highlight      {= content = [id] }
//!     move source    {move|mv|m ~ content ~ TAG }
//!     move target    {move|mv|m : TAG }
//!     copy source    {copy|cp|c ~ content ~ TAG }
//!     copy target    {copy|cp|c : TAG }
//!
//!     Editor ids and tags are `[A-Za-z0-9]+`. Editor ids are meant to be at most five
//!     characters, but longer ones are accepted. No whitespace is allowed anywhere in
//!     the delimiters.
//!
//! Escapes
//!
//!     Content is matched as a sequence of escape pairs (`\` plus any character) and
//!     plain characters, so an escaped closing operator can never end a span. An opening
//!     brace preceded by an odd number of backslashes is escaped and does not start a
//!     span; the search resumes one byte later.

use crate::editml::ast::{
    InlineEdit, InlineKind, Node, Operation, SourceLocation, StructuralSource, StructuralTarget,
};
use crate::editml::escapes::{decode, decode_reporting, EscapeContext};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt;
use std::ops::Range as ByteRange;
use tracing::trace;

/// The eight independently searched span kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpanKind {
    Addition,
    Deletion,
    Comment,
    Highlight,
    MoveSource,
    MoveTarget,
    CopySource,
    CopyTarget,
}

impl SpanKind {
    pub fn name(self) -> &'static str {
        match self {
            SpanKind::Addition => "addition",
            SpanKind::Deletion => "deletion",
            SpanKind::Comment => "comment",
            SpanKind::Highlight => "highlight",
            SpanKind::MoveSource => "move source",
            SpanKind::MoveTarget => "move target",
            SpanKind::CopySource => "copy source",
            SpanKind::CopyTarget => "copy target",
        }
    }

    /// The node a span of this kind becomes.
    pub fn shape(self) -> SpanShape {
        match self {
            SpanKind::Addition => SpanShape::Inline(InlineKind::Addition),
            SpanKind::Deletion => SpanShape::Inline(InlineKind::Deletion),
            SpanKind::Comment => SpanShape::Inline(InlineKind::Comment),
            SpanKind::Highlight => SpanShape::Inline(InlineKind::Highlight),
            SpanKind::MoveSource => SpanShape::Source(Operation::Move),
            SpanKind::MoveTarget => SpanShape::Target(Operation::Move),
            SpanKind::CopySource => SpanShape::Source(Operation::Copy),
            SpanKind::CopyTarget => SpanShape::Target(Operation::Copy),
        }
    }

    pub fn is_source(self) -> bool {
        matches!(self.shape(), SpanShape::Source(_))
    }
}

/// Node variant and payload for a [`SpanKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanShape {
    Inline(InlineKind),
    Source(Operation),
    Target(Operation),
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Span patterns, one per kind.
///
/// Inline kinds capture (content, editor id); sources capture (keyword, content, tag);
/// targets capture (keyword, tag).
const SPAN_PATTERNS: &[(SpanKind, &str)] = &[
    (
        SpanKind::Addition,
        r"(?s)\{\+((?:\\.|[^\\])*?)\+([A-Za-z0-9]+)?\}",
    ),
    (
        SpanKind::Deletion,
        r"(?s)\{-((?:\\.|[^\\])*?)-([A-Za-z0-9]+)?\}",
    ),
    (
        SpanKind::Comment,
        r"(?s)\{>((?:\\.|[^\\])*?)<([A-Za-z0-9]+)?\}",
    ),
    (
        SpanKind::Highlight,
        r"(?s)\{=((?:\\.|[^\\])*?)=([A-Za-z0-9]+)?\}",
    ),
    (
        SpanKind::MoveSource,
        r"(?s)\{(move|mv|m)~((?:\\.|[^\\])*?)~([A-Za-z0-9]+)\}",
    ),
    (SpanKind::MoveTarget, r"\{(move|mv|m):([A-Za-z0-9]+)\}"),
    (
        SpanKind::CopySource,
        r"(?s)\{(copy|cp|c)~((?:\\.|[^\\])*?)~([A-Za-z0-9]+)\}",
    ),
    (SpanKind::CopyTarget, r"\{(copy|cp|c):([A-Za-z0-9]+)\}"),
];

static SPAN_REGEXES: Lazy<Vec<(SpanKind, Regex)>> = Lazy::new(|| {
    SPAN_PATTERNS
        .iter()
        .map(|(kind, pattern)| (*kind, Regex::new(pattern).unwrap()))
        .collect()
});

/// One matched span, not yet checked against the other kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: SpanKind,
    pub span: ByteRange<usize>,
    pub node: Node,
    /// Characters after a backslash that did not form a known escape.
    pub unknown_escapes: Vec<char>,
}

/// Find every candidate span of every kind in `text`.
///
/// Results are grouped by kind, in text order within each kind.
pub fn find_all(text: &str, location: &SourceLocation) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for (kind, regex) in SPAN_REGEXES.iter() {
        let before = candidates.len();
        search(*kind, regex, text, location, &mut candidates);
        trace!(
            kind = kind.name(),
            found = candidates.len() - before,
            "searched span kind"
        );
    }
    candidates
}

fn search(
    kind: SpanKind,
    regex: &Regex,
    text: &str,
    location: &SourceLocation,
    out: &mut Vec<Candidate>,
) {
    let mut at = 0;
    while let Some(caps) = regex.captures_at(text, at) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        if is_escaped(text, whole.start()) {
            at = whole.start() + 1;
            continue;
        }
        out.push(build_candidate(kind, &caps, whole.range(), location));
        at = whole.end();
    }
}

/// True when the byte at `pos` is preceded by an odd run of backslashes.
pub fn is_escaped(text: &str, pos: usize) -> bool {
    let run = text.as_bytes()[..pos]
        .iter()
        .rev()
        .take_while(|b| **b == b'\\')
        .count();
    run % 2 == 1
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}

fn build_candidate(
    kind: SpanKind,
    caps: &Captures<'_>,
    span: ByteRange<usize>,
    location: &SourceLocation,
) -> Candidate {
    let range = location.byte_range_to_range(&span);

    let (node, unknown_escapes) = match kind.shape() {
        SpanShape::Inline(inline) => {
            let raw = group(caps, 1);
            let decoded = decode_reporting(raw, EscapeContext::Inline(inline));
            let edit = InlineEdit {
                kind: inline,
                content: decoded.text,
                raw_content: raw.to_string(),
                editor_id: caps.get(2).map(|m| m.as_str().to_string()),
                range,
            };
            (Node::InlineEdit(edit), decoded.unknown)
        }
        SpanShape::Source(operation) => {
            let raw = group(caps, 2);
            // Inline escapes inside a block are only meaningful once the block is
            // re-parsed, so unknown pairs are reported from there instead.
            let source = StructuralSource {
                operation,
                keyword: group(caps, 1).to_string(),
                tag: group(caps, 3).to_string(),
                block_content: decode(raw, EscapeContext::Block),
                raw_content: raw.to_string(),
                range,
            };
            (Node::StructuralSource(source), Vec::new())
        }
        SpanShape::Target(operation) => {
            let target = StructuralTarget {
                operation,
                keyword: group(caps, 1).to_string(),
                tag: group(caps, 2).to_string(),
                range,
            };
            (Node::StructuralTarget(target), Vec::new())
        }
    };
    Candidate {
        kind,
        span,
        node,
        unknown_escapes,
    }
}
