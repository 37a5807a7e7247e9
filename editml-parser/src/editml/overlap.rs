//! Overlap resolver
//!
//!     Turns the per-kind candidates of the matching engine into one ordered,
//!     non-overlapping node sequence, with text runs filling the gaps.
//!
//!     1. Candidates are sorted by start offset; at equal starts the longer span
//!        comes first, so the outer construct wins.
//!     2. A cursor walks the sorted list. A candidate starting before the cursor
//!        collides with an accepted span and is discarded. Otherwise the gap up to
//!        its start becomes a text node, the candidate's node is emitted and the
//!        cursor moves to its end.
//!     3. Whatever follows the last accepted span becomes a trailing text node.
//!
//!     Discarding loses no characters: a discarded span lies inside, or straddles the
//!     end of, an accepted span whose content already holds those characters.
//!
//!     Discards are reported as warnings, except for candidates lying wholly inside an
//!     accepted structural source: those are part of the block content and come back
//!     when the structural resolver re-parses it.

use crate::editml::api::ParseOptions;
use crate::editml::ast::{Document, Issue, IssueCode, Node, SourceLocation, TextNode};
use crate::editml::matching::{Candidate, SpanKind};
use std::ops::Range as ByteRange;
use tracing::{debug, trace};

/// Merge candidates found in `text` into a node sequence.
///
/// Returns the nodes together with the warnings raised while merging.
pub fn merge(
    text: &str,
    mut candidates: Vec<Candidate>,
    location: &SourceLocation,
    options: &ParseOptions,
) -> (Document, Vec<Issue>) {
    candidates.sort_by(|a, b| {
        a.span
            .start
            .cmp(&b.span.start)
            .then(b.span.end.cmp(&a.span.end))
            .then(a.kind.cmp(&b.kind))
    });

    let mut nodes = Vec::new();
    let mut issues = Vec::new();
    let mut cursor = 0;
    let mut accepted: Option<(SpanKind, ByteRange<usize>)> = None;

    for candidate in candidates {
        if candidate.span.start < cursor {
            if let Some((outer_kind, outer_span)) = &accepted {
                if let Some(issue) = discard(&candidate, *outer_kind, outer_span, options) {
                    issues.push(issue);
                }
            }
            continue;
        }

        if candidate.span.start > cursor {
            nodes.push(text_node(text, cursor..candidate.span.start, location));
        }

        if options.report_unknown_escapes && !candidate.unknown_escapes.is_empty() {
            issues.push(unknown_escape_issue(&candidate));
        }

        cursor = candidate.span.end;
        accepted = Some((candidate.kind, candidate.span.clone()));
        nodes.push(candidate.node);
    }

    if cursor < text.len() {
        nodes.push(text_node(text, cursor..text.len(), location));
    }

    (nodes, issues)
}

fn text_node(text: &str, span: ByteRange<usize>, location: &SourceLocation) -> Node {
    Node::Text(TextNode {
        text: text[span.clone()].to_string(),
        range: location.byte_range_to_range(&span),
    })
}

fn discard(
    candidate: &Candidate,
    outer_kind: SpanKind,
    outer_span: &ByteRange<usize>,
    options: &ParseOptions,
) -> Option<Issue> {
    let contained = candidate.span.end <= outer_span.end;

    if contained && outer_kind.is_source() {
        trace!(
            kind = candidate.kind.name(),
            start = candidate.span.start,
            "span inside structural block left for re-parse"
        );
        return None;
    }

    debug!(
        kind = candidate.kind.name(),
        start = candidate.span.start,
        end = candidate.span.end,
        outer = outer_kind.name(),
        contained,
        "discarded colliding span"
    );

    if !options.report_discarded_spans {
        return None;
    }

    let start = candidate.node.range().start;
    let issue = if contained {
        Issue::warning(
            IssueCode::NestedMarkup,
            format!(
                "{} nested inside {} is kept as literal text",
                candidate.kind, outer_kind
            ),
        )
    } else {
        Issue::warning(
            IssueCode::OverlappingMarkup,
            format!(
                "{} overlaps the preceding {} and is ignored",
                candidate.kind, outer_kind
            ),
        )
    };
    Some(issue.at(start))
}

fn unknown_escape_issue(candidate: &Candidate) -> Issue {
    let sequences = candidate
        .unknown_escapes
        .iter()
        .map(|ch| format!("\\{}", ch))
        .collect::<Vec<_>>()
        .join(", ");
    Issue::warning(
        IssueCode::UnknownEscape,
        format!(
            "unrecognized escape sequence(s) {} kept verbatim in {}",
            sequences, candidate.kind
        ),
    )
    .at(candidate.node.range().start)
}
