//! Public parsing and rendering API
//!
//! Callers should only need the functions in this module:
//!
//! ```text
//! text ─ strip comments ─ find_all ─ merge ─▶ (Document, issues)
//!                                                  │
//!                        render_clean_view ◀───────┘
//! ```
//!
//! Parsing never fails. Malformed markup degrades to text and problems are reported
//! as [`Issue`]s. Rendering fails only on a document-level structural conflict.
//!
//! Node byte spans index into the scanned text, which differs from the input only
//! when debug comments were stripped. Node lines are input lines, so parse and
//! render issues both point at what the author wrote.

use crate::editml::ast::{Document, Issue, Node, SourceLocation, StructuralError};
use crate::editml::comments::{strip_debug_comments, StrippedSource};
use crate::editml::matching::find_all;
use crate::editml::overlap::merge;
use crate::editml::rendering::{self, Rendered};
use tracing::debug;

/// Default limit for structural blocks nested inside structural blocks.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 8;

// ============================================================================
// OPTIONS
// ============================================================================

/// Knobs for [`parse_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Drop `%%` debug-comment lines before scanning.
    pub strip_debug_comments: bool,
    /// Warn when a colliding markup span is discarded.
    pub report_discarded_spans: bool,
    /// Warn about backslash pairs that are not escapes in their context.
    pub report_unknown_escapes: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strip_debug_comments: true,
            report_discarded_spans: true,
            report_unknown_escapes: true,
        }
    }
}

impl ParseOptions {
    /// Options used when re-parsing structural block content.
    pub fn for_block(&self) -> Self {
        Self {
            strip_debug_comments: false,
            ..*self
        }
    }
}

/// Knobs for [`render_clean_view_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Deepest allowed chain of structural blocks inside structural blocks.
    /// A top-level block is at depth 1.
    pub max_nesting_depth: usize,
    /// Applied to the content of every structural block.
    pub parse: ParseOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            parse: ParseOptions::default(),
        }
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// Parse EditML text with default options.
pub fn parse(text: &str) -> (Document, Vec<Issue>) {
    parse_with(text, &ParseOptions::default())
}

/// Parse EditML text into nodes and the issues found along the way.
pub fn parse_with(text: &str, options: &ParseOptions) -> (Document, Vec<Issue>) {
    let source = if options.strip_debug_comments {
        strip_debug_comments(text)
    } else {
        StrippedSource::unchanged(text)
    };
    if source.removed_lines() > 0 {
        debug!(removed = source.removed_lines(), "stripped debug comments");
    }

    scan(&source.text, &source.location(), options)
}

/// Parse structural block content. Debug comments are never stripped here.
pub(crate) fn parse_block(content: &str, options: &ParseOptions) -> (Document, Vec<Issue>) {
    scan(content, &SourceLocation::new(content), &options.for_block())
}

fn scan(text: &str, location: &SourceLocation, options: &ParseOptions) -> (Document, Vec<Issue>) {
    let candidates = find_all(text, location);
    debug!(candidates = candidates.len(), bytes = text.len(), "matched spans");
    merge(text, candidates, location, options)
}

// ============================================================================
// RENDERING
// ============================================================================

/// Render the Clean View with default options.
pub fn render_clean_view(nodes: &[Node]) -> Result<Rendered, StructuralError> {
    render_clean_view_with(nodes, &RenderOptions::default())
}

/// Resolve structural markup and render the Clean View.
///
/// Fails only with [`StructuralError::DuplicateSourceTag`] or
/// [`StructuralError::MultipleMoveTargets`]; everything else is embedded in the
/// output and reported in [`Rendered::issues`].
pub fn render_clean_view_with(
    nodes: &[Node],
    options: &RenderOptions,
) -> Result<Rendered, StructuralError> {
    rendering::render_clean(nodes, options)
}

/// Re-emit every node in its original literal form.
pub fn render_markup_view(nodes: &[Node]) -> String {
    rendering::render_markup(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editml::ast::{IssueCode, Position};

    #[test]
    fn basic_transform() {
        let (nodes, issues) = parse("Hello {+World+}! This is {-not seen-}.");
        assert!(issues.is_empty());
        let rendered = render_clean_view(&nodes).unwrap();
        assert_eq!(rendered.text, "Hello World! This is .");
    }

    #[test]
    fn comments_are_stripped_by_default() {
        let (nodes, _) = parse("%% draft note\nbody {+x+}\n");
        assert_eq!(render_markup_view(&nodes), "body {+x+}\n");
    }

    #[test]
    fn comments_can_be_kept() {
        let options = ParseOptions {
            strip_debug_comments: false,
            ..ParseOptions::default()
        };
        let (nodes, _) = parse_with("%% draft note\nbody\n", &options);
        assert_eq!(render_markup_view(&nodes), "%% draft note\nbody\n");
    }

    #[test]
    fn issue_lines_refer_to_input() {
        let (_, issues) = parse("%% one\n%% two\n{+a {-b-} c+}");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, IssueCode::NestedMarkup);
        assert_eq!(issues[0].line, Some(3));
    }

    #[test]
    fn node_lines_refer_to_input() {
        let (nodes, _) = parse("%% one\nfirst\n%% two\nsecond {move:T}\n");
        assert_eq!(nodes[1].range().start, Position::new(3, 7));
    }

    #[test]
    fn render_issue_lines_refer_to_input() {
        let (nodes, _) = parse("%% note one\n%% note two\nbody {move:ZZZ}\n");
        let rendered = render_clean_view(&nodes).unwrap();
        assert_eq!(rendered.issues.len(), 1);
        assert_eq!(rendered.issues[0].code, IssueCode::UnresolvedTarget);
        assert_eq!(rendered.issues[0].line, Some(3));
        assert_eq!(rendered.issues[0].column, Some(6));
    }

    #[test]
    fn conflict_lines_refer_to_input() {
        let (nodes, _) = parse("%% a\n{move~a~dup}\n%% b\n{move~b~dup}\n");
        let issue = render_clean_view(&nodes).unwrap_err().to_issue();
        assert_eq!(issue.code, IssueCode::DuplicateSourceTag);
        assert_eq!(issue.line, Some(4));
    }

    #[test]
    fn block_options_never_strip() {
        let options = ParseOptions::default().for_block();
        assert!(!options.strip_debug_comments);
        assert!(options.report_discarded_spans);
    }
}
