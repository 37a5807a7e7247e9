//! Clean View resolution of a node list
//!
//! Runs in three steps over one node list:
//!
//!     1. Build the [StructuralIndex]. A conflict aborts here.
//!     2. Render every structural block: re-parse its decoded content and resolve it
//!        recursively, one level deeper. A block that cannot be rendered becomes a
//!        failure marker instead; the document carries on.
//!     3. Walk the nodes left to right and emit their Clean View.
//!
//! Emission rules
//!
//!     text              copied
//!     addition          decoded content
//!     highlight         decoded content
//!     deletion/comment  nothing
//!     move source       nothing when consumed, else marker or literal
//!     copy source       rendered block when copy targets exist, else marker or literal
//!     target            literal when no source; mismatch marker when the operations
//!                       differ; else the rendered block (or its marker)

use super::index::StructuralIndex;
use crate::editml::api::{parse_block, RenderOptions};
use crate::editml::ast::{
    InlineKind, Issue, IssueCode, Node, Operation, StructuralError, StructuralSource,
    StructuralTarget,
};
use crate::editml::rendering::Rendered;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

const CONTENT_FAILED: &str = "(ERROR_TRANSFORMING_CONTENT)";
const NESTING_TOO_DEEP: &str = "(ERROR_NESTING_TOO_DEEP)";

/// Output of one structural block.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    Rendered(String),
    /// Failure marker standing in for the block wherever it would appear.
    Failed(String),
}

impl Block {
    fn output(&self) -> &str {
        match self {
            Block::Rendered(text) | Block::Failed(text) => text,
        }
    }

    fn is_failed(&self) -> bool {
        matches!(self, Block::Failed(_))
    }
}

/// Resolve `nodes`, which sit `depth` structural blocks deep (0 for a document).
pub(crate) fn resolve(
    nodes: &[Node],
    options: &RenderOptions,
    depth: usize,
) -> Result<Rendered, StructuralError> {
    let index = StructuralIndex::build(nodes)?;
    let mut issues = Vec::new();

    let mut blocks = HashMap::new();
    for node in nodes {
        if let Node::StructuralSource(source) = node {
            let block = render_block(source, options, depth + 1, &mut issues);
            blocks.insert(source.tag.as_str(), block);
        }
    }

    let mut resolver = Resolver {
        index: &index,
        blocks: &blocks,
        out: String::new(),
        issues,
    };
    for node in nodes {
        resolver.emit(node);
    }

    Ok(Rendered {
        text: resolver.out,
        issues: resolver.issues,
    })
}

fn render_block(
    source: &StructuralSource,
    options: &RenderOptions,
    depth: usize,
    issues: &mut Vec<Issue>,
) -> Block {
    if depth > options.max_nesting_depth {
        let err = StructuralError::NestingTooDeep {
            tag: source.tag.clone(),
            limit: options.max_nesting_depth,
            range: source.range.clone(),
        };
        warn!(tag = %source.tag, depth, "{}", err);
        issues.push(err.to_issue());
        return Block::Failed(failure_marker(source, NESTING_TOO_DEEP));
    }

    debug!(tag = %source.tag, depth, "rendering structural block");
    let (nodes, parse_issues) = parse_block(&source.block_content, &options.parse);
    issues.extend(parse_issues.into_iter().map(|issue| reanchor(issue, source)));

    let nested = nodes.iter().filter(|node| node.is_structural()).count();
    if nested > 0 {
        issues.push(
            Issue::warning(
                IssueCode::NestedStructure,
                format!(
                    "block {:?} contains {} nested structural marker(s)",
                    source.tag, nested
                ),
            )
            .at(source.range.start),
        );
    }

    match resolve(&nodes, options, depth) {
        Ok(rendered) => {
            issues.extend(rendered.issues.into_iter().map(|issue| reanchor(issue, source)));
            Block::Rendered(rendered.text)
        }
        Err(err) => {
            debug!(tag = %source.tag, error = %err, "structural block failed");
            issues.push(
                Issue::error(
                    IssueCode::BlockContentFailed,
                    format!("content of block {:?} could not be rendered: {}", source.tag, err),
                )
                .at(source.range.start),
            );
            Block::Failed(failure_marker(source, CONTENT_FAILED))
        }
    }
}

/// `{kw~raw MARKER~tag}`
fn failure_marker(source: &StructuralSource, marker: &str) -> String {
    format!(
        "{{{}~{} {}~{}}}",
        source.keyword, source.raw_content, marker, source.tag
    )
}

/// Point an issue raised inside a block at the block itself.
fn reanchor(issue: Issue, source: &StructuralSource) -> Issue {
    let message = format!("in block {:?}: {}", source.tag, issue.message);
    Issue { message, ..issue }.at(source.range.start)
}

struct Resolver<'r, 'a> {
    index: &'r StructuralIndex<'a>,
    blocks: &'r HashMap<&'a str, Block>,
    out: String,
    issues: Vec<Issue>,
}

impl Resolver<'_, '_> {
    fn emit(&mut self, node: &Node) {
        match node {
            Node::Text(text) => self.out.push_str(&text.text),
            Node::InlineEdit(edit) => match edit.kind {
                InlineKind::Addition | InlineKind::Highlight => self.out.push_str(&edit.content),
                InlineKind::Deletion | InlineKind::Comment => {}
            },
            Node::StructuralSource(source) => self.emit_source(source),
            Node::StructuralTarget(target) => self.emit_target(target),
        }
    }

    fn block_failed(&self, tag: &str) -> bool {
        self.blocks.get(tag).is_some_and(Block::is_failed)
    }

    fn emit_source(&mut self, source: &StructuralSource) {
        let placed = match source.operation {
            Operation::Move => self.index.is_consumed(source),
            Operation::Copy => self.index.target_count(&source.tag, Operation::Copy) > 0,
        };
        trace!(tag = %source.tag, operation = %source.operation, placed, "source");

        match (source.operation, placed) {
            // The single move target emits the block.
            (Operation::Move, true) => {}
            (Operation::Copy, true) => self.push_block(&source.tag),
            (_, false) if self.block_failed(&source.tag) => self.push_block(&source.tag),
            (_, false) => {
                self.issues.push(
                    Issue::warning(
                        IssueCode::UnresolvedSource,
                        format!(
                            "no {} target for source tag {:?}; kept as written",
                            source.operation, source.tag
                        ),
                    )
                    .at(source.range.start),
                );
                self.out.push_str(&source.to_markup());
            }
        }
    }

    fn emit_target(&mut self, target: &StructuralTarget) {
        let Some(source) = self.index.source(&target.tag) else {
            self.issues.push(
                Issue::warning(
                    IssueCode::UnresolvedTarget,
                    format!("no source for target tag {:?}; kept as written", target.tag),
                )
                .at(target.range.start),
            );
            self.out.push_str(&target.to_markup());
            return;
        };

        if source.operation != target.operation {
            self.issues.push(
                Issue::warning(
                    IssueCode::OperationMismatch,
                    format!(
                        "{} target for tag {:?} refers to a {} source",
                        target.operation, target.tag, source.operation
                    ),
                )
                .at(target.range.start),
            );
            self.out.push_str(&format!(
                "{{{}:{} (ERROR_OPERATION_MISMATCH_WITH_SOURCE {})}}",
                target.keyword, target.tag, source.operation
            ));
            return;
        }

        match target.operation {
            Operation::Move if !self.index.is_consumed(source) => {
                self.out.push_str(&target.to_markup());
            }
            Operation::Move | Operation::Copy => self.push_block(&target.tag),
        }
    }

    fn push_block(&mut self, tag: &str) {
        if let Some(block) = self.blocks.get(tag) {
            self.out.push_str(block.output());
        }
    }
}
