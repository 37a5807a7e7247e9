//! Fluent assertion API for parsed node lists
//!
//!     Tests that index into node vectors and match on variants by hand are verbose and
//!     break whenever a node gains a field. These assertions name what is being checked
//!     instead, and their panic messages carry the path to the failing node.
//!
//! Usage Example
//!
//!     ```rust,ignore
//!     use editml_parser::editml::testing::assert_nodes;
//!
//!     let (nodes, _) = editml_parser::parse("Hi {+there+ws}{move:T}");
//!     assert_nodes(&nodes)
//!         .item_count(3)
//!         .item(0, |node| node.assert_text().text("Hi "))
//!         .item(1, |node| node.assert_addition().content("there").editor("ws"))
//!         .item(2, |node| node.assert_target().operation(Operation::Move).tag("T"));
//!     ```

use crate::editml::ast::{
    InlineEdit, InlineKind, Issue, IssueCode, Node, Operation, StructuralSource, StructuralTarget,
    TextNode,
};

// ============================================================================
// Entry Points
// ============================================================================

/// Create an assertion builder for a node list
pub fn assert_nodes(nodes: &[Node]) -> NodesAssertion<'_> {
    NodesAssertion { nodes }
}

/// Create an assertion builder for a list of issues
pub fn assert_issues(issues: &[Issue]) -> IssuesAssertion<'_> {
    IssuesAssertion { issues }
}

fn summarize(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(Node::node_type)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Node List Assertions
// ============================================================================

pub struct NodesAssertion<'a> {
    nodes: &'a [Node],
}

impl<'a> NodesAssertion<'a> {
    pub fn item_count(self, expected: usize) -> Self {
        assert_eq!(
            self.nodes.len(),
            expected,
            "Expected {} nodes, found {}: [{}]",
            expected,
            self.nodes.len(),
            summarize(self.nodes)
        );
        self
    }

    pub fn item<F, R>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        assert!(
            index < self.nodes.len(),
            "Item index {} out of bounds (list has {} nodes: [{}])",
            index,
            self.nodes.len(),
            summarize(self.nodes)
        );
        assertion(NodeAssertion {
            node: &self.nodes[index],
            context: format!("nodes[{}]", index),
        });
        self
    }

    /// Assert the node types in order, e.g. `["Text", "InlineEdit"]`.
    pub fn types(self, expected: &[&str]) -> Self {
        let actual: Vec<_> = self.nodes.iter().map(Node::node_type).collect();
        assert_eq!(actual, expected, "Unexpected node types");
        self
    }

    /// Assert the concatenated literal forms of all nodes.
    pub fn markup(self, expected: &str) -> Self {
        let actual: String = self.nodes.iter().map(Node::to_markup).collect();
        assert_eq!(actual, expected, "Markup view differs");
        self
    }
}

// ============================================================================
// Single Node Assertions
// ============================================================================

pub struct NodeAssertion<'a> {
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn assert_text(self) -> TextAssertion<'a> {
        match self.node {
            Node::Text(text) => TextAssertion {
                text,
                context: self.context,
            },
            _ => panic!("{}: Expected Text, found {}", self.context, self.node.node_type()),
        }
    }

    pub fn assert_inline(self, kind: InlineKind) -> InlineEditAssertion<'a> {
        match self.node {
            Node::InlineEdit(edit) if edit.kind == kind => InlineEditAssertion {
                edit,
                context: self.context,
            },
            Node::InlineEdit(edit) => panic!(
                "{}: Expected {} edit, found {} edit",
                self.context, kind, edit.kind
            ),
            _ => panic!(
                "{}: Expected InlineEdit, found {}",
                self.context,
                self.node.node_type()
            ),
        }
    }

    pub fn assert_addition(self) -> InlineEditAssertion<'a> {
        self.assert_inline(InlineKind::Addition)
    }

    pub fn assert_deletion(self) -> InlineEditAssertion<'a> {
        self.assert_inline(InlineKind::Deletion)
    }

    pub fn assert_comment(self) -> InlineEditAssertion<'a> {
        self.assert_inline(InlineKind::Comment)
    }

    pub fn assert_highlight(self) -> InlineEditAssertion<'a> {
        self.assert_inline(InlineKind::Highlight)
    }

    pub fn assert_source(self) -> SourceAssertion<'a> {
        match self.node {
            Node::StructuralSource(source) => SourceAssertion {
                source,
                context: self.context,
            },
            _ => panic!(
                "{}: Expected StructuralSource, found {}",
                self.context,
                self.node.node_type()
            ),
        }
    }

    pub fn assert_target(self) -> TargetAssertion<'a> {
        match self.node {
            Node::StructuralTarget(target) => TargetAssertion {
                target,
                context: self.context,
            },
            _ => panic!(
                "{}: Expected StructuralTarget, found {}",
                self.context,
                self.node.node_type()
            ),
        }
    }
}

pub struct TextAssertion<'a> {
    text: &'a TextNode,
    context: String,
}

impl TextAssertion<'_> {
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.text.text, expected,
            "{}: Expected text '{}', found '{}'",
            self.context, expected, self.text.text
        );
        self
    }

    pub fn text_contains(self, needle: &str) -> Self {
        assert!(
            self.text.text.contains(needle),
            "{}: Expected text to contain '{}', found '{}'",
            self.context,
            needle,
            self.text.text
        );
        self
    }
}

pub struct InlineEditAssertion<'a> {
    edit: &'a InlineEdit,
    context: String,
}

impl InlineEditAssertion<'_> {
    /// Decoded content.
    pub fn content(self, expected: &str) -> Self {
        assert_eq!(
            self.edit.content, expected,
            "{}: Expected content '{}', found '{}'",
            self.context, expected, self.edit.content
        );
        self
    }

    pub fn raw_content(self, expected: &str) -> Self {
        assert_eq!(
            self.edit.raw_content, expected,
            "{}: Expected raw content '{}', found '{}'",
            self.context, expected, self.edit.raw_content
        );
        self
    }

    pub fn editor(self, expected: &str) -> Self {
        assert_eq!(
            self.edit.editor_id.as_deref(),
            Some(expected),
            "{}: Expected editor '{}', found {:?}",
            self.context,
            expected,
            self.edit.editor_id
        );
        self
    }

    pub fn no_editor(self) -> Self {
        assert!(
            self.edit.editor_id.is_none(),
            "{}: Expected no editor, found {:?}",
            self.context,
            self.edit.editor_id
        );
        self
    }

    /// 0-based start position.
    pub fn starts_at(self, line: usize, column: usize) -> Self {
        let start = self.edit.range.start;
        assert_eq!(
            (start.line, start.column),
            (line, column),
            "{}: Expected edit to start at {}:{}, found {}",
            self.context,
            line,
            column,
            start
        );
        self
    }
}

pub struct SourceAssertion<'a> {
    source: &'a StructuralSource,
    context: String,
}

impl SourceAssertion<'_> {
    pub fn operation(self, expected: Operation) -> Self {
        assert_eq!(
            self.source.operation, expected,
            "{}: Expected {} source, found {}",
            self.context, expected, self.source.operation
        );
        self
    }

    pub fn keyword(self, expected: &str) -> Self {
        assert_eq!(
            self.source.keyword, expected,
            "{}: Expected keyword '{}', found '{}'",
            self.context, expected, self.source.keyword
        );
        self
    }

    pub fn tag(self, expected: &str) -> Self {
        assert_eq!(
            self.source.tag, expected,
            "{}: Expected tag '{}', found '{}'",
            self.context, expected, self.source.tag
        );
        self
    }

    /// Decoded block content.
    pub fn block_content(self, expected: &str) -> Self {
        assert_eq!(
            self.source.block_content, expected,
            "{}: Expected block content '{}', found '{}'",
            self.context, expected, self.source.block_content
        );
        self
    }
}

pub struct TargetAssertion<'a> {
    target: &'a StructuralTarget,
    context: String,
}

impl TargetAssertion<'_> {
    pub fn operation(self, expected: Operation) -> Self {
        assert_eq!(
            self.target.operation, expected,
            "{}: Expected {} target, found {}",
            self.context, expected, self.target.operation
        );
        self
    }

    pub fn tag(self, expected: &str) -> Self {
        assert_eq!(
            self.target.tag, expected,
            "{}: Expected tag '{}', found '{}'",
            self.context, expected, self.target.tag
        );
        self
    }
}

// ============================================================================
// Issue Assertions
// ============================================================================

pub struct IssuesAssertion<'a> {
    issues: &'a [Issue],
}

impl IssuesAssertion<'_> {
    fn listing(&self) -> String {
        self.issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn none(self) -> Self {
        assert!(self.issues.is_empty(), "Expected no issues, found: {}", self.listing());
        self
    }

    pub fn count(self, expected: usize) -> Self {
        assert_eq!(
            self.issues.len(),
            expected,
            "Expected {} issues, found: {}",
            expected,
            self.listing()
        );
        self
    }

    pub fn has_code(self, code: IssueCode) -> Self {
        assert!(
            self.issues.iter().any(|issue| issue.code == code),
            "Expected an issue with code {}, found: {}",
            code,
            self.listing()
        );
        self
    }

    pub fn codes(self, expected: &[IssueCode]) -> Self {
        let actual: Vec<_> = self.issues.iter().map(|issue| issue.code).collect();
        assert_eq!(actual, expected, "Unexpected issue codes: {}", self.listing());
        self
    }
}
