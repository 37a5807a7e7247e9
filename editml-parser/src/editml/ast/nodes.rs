//! Node types produced by the matching and overlap stages.
//!
//! Nodes are immutable once built. Each markup node keeps both its decoded fields
//! (what the renderers consume) and the text exactly as authored (what
//! [`Node::to_markup`] re-emits), so the original literal form of any node can be
//! reproduced without the source text at hand.

use super::range::Range;
use serde::Serialize;
use std::fmt;

/// Ordered sequence of nodes making up a document.
pub type Document = Vec<Node>;

/// The four inline edit kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineKind {
    Addition,
    Deletion,
    Comment,
    Highlight,
}

impl InlineKind {
    /// Operator following the opening brace.
    pub fn opener(self) -> char {
        match self {
            InlineKind::Addition => '+',
            InlineKind::Deletion => '-',
            InlineKind::Comment => '>',
            InlineKind::Highlight => '=',
        }
    }

    /// Operator closing the content, before the optional editor id.
    pub fn closer(self) -> char {
        match self {
            InlineKind::Addition => '+',
            InlineKind::Deletion => '-',
            InlineKind::Comment => '<',
            InlineKind::Highlight => '=',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InlineKind::Addition => "addition",
            InlineKind::Deletion => "deletion",
            InlineKind::Comment => "comment",
            InlineKind::Highlight => "highlight",
        }
    }
}

impl fmt::Display for InlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structural operation shared by sources and targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Move,
    Copy,
}

impl Operation {
    /// Canonical keyword; `mv`/`m` and `cp`/`c` are accepted as shorthands.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Move => "move",
            Operation::Copy => "copy",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Literal run of text not covered by any markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextNode {
    pub text: String,
    pub range: Range,
}

/// One matched inline span. `content` has its escapes resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineEdit {
    pub kind: InlineKind,
    pub content: String,
    /// Content exactly as captured, escapes intact.
    pub raw_content: String,
    pub editor_id: Option<String>,
    pub range: Range,
}

impl InlineEdit {
    /// Build an edit whose raw and decoded content coincide.
    pub fn new(kind: InlineKind, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            kind,
            raw_content: content.clone(),
            content,
            editor_id: None,
            range: Range::default(),
        }
    }

    pub fn with_editor(mut self, editor_id: impl Into<String>) -> Self {
        self.editor_id = Some(editor_id.into());
        self
    }

    pub fn to_markup(&self) -> String {
        format!(
            "{{{}{}{}{}}}",
            self.kind.opener(),
            self.raw_content,
            self.kind.closer(),
            self.editor_id.as_deref().unwrap_or("")
        )
    }
}

/// A `{move~..~TAG}` / `{copy~..~TAG}` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralSource {
    pub operation: Operation,
    /// Keyword as written (`move`, `mv`, `m`, `copy`, `cp`, `c`).
    pub keyword: String,
    pub tag: String,
    /// Decoded block text; re-parsed by the structural resolver.
    pub block_content: String,
    /// Block text exactly as captured.
    pub raw_content: String,
    pub range: Range,
}

impl StructuralSource {
    pub fn new(operation: Operation, tag: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            operation,
            keyword: operation.name().to_string(),
            tag: tag.into(),
            raw_content: content.clone(),
            block_content: content,
            range: Range::default(),
        }
    }

    pub fn to_markup(&self) -> String {
        format!("{{{}~{}~{}}}", self.keyword, self.raw_content, self.tag)
    }
}

/// A `{move:TAG}` / `{copy:TAG}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralTarget {
    pub operation: Operation,
    pub keyword: String,
    pub tag: String,
    pub range: Range,
}

impl StructuralTarget {
    pub fn new(operation: Operation, tag: impl Into<String>) -> Self {
        Self {
            operation,
            keyword: operation.name().to_string(),
            tag: tag.into(),
            range: Range::default(),
        }
    }

    pub fn to_markup(&self) -> String {
        format!("{{{}:{}}}", self.keyword, self.tag)
    }
}

/// Node variants of an EditML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Text(TextNode),
    InlineEdit(InlineEdit),
    StructuralSource(StructuralSource),
    StructuralTarget(StructuralTarget),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextNode {
            text: text.into(),
            range: Range::default(),
        })
    }

    pub fn range(&self) -> &Range {
        match self {
            Node::Text(n) => &n.range,
            Node::InlineEdit(n) => &n.range,
            Node::StructuralSource(n) => &n.range,
            Node::StructuralTarget(n) => &n.range,
        }
    }

    pub fn node_type(&self) -> &'static str {
        match self {
            Node::Text(_) => "Text",
            Node::InlineEdit(_) => "InlineEdit",
            Node::StructuralSource(_) => "StructuralSource",
            Node::StructuralTarget(_) => "StructuralTarget",
        }
    }

    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Node::StructuralSource(_) | Node::StructuralTarget(_)
        )
    }

    /// The node's original literal form.
    pub fn to_markup(&self) -> String {
        match self {
            Node::Text(n) => n.text.clone(),
            Node::InlineEdit(n) => n.to_markup(),
            Node::StructuralSource(n) => n.to_markup(),
            Node::StructuralTarget(n) => n.to_markup(),
        }
    }
}

impl From<InlineEdit> for Node {
    fn from(edit: InlineEdit) -> Self {
        Node::InlineEdit(edit)
    }
}

impl From<StructuralSource> for Node {
    fn from(source: StructuralSource) -> Self {
        Node::StructuralSource(source)
    }
}

impl From<StructuralTarget> for Node {
    fn from(target: StructuralTarget) -> Self {
        Node::StructuralTarget(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_markup_uses_raw_content_and_editor() {
        let mut edit = InlineEdit::new(InlineKind::Comment, "why?").with_editor("ws");
        edit.raw_content = "why\\<?".to_string();
        assert_eq!(edit.to_markup(), "{>why\\<?<ws}");
    }

    #[test]
    fn structural_markup_keeps_keyword_as_written() {
        let mut source = StructuralSource::new(Operation::Move, "T1", "block");
        source.keyword = "mv".to_string();
        assert_eq!(source.to_markup(), "{mv~block~T1}");

        let target = StructuralTarget::new(Operation::Copy, "T2");
        assert_eq!(target.to_markup(), "{copy:T2}");
    }

    #[test]
    fn serializes_with_type_tag() {
        let node = Node::from(InlineEdit::new(InlineKind::Addition, "x"));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "inline_edit");
        assert_eq!(json["kind"], "addition");
        assert_eq!(json["content"], "x");
    }
}
