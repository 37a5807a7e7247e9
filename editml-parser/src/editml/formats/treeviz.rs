//! Treeviz formatter for node lists
//!
//! One line per node under a document root, so a parsed document can be scanned
//! at a glance:
//!
//!     <linum> <connector> <icon> <label>
//!
//! Labels are truncated to a configurable number of characters, with line breaks
//! shown as `↵`. Line numbers are the 1-based input line each node starts on.
//!
//! Icons
//!     Document: ⧉
//!     Text: ◦
//!     Addition: ⊕
//!     Deletion: ⊖
//!     Comment: ✎
//!     Highlight: ☆
//!     StructuralSource: ⇱
//!     StructuralTarget: ⇲

use super::registry::{FormatError, Formatter};
use crate::editml::ast::{InlineKind, Node};

/// Rendering knobs for treeviz output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreevizOptions {
    pub show_line_numbers: bool,
    /// Characters of each label kept before truncation.
    pub preview_chars: usize,
}

impl Default for TreevizOptions {
    fn default() -> Self {
        Self {
            show_line_numbers: false,
            preview_chars: 30,
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    let flat = s.replace("\r\n", "↵").replace('\n', "↵");
    if flat.chars().count() > max_chars {
        let mut truncated = flat.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        flat
    }
}

fn get_icon(node: &Node) -> &'static str {
    match node {
        Node::Text(_) => "◦",
        Node::InlineEdit(edit) => match edit.kind {
            InlineKind::Addition => "⊕",
            InlineKind::Deletion => "⊖",
            InlineKind::Comment => "✎",
            InlineKind::Highlight => "☆",
        },
        Node::StructuralSource(_) => "⇱",
        Node::StructuralTarget(_) => "⇲",
    }
}

fn label(node: &Node, max_chars: usize) -> String {
    match node {
        Node::Text(text) => truncate(&text.text, max_chars),
        Node::InlineEdit(edit) => {
            let content = truncate(&edit.content, max_chars);
            match &edit.editor_id {
                Some(id) => format!("{} [{}]", content, id),
                None => content,
            }
        }
        Node::StructuralSource(source) => format!(
            "{}~{}: {}",
            source.operation,
            source.tag,
            truncate(&source.block_content, max_chars)
        ),
        Node::StructuralTarget(target) => format!("{}:{}", target.operation, target.tag),
    }
}

pub fn to_treeviz_str(nodes: &[Node]) -> String {
    to_treeviz_str_with(nodes, &TreevizOptions::default())
}

pub fn to_treeviz_str_with(nodes: &[Node], options: &TreevizOptions) -> String {
    let plural = if nodes.len() == 1 { "" } else { "s" };
    let mut output = format!("⧉ Document ({} node{})\n", nodes.len(), plural);

    for (i, node) in nodes.iter().enumerate() {
        let connector = if i == nodes.len() - 1 { "└─" } else { "├─" };
        let linum_prefix = if options.show_line_numbers {
            format!("{:02} ", node.range().start.line + 1)
        } else {
            String::new()
        };
        output.push_str(&format!(
            "{}{} {} {}\n",
            linum_prefix,
            connector,
            get_icon(node),
            label(node, options.preview_chars)
        ));
    }

    output
}

/// Formatter implementation for treeviz format
#[derive(Debug, Clone, Default)]
pub struct TreevizFormatter {
    pub options: TreevizOptions,
}

impl TreevizFormatter {
    pub fn new(options: TreevizOptions) -> Self {
        Self { options }
    }
}

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "ast-treeviz"
    }

    fn serialize(&self, nodes: &[Node]) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with(nodes, &self.options))
    }

    fn description(&self) -> &str {
        "One line per node with Unicode icons"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editml::api::parse;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer label", 4), "a lo...");
        assert_eq!(truncate("two\nlines", 20), "two↵lines");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(to_treeviz_str(&[]), "⧉ Document (0 nodes)\n");
    }

    #[test]
    fn test_line_numbers() {
        let (nodes, _) = parse("one\n{+two+}");
        let options = TreevizOptions {
            show_line_numbers: true,
            ..TreevizOptions::default()
        };
        let output = to_treeviz_str_with(&nodes, &options);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[1], "01 ├─ ◦ one↵");
        assert_eq!(lines[2], "02 └─ ⊕ two");
    }
}
