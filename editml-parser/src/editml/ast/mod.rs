//! AST definitions for EditML documents
//!
//!     An EditML document is a flat, ordered sequence of nodes. There is no wrapper
//!     type: [Document] is an alias for `Vec<Node>`. Every byte of the scanned text is
//!     covered by exactly one node, either a literal [TextNode] run or one markup node,
//!     so concatenating the nodes' literal forms gives back the scanned input.
//!
//! Node kinds
//!
//!     - Text: a literal run not covered by any recognized markup.
//!     - InlineEdit: addition `{+..+}`, deletion `{-..-}`, comment `{>..<}` or
//!       highlight `{=..=}`, each with an optional editor id before the closing brace.
//!     - StructuralSource: `{move~..~TAG}` / `{copy~..~TAG}` (and their short keywords).
//!     - StructuralTarget: `{move:TAG}` / `{copy:TAG}`.
//!
//!     Structural block content is stored decoded but unparsed. The structural resolver
//!     re-parses it lazily; see [structure](crate::editml::structure).
//!
//! Locations
//!
//!     Every node carries a [Range] with its byte span and line/column positions,
//!     computed once by [SourceLocation] while scanning. Issues use these to report
//!     1-based line and column numbers.

pub mod diagnostics;
pub mod error;
pub mod nodes;
pub mod range;

pub use diagnostics::{has_errors, Issue, IssueCode, Severity};
pub use error::StructuralError;
pub use nodes::{
    Document, InlineEdit, InlineKind, Node, Operation, StructuralSource, StructuralTarget,
    TextNode,
};
pub use range::{Position, Range, SourceLocation};
