//! Rendering profiles
//!
//! Clean View: every edit resolved. Additions and highlights keep their content,
//! deletions and comments disappear, moves and copies are placed at their targets.
//! This is a thin layer over the [structural resolver](crate::editml::structure).
//!
//! Markup View: every node in its original literal form. For input without
//! overlapping or nested markup this reproduces the scanned text exactly.

use crate::editml::api::RenderOptions;
use crate::editml::ast::{Issue, Node, StructuralError};
use crate::editml::structure;
use tracing::debug;

/// A rendered document and the localized problems found while rendering it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rendered {
    pub text: String,
    pub issues: Vec<Issue>,
}

impl Rendered {
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(Issue::is_error)
    }
}

pub(crate) fn render_clean(
    nodes: &[Node],
    options: &RenderOptions,
) -> Result<Rendered, StructuralError> {
    let rendered = structure::resolve(nodes, options, 0).map_err(|err| {
        debug!(error = %err, "structural conflict, document not rendered");
        err
    })?;
    debug!(
        nodes = nodes.len(),
        issues = rendered.issues.len(),
        bytes = rendered.text.len(),
        "rendered clean view"
    );
    Ok(rendered)
}

pub(crate) fn render_markup(nodes: &[Node]) -> String {
    nodes.iter().map(Node::to_markup).collect()
}
