//! Output format implementations for node lists
//!
//! This module contains the formats a parsed document can be dumped to:
//! - markup: the Markup View, every node in its literal form
//! - ast-treeviz: one line per node, for scanning by eye
//! - ast-json: the serialized node list
//!
//! The Clean View is not a format here: it resolves structure and can fail, see
//! [render_clean_view](crate::editml::api::render_clean_view).

pub mod json;
pub mod registry;
pub mod treeviz;

pub use json::{to_json_string, JsonFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, to_treeviz_str_with, TreevizFormatter, TreevizOptions};

use crate::editml::api::render_markup_view;
use crate::editml::ast::Node;

/// Formatter for the Markup View
pub struct MarkupFormatter;

impl Formatter for MarkupFormatter {
    fn name(&self) -> &str {
        "markup"
    }

    fn serialize(&self, nodes: &[Node]) -> Result<String, FormatError> {
        Ok(render_markup_view(nodes))
    }

    fn description(&self) -> &str {
        "Every node re-emitted exactly as written"
    }
}
