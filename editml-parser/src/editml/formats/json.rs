//! JSON dump of a node list
//!
//! Nodes serialize with a `type` tag (`text`, `inline_edit`, `structural_source`,
//! `structural_target`) next to their fields, ranges included.

use super::registry::{FormatError, Formatter};
use crate::editml::ast::Node;

/// Pretty-printed JSON array of the nodes.
pub fn to_json_string(nodes: &[Node]) -> Result<String, FormatError> {
    serde_json::to_string_pretty(nodes).map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "ast-json"
    }

    fn serialize(&self, nodes: &[Node]) -> Result<String, FormatError> {
        to_json_string(nodes)
    }

    fn description(&self) -> &str {
        "Node list as pretty-printed JSON"
    }
}
