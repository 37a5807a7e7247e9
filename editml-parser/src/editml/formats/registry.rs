//! Format registry for node list serialization
//!
//! Each format implements the `Formatter` trait and can be registered with
//! `FormatRegistry`.

use crate::editml::ast::Node;
use std::collections::HashMap;
use thiserror::Error;

/// Error that can occur during formatting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Trait for node list formatters
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "ast-treeviz")
    fn name(&self) -> &str;

    fn serialize(&self, nodes: &[Node]) -> Result<String, FormatError>;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }
}

/// Registry of node list formatters, looked up by name.
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any with the same name.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Serialize `nodes` using the named format
    pub fn serialize(&self, nodes: &[Node], format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(nodes)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registry with the built-in formats; treeviz uses its default options.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::MarkupFormatter);
        registry.register(super::TreevizFormatter::default());
        registry.register(super::JsonFormatter);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestFormatter;
    impl Formatter for TestFormatter {
        fn name(&self) -> &str {
            "test"
        }
        fn serialize(&self, _nodes: &[Node]) -> Result<String, FormatError> {
            Ok("test output".to_string())
        }
    }

    #[test]
    fn test_registry_register_and_serialize() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        assert!(registry.has("test"));
        assert_eq!(registry.get("test").map(|f| f.description()), Some(""));
        assert_eq!(registry.serialize(&[], "test").unwrap(), "test output");
    }

    #[test]
    fn test_registry_serialize_not_found() {
        let registry = FormatRegistry::new();
        match registry.serialize(&[], "nonexistent") {
            Err(FormatError::FormatNotFound(name)) => assert_eq!(name, "nonexistent"),
            other => panic!("Expected FormatNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_formats() {
        let registry = FormatRegistry::default();
        assert_eq!(
            registry.list_formats(),
            vec!["ast-json", "ast-treeviz", "markup"]
        );
    }

    #[test]
    fn test_markup_format() {
        let registry = FormatRegistry::default();
        let nodes = vec![
            Node::text("a "),
            crate::editml::ast::InlineEdit::new(crate::editml::ast::InlineKind::Deletion, "b")
                .into(),
        ];
        assert_eq!(registry.serialize(&nodes, "markup").unwrap(), "a {-b-}");
    }
}
