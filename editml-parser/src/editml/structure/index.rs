//! Document-scoped tag index
//!
//! Built in one pass over a node list before anything is rendered. Building is
//! also validation: the two document-level conflicts are detected here and abort
//! the build.

use crate::editml::ast::{Node, Operation, StructuralError, StructuralSource, StructuralTarget};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Sources and targets of one node list, keyed by tag.
#[derive(Debug, Default)]
pub struct StructuralIndex<'a> {
    sources: HashMap<&'a str, &'a StructuralSource>,
    targets: HashMap<&'a str, Vec<&'a StructuralTarget>>,
    move_targets: HashMap<&'a str, usize>,
}

impl<'a> StructuralIndex<'a> {
    /// Index the structural nodes of `nodes`.
    ///
    /// Fails on the first source whose tag is already taken (whatever its
    /// operation), or on the second move target of a tag.
    pub fn build(nodes: &'a [Node]) -> Result<Self, StructuralError> {
        let mut index = StructuralIndex::default();

        for node in nodes {
            match node {
                Node::StructuralSource(source) => index.add_source(source)?,
                Node::StructuralTarget(target) => index.add_target(target)?,
                Node::Text(_) | Node::InlineEdit(_) => {}
            }
        }

        debug!(
            sources = index.sources.len(),
            target_tags = index.targets.len(),
            "built structural index"
        );
        Ok(index)
    }

    fn add_source(&mut self, source: &'a StructuralSource) -> Result<(), StructuralError> {
        if self.sources.contains_key(source.tag.as_str()) {
            return Err(StructuralError::DuplicateSourceTag {
                tag: source.tag.clone(),
                range: source.range.clone(),
            });
        }
        trace!(tag = %source.tag, operation = %source.operation, "indexed source");
        self.sources.insert(&source.tag, source);
        Ok(())
    }

    fn add_target(&mut self, target: &'a StructuralTarget) -> Result<(), StructuralError> {
        if target.operation == Operation::Move {
            let count = self.move_targets.entry(&target.tag).or_insert(0);
            *count += 1;
            if *count > 1 {
                return Err(StructuralError::MultipleMoveTargets {
                    tag: target.tag.clone(),
                    range: target.range.clone(),
                });
            }
        }
        trace!(tag = %target.tag, operation = %target.operation, "indexed target");
        self.targets.entry(&target.tag).or_default().push(target);
        Ok(())
    }

    pub fn source(&self, tag: &str) -> Option<&'a StructuralSource> {
        self.sources.get(tag).copied()
    }

    /// All targets of `tag`, in document order.
    pub fn targets(&self, tag: &str) -> &[&'a StructuralTarget] {
        self.targets.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of targets of `tag` with the given operation.
    pub fn target_count(&self, tag: &str, operation: Operation) -> usize {
        self.targets(tag)
            .iter()
            .filter(|target| target.operation == operation)
            .count()
    }

    /// A move source is consumed when its tag has exactly one move target.
    /// Its content is then emitted at the target instead of in place.
    pub fn is_consumed(&self, source: &StructuralSource) -> bool {
        source.operation == Operation::Move
            && self.move_targets.get(source.tag.as_str()).copied() == Some(1)
    }
}
