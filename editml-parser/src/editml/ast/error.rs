//! Error types for structural resolution

use super::diagnostics::{Issue, IssueCode};
use super::range::Range;
use thiserror::Error;

/// Conditions that stop structural resolution of a document (or of one block).
///
/// `DuplicateSourceTag` and `MultipleMoveTargets` abort the whole document.
/// `NestingTooDeep` only ever fails the block being resolved; it is embedded as
/// an error marker in the output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("structural conflict: duplicate source tag {tag:?}")]
    DuplicateSourceTag { tag: String, range: Range },

    #[error("structural conflict: multiple move targets for tag {tag:?}")]
    MultipleMoveTargets { tag: String, range: Range },

    #[error("structural nesting deeper than {limit} levels in block {tag:?}")]
    NestingTooDeep {
        tag: String,
        limit: usize,
        range: Range,
    },
}

impl StructuralError {
    pub fn code(&self) -> IssueCode {
        match self {
            StructuralError::DuplicateSourceTag { .. } => IssueCode::DuplicateSourceTag,
            StructuralError::MultipleMoveTargets { .. } => IssueCode::MultipleMoveTargets,
            StructuralError::NestingTooDeep { .. } => IssueCode::NestingTooDeep,
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            StructuralError::DuplicateSourceTag { tag, .. }
            | StructuralError::MultipleMoveTargets { tag, .. }
            | StructuralError::NestingTooDeep { tag, .. } => tag,
        }
    }

    pub fn range(&self) -> &Range {
        match self {
            StructuralError::DuplicateSourceTag { range, .. }
            | StructuralError::MultipleMoveTargets { range, .. }
            | StructuralError::NestingTooDeep { range, .. } => range,
        }
    }

    /// Error-severity issue anchored at the offending node.
    pub fn to_issue(&self) -> Issue {
        Issue::error(self.code(), self.to_string()).at(self.range().start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editml::ast::range::Position;

    #[test]
    fn test_conflict_to_issue() {
        let range = Range::new(10..20, Position::new(1, 3), Position::new(1, 13));
        let err = StructuralError::DuplicateSourceTag {
            tag: "dup".into(),
            range,
        };

        let issue = err.to_issue();
        assert!(issue.is_error());
        assert_eq!(issue.code, IssueCode::DuplicateSourceTag);
        assert_eq!(issue.message, "structural conflict: duplicate source tag \"dup\"");
        assert_eq!((issue.line, issue.column), (Some(2), Some(4)));
    }

    #[test]
    fn test_nesting_message() {
        let err = StructuralError::NestingTooDeep {
            tag: "A".into(),
            limit: 2,
            range: Range::default(),
        };
        assert_eq!(
            err.to_string(),
            "structural nesting deeper than 2 levels in block \"A\""
        );
        assert_eq!(err.tag(), "A");
    }
}
