//! Issues reported while parsing and rendering
//!
//! Parsing never fails: malformed markup degrades to text. What can go wrong is
//! reported as [`Issue`]s collected next to the result. Rendering fails as a whole
//! only on a structural conflict (see [`StructuralError`](super::StructuralError)),
//! which is itself converted into an error-severity issue for reporting.
//!
//! ## Issue codes
//!
//! Codes are stable kebab-case names so tooling can filter on them:
//!
//! 1. **Fatal conflicts**: `duplicate-source-tag`, `multiple-move-targets`
//! 2. **Localized substitutions**: `operation-mismatch`, `unresolved-source`,
//!    `unresolved-target`, `block-content-failed`, `nesting-too-deep`
//! 3. **Degradations**: `nested-markup`, `overlapping-markup`, `nested-structure`,
//!    `unknown-escape`

use super::range::Position;
use serde::Serialize;
use std::fmt;

/// Issue severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Machine-readable classification of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCode {
    DuplicateSourceTag,
    MultipleMoveTargets,
    NestingTooDeep,
    OperationMismatch,
    UnresolvedSource,
    UnresolvedTarget,
    BlockContentFailed,
    NestedMarkup,
    OverlappingMarkup,
    NestedStructure,
    UnknownEscape,
}

impl IssueCode {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueCode::DuplicateSourceTag => "duplicate-source-tag",
            IssueCode::MultipleMoveTargets => "multiple-move-targets",
            IssueCode::NestingTooDeep => "nesting-too-deep",
            IssueCode::OperationMismatch => "operation-mismatch",
            IssueCode::UnresolvedSource => "unresolved-source",
            IssueCode::UnresolvedTarget => "unresolved-target",
            IssueCode::BlockContentFailed => "block-content-failed",
            IssueCode::NestedMarkup => "nested-markup",
            IssueCode::OverlappingMarkup => "overlapping-markup",
            IssueCode::NestedStructure => "nested-structure",
            IssueCode::UnknownEscape => "unknown-escape",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single reported problem. Line and column are 1-based and best-effort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub code: IssueCode,
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl Issue {
    pub fn new(severity: Severity, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn error(code: IssueCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    pub fn warning(code: IssueCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    /// Anchor the issue at a 0-based position.
    pub fn at(mut self, position: Position) -> Self {
        self.line = Some(position.line + 1);
        self.column = Some(position.column + 1);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.severity, self.code)?;
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, " {}:{}", line, column)?,
            (Some(line), None) => write!(f, " {}", line)?,
            _ => {}
        }
        write!(f, ": {}", self.message)
    }
}

/// True when any issue in the list has error severity.
pub fn has_errors(issues: &[Issue]) -> bool {
    issues.iter().any(Issue::is_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_creation() {
        let issue = Issue::warning(IssueCode::UnresolvedTarget, "no source for tag 'X'")
            .at(Position::new(2, 4));

        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(issue.line, Some(3));
        assert_eq!(issue.column, Some(5));
        assert!(!issue.is_error());
    }

    #[test]
    fn test_issue_display() {
        let placed = Issue::error(IssueCode::DuplicateSourceTag, "dup").at(Position::new(0, 0));
        assert_eq!(placed.to_string(), "error[duplicate-source-tag] 1:1: dup");

        let floating = Issue::warning(IssueCode::NestedMarkup, "nested");
        assert_eq!(floating.to_string(), "warning[nested-markup]: nested");
    }

    #[test]
    fn test_has_errors() {
        let warnings = vec![Issue::warning(IssueCode::UnknownEscape, "x")];
        assert!(!has_errors(&warnings));

        let mixed = vec![
            Issue::warning(IssueCode::UnknownEscape, "x"),
            Issue::error(IssueCode::MultipleMoveTargets, "y"),
        ];
        assert!(has_errors(&mixed));
    }

    #[test]
    fn test_code_serializes_kebab_case() {
        let json = serde_json::to_value(IssueCode::OperationMismatch).unwrap();
        assert_eq!(json, "operation-mismatch");
        assert_eq!(IssueCode::OperationMismatch.as_str(), "operation-mismatch");
    }
}
