//! Error and diagnostic types.
//!
//! Rendering is best-effort: problems inside a document become
//! [`Diagnostic`]s attached to the render output, while [`ChrdError`] is
//! reserved for conditions that stop a pass before it starts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChrdError {
    #[error("Invalid render scale: {0} (must be finite and positive)")]
    InvalidScale(f64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid UTF-8 in chart source: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with ChrdError
pub type Result<T> = std::result::Result<T, ChrdError>;

/// A non-fatal problem found while rendering a document.
///
/// `line` is the 1-based line number in the source text.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagnostic {
    #[error("line {line}: invalid token '{token}'")]
    InvalidToken { line: usize, token: String },

    #[error("line {line}: invalid repeat count in '{token}'")]
    InvalidRepeatCount { line: usize, token: String },

    #[error("line {line}: #{pragma} expects a number, got '{value}'")]
    InvalidNumber {
        line: usize,
        pragma: String,
        value: String,
    },

    #[error("line {line}: #include is not implemented")]
    IncludeNotImplemented { line: usize, target: Option<String> },
}

impl Diagnostic {
    pub fn line(&self) -> usize {
        match self {
            Diagnostic::InvalidToken { line, .. }
            | Diagnostic::InvalidRepeatCount { line, .. }
            | Diagnostic::InvalidNumber { line, .. }
            | Diagnostic::IncludeNotImplemented { line, .. } => *line,
        }
    }
}

/// Record a diagnostic and echo it through the `log` facade.
pub(crate) fn report(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    log::warn!("{diagnostic}");
    diagnostics.push(diagnostic);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ChrdError = io_err.into();
        assert!(matches!(err, ChrdError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::InvalidToken { line: 3, token: ":|".into() };
        assert_eq!(d.to_string(), "line 3: invalid token ':|'");
        assert_eq!(d.line(), 3);

        let d = Diagnostic::InvalidNumber {
            line: 7,
            pragma: "chord_size".into(),
            value: "big".into(),
        };
        assert_eq!(d.to_string(), "line 7: #chord_size expects a number, got 'big'");

        let d = Diagnostic::IncludeNotImplemented { line: 1, target: None };
        assert_eq!(d.to_string(), "line 1: #include is not implemented");
    }

    #[test]
    fn test_diagnostic_serializes_with_kind_tag() {
        let d = Diagnostic::InvalidRepeatCount { line: 2, token: ":|x".into() };
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains(r#""kind":"invalid-repeat-count""#), "{json}");
    }
}
