//! Error types for loading and validating citation files

use std::fmt;
use std::path::PathBuf;

/// Top-level error returned by [`crate::load`] and friends
#[derive(Debug, thiserror::Error)]
pub enum CffError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// The input is not well-formed YAML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line, when the YAML parser reports a position
    pub line: Option<usize>,
    /// 1-based column, when the YAML parser reports a position
    pub column: Option<usize>,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => {
                write!(f, "Parse error at line {}, column {}: {}", line, column, self.message)
            }
            (Some(line), None) => write!(f, "Parse error at line {}: {}", line, self.message),
            _ => write!(f, "Parse error: {}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<serde_yaml::Error> for ParseError {
    fn from(err: serde_yaml::Error) -> Self {
        let location = err.location();
        Self {
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
            message: err.to_string(),
        }
    }
}

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

/// A single problem found while validating, anchored to a field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Path such as `authors[2].family-names`; `$` is the document root
    pub path: String,
    pub message: String,
    pub severity: ValidationSeverity,
}

impl ValidationIssue {
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: ValidationSeverity::Error,
        }
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: ValidationSeverity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, ValidationSeverity::Error)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// The document parsed but does not describe a valid citation record.
///
/// Every violation found is collected, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Whether any issue is anchored at `path` or below it
    pub fn references(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| {
            issue.path == path
                || issue.path.starts_with(&format!("{}.", path))
                || issue.path.starts_with(&format!("{}[", path))
        })
    }

    pub fn first(&self) -> Option<&ValidationIssue> {
        self.issues.first()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issues.as_slice() {
            [] => write!(f, "Validation failed"),
            [only] => write!(f, "Validation failed: {}", only),
            issues => {
                write!(f, "Validation failed with {} issues:", issues.len())?;
                for issue in issues {
                    write!(f, "\n  - {}", issue)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}
