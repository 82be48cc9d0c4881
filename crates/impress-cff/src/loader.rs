//! Reading citation files from disk or memory

use std::path::Path;

use crate::config::LoaderConfig;
use crate::error::{CffError, ValidationError, ValidationIssue, ValidationSeverity};
use crate::record::CitationRecord;
use crate::tree::parse;
use crate::validate::{validate_with_warnings, Validated};

/// Loads and validates citation documents under a [`LoaderConfig`]
#[derive(Debug, Clone, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Loader that treats warnings as errors
    pub fn strict() -> Self {
        Self::new(LoaderConfig { strict: true })
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Read, parse, and validate a file
    pub fn load(&self, path: impl AsRef<Path>) -> Result<CitationRecord, CffError> {
        self.load_validated(path).map(|validated| validated.record)
    }

    /// Parse and validate in-memory text
    pub fn load_str(&self, raw_text: &str) -> Result<CitationRecord, CffError> {
        self.load_str_validated(raw_text)
            .map(|validated| validated.record)
    }

    /// Like [`Loader::load`], also returning the warnings
    pub fn load_validated(&self, path: impl AsRef<Path>) -> Result<Validated, CffError> {
        let path = path.as_ref();
        let raw_text = std::fs::read_to_string(path).map_err(|source| CffError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let validated = self.load_str_validated(&raw_text)?;
        tracing::info!(
            path = %path.display(),
            title = %validated.record.title(),
            "loaded citation record"
        );
        Ok(validated)
    }

    /// Like [`Loader::load_str`], also returning the warnings
    pub fn load_str_validated(&self, raw_text: &str) -> Result<Validated, CffError> {
        let tree = parse(raw_text)?;
        let validated = validate_with_warnings(&tree)?;

        if self.config.strict && !validated.warnings.is_empty() {
            let issues: Vec<ValidationIssue> = validated
                .warnings
                .into_iter()
                .map(|w| ValidationIssue {
                    severity: ValidationSeverity::Error,
                    ..w
                })
                .collect();
            return Err(ValidationError { issues }.into());
        }

        Ok(validated)
    }
}

/// Read, parse, and validate a file with default settings
pub fn load(path: impl AsRef<Path>) -> Result<CitationRecord, CffError> {
    Loader::default().load(path)
}

/// Parse and validate in-memory text with default settings
pub fn load_str(raw_text: &str) -> Result<CitationRecord, CffError> {
    Loader::default().load_str(raw_text)
}
