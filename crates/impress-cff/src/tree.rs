//! Generic key-value tree produced by the YAML parse step

use serde_yaml::{Mapping, Value};

use crate::error::ParseError;

/// A parsed but not yet validated citation document
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTree {
    root: Value,
}

impl ParsedTree {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// The root mapping, if the document is one
    pub fn as_mapping(&self) -> Option<&Mapping> {
        self.root.as_mapping()
    }

    /// Look up a top-level key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }
}

/// Deserialize YAML text into a [`ParsedTree`].
///
/// Malformed syntax and duplicate keys are reported as [`ParseError`].
/// A duplicate key is located at its second occurrence. An empty document
/// parses to a null root and is left for validation to reject.
pub fn parse(raw_text: &str) -> Result<ParsedTree, ParseError> {
    let root: Value = serde_yaml::from_str(raw_text).map_err(|err| {
        let mut parse_error = ParseError::from(err);
        if let Some(key) = duplicate_key(&parse_error.message) {
            // serde_yaml points at the enclosing mapping, not the repeated key
            let position = duplicate_key_position(raw_text, &key);
            parse_error.line = position.map(|(line, _)| line);
            parse_error.column = position.map(|(_, column)| column);
            if let Some(at) = parse_error.message.rfind(" at line ") {
                parse_error.message.truncate(at);
            }
        }
        parse_error
    })?;
    tracing::debug!(
        top_level_keys = root.as_mapping().map(|m| m.len()).unwrap_or(0),
        "parsed citation document"
    );
    Ok(ParsedTree::new(root))
}

/// Key named by a serde_yaml duplicate-entry message
fn duplicate_key(message: &str) -> Option<String> {
    const MARKER: &str = "duplicate entry with key \"";
    let rest = &message[message.find(MARKER)? + MARKER.len()..];
    rest.find('"').map(|end| rest[..end].to_string())
}

/// 1-based line and column of a key's second occurrence within one mapping
fn duplicate_key_position(raw_text: &str, key: &str) -> Option<(usize, usize)> {
    let spellings = [key.to_string(), format!("\"{}\"", key), format!("'{}'", key)];
    // Indentation of each earlier occurrence still in scope
    let mut seen: Vec<usize> = Vec::new();
    for (i, line) in raw_text.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let base = line.len() - trimmed.len();
        // A shallower line or a new list item closes deeper mappings
        seen.retain(|&indent| indent <= base);

        let (indent, entry) = match trimmed.strip_prefix("- ") {
            Some(rest) => {
                let entry = rest.trim_start();
                (line.len() - entry.len(), entry)
            }
            None => (base, trimmed),
        };
        let names_key = spellings.iter().any(|k| {
            entry
                .strip_prefix(k.as_str())
                .is_some_and(|after| after.trim_start().starts_with(':'))
        });
        if !names_key {
            continue;
        }
        if seen.contains(&indent) {
            return Some((i + 1, indent + 1));
        }
        seen.push(indent);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mapping() {
        let tree = parse("cff-version: 1.2.0\ntitle: Demo\n").unwrap();
        assert_eq!(tree.get("title").and_then(Value::as_str), Some("Demo"));
        assert_eq!(tree.as_mapping().map(|m| m.len()), Some(2));
    }

    #[test]
    fn test_parse_malformed_reports_line() {
        let err = parse("title: Demo\nauthors: [unclosed\n").unwrap_err();
        assert!(err.line.is_some());
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_parse_duplicate_key_is_error() {
        assert!(parse("title: A\ntitle: B\n").is_err());
    }

    #[test]
    fn test_duplicate_key_points_at_second_occurrence() {
        let yaml = "cff-version: 1.2.0\n\
                    message: Please cite\n\
                    title: Demo\n\
                    authors:\n\
                    \x20 - name: Team\n\
                    title: Again\n";
        let err = parse(yaml).unwrap_err();
        assert_eq!(err.line, Some(6));
        assert_eq!(err.column, Some(1));
        assert!(err.message.contains("title"));
    }

    #[test]
    fn test_duplicate_key_in_nested_mapping() {
        let yaml = "authors:\n  - family-names: Lee\n    family-names: Li\n";
        let err = parse(yaml).unwrap_err();
        assert_eq!(err.line, Some(3));
        assert_eq!(err.column, Some(5));
        assert!(!err.message.contains(" at line "));
    }

    #[test]
    fn test_duplicate_key_ignores_sibling_list_items() {
        let yaml = "authors:\n\
                    \x20 - family-names: Lee\n\
                    \x20 - family-names: Ghouse\n\
                    \x20   given-names: Jaffer\n\
                    \x20   family-names: Ghouse\n";
        let err = parse(yaml).unwrap_err();
        assert_eq!(err.line, Some(5));
        assert_eq!(err.column, Some(5));
    }

    #[test]
    fn test_parse_empty_document_is_null() {
        let tree = parse("").unwrap();
        assert!(tree.root().is_null());
        assert!(tree.as_mapping().is_none());
    }
}
