//! BibTeX formatting module
//!
//! Converts BibTeXEntry structures to BibTeX string format.

use super::entry::BibTeXEntry;

/// Fields whose values are passed through without escaping.
/// `author` is escaped name by name when the field is built.
const VERBATIM_FIELDS: [&str; 3] = ["url", "doi", "author"];

/// Format a single BibTeX entry to string
pub fn format_entry(entry: &BibTeXEntry) -> String {
    let mut result = String::new();

    // Entry type and cite key
    result.push('@');
    result.push_str(entry.entry_type.as_str());
    result.push('{');
    result.push_str(&entry.cite_key);
    result.push(',');
    result.push('\n');

    for field in &entry.fields {
        result.push_str("    ");
        result.push_str(&field.key);
        result.push_str(" = ");

        let verbatim = VERBATIM_FIELDS
            .iter()
            .any(|k| k.eq_ignore_ascii_case(&field.key));
        if verbatim {
            result.push_str(&format_field_value(&field.value));
        } else {
            result.push_str(&format_field_value(&escape_value(&field.value)));
        }
        result.push(',');
        result.push('\n');
    }

    result.push('}');
    result
}

/// Format a field value, choosing appropriate delimiters
fn format_field_value(value: &str) -> String {
    // Purely numeric values need no delimiters
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        return value.to_string();
    }

    let mut result = String::with_capacity(value.len() + 2);
    result.push('{');
    result.push_str(value);
    result.push('}');
    result
}

/// Escape special BibTeX characters in a value
///
/// Literal braces become `\textbraceleft{}`/`\textbraceright{}` so the
/// delimiting braces of the field always stay balanced.
pub fn escape_value(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '#' | '$' | '%' | '&' | '_' => {
                result.push('\\');
                result.push(c);
            }
            '{' => result.push_str("\\textbraceleft{}"),
            '}' => result.push_str("\\textbraceright{}"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bibtex::entry::BibTeXEntryType;

    #[test]
    fn test_format_simple_entry() {
        let mut entry = BibTeXEntry::new("Smith2024".to_string(), BibTeXEntryType::Article);
        entry.add_field("author", "Smith, John");
        entry.add_field("title", "A Great Paper");
        entry.add_field("year", "2024");

        let formatted = format_entry(&entry);
        assert!(formatted.starts_with("@article{Smith2024,\n"));
        assert!(formatted.contains("    author = {Smith, John},\n"));
        assert!(formatted.contains("    title = {A Great Paper},\n"));
        // Year is numeric, so no braces
        assert!(formatted.contains("    year = 2024,\n"));
        assert!(formatted.ends_with('}'));
    }

    #[test]
    fn test_format_escapes_text_but_not_urls() {
        let mut entry = BibTeXEntry::new("Key".to_string(), BibTeXEntryType::Misc);
        entry.add_field("title", "Heat & Mass_Transfer");
        entry.add_field("url", "https://example.org/a_b?x=1&y=2");

        let formatted = format_entry(&entry);
        assert!(formatted.contains("title = {Heat \\& Mass\\_Transfer}"));
        assert!(formatted.contains("url = {https://example.org/a_b?x=1&y=2}"));
    }

    #[test]
    fn test_escape_special_chars() {
        assert_eq!(escape_value("10%"), "10\\%");
        assert_eq!(escape_value("$100"), "\\$100");
        assert_eq!(escape_value("A & B"), "A \\& B");
    }

    #[test]
    fn test_format_keeps_braces_balanced() {
        let mut entry = BibTeXEntry::new("Key".to_string(), BibTeXEntryType::Misc);
        entry.add_field("title", "Solver } for {x");

        let formatted = format_entry(&entry);
        assert!(formatted.contains(
            "title = {Solver \\textbraceright{} for \\textbraceleft{}x},\n"
        ));

        let mut depth = 0i32;
        for c in formatted.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            assert!(depth >= 0, "unbalanced braces in {}", formatted);
        }
        assert_eq!(depth, 0);
    }
}
