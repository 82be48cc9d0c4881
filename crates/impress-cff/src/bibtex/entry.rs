//! BibTeX entry data structures

use crate::record::CitationType;

/// BibTeX entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BibTeXEntryType {
    Article,
    Book,
    InProceedings,
    Manual,
    Misc,
    PhdThesis,
    Proceedings,
    TechReport,
    Unpublished,
    Software,
    Dataset,
}

impl BibTeXEntryType {
    /// Convert entry type to canonical string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Book => "book",
            Self::InProceedings => "inproceedings",
            Self::Manual => "manual",
            Self::Misc => "misc",
            Self::PhdThesis => "phdthesis",
            Self::Proceedings => "proceedings",
            Self::TechReport => "techreport",
            Self::Unpublished => "unpublished",
            Self::Software => "software",
            Self::Dataset => "dataset",
        }
    }
}

impl From<CitationType> for BibTeXEntryType {
    fn from(citation_type: CitationType) -> Self {
        match citation_type {
            CitationType::Article => Self::Article,
            CitationType::Book => Self::Book,
            CitationType::ConferencePaper => Self::InProceedings,
            CitationType::Data => Self::Dataset,
            CitationType::Manual => Self::Manual,
            CitationType::Proceedings => Self::Proceedings,
            CitationType::Report => Self::TechReport,
            CitationType::Software => Self::Software,
            CitationType::Thesis => Self::PhdThesis,
            CitationType::Unpublished => Self::Unpublished,
            CitationType::Generic | CitationType::Misc => Self::Misc,
        }
    }
}

/// A single BibTeX field (key-value pair)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibTeXField {
    pub key: String,
    pub value: String,
}

/// A BibTeX entry with fields kept in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibTeXEntry {
    pub cite_key: String,
    pub entry_type: BibTeXEntryType,
    pub fields: Vec<BibTeXField>,
}

impl BibTeXEntry {
    /// Create a new BibTeX entry
    pub fn new(cite_key: String, entry_type: BibTeXEntryType) -> Self {
        Self {
            cite_key,
            entry_type,
            fields: Vec::new(),
        }
    }

    /// Add a field to the entry
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push(BibTeXField {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Add a field only when a value is present
    pub fn add_optional_field(&mut self, key: &str, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.add_field(key, value.to_string());
        }
    }

    /// Get a field value by key (case-insensitive)
    pub fn get_field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key.eq_ignore_ascii_case(key))
            .map(|f| f.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_type_from_citation_type() {
        assert_eq!(
            BibTeXEntryType::from(CitationType::Article),
            BibTeXEntryType::Article
        );
        assert_eq!(
            BibTeXEntryType::from(CitationType::ConferencePaper).as_str(),
            "inproceedings"
        );
        assert_eq!(
            BibTeXEntryType::from(CitationType::Generic),
            BibTeXEntryType::Misc
        );
    }

    #[test]
    fn test_entry_field_access() {
        let mut entry = BibTeXEntry::new("Lee2021Idaes".to_string(), BibTeXEntryType::Article);
        entry.add_field("title", "A Great Paper");
        entry.add_field("Author", "Lee, Andrew");
        entry.add_optional_field("year", Some(2021));
        entry.add_optional_field("doi", None::<String>);

        assert_eq!(entry.get_field("title"), Some("A Great Paper"));
        assert_eq!(entry.get_field("author"), Some("Lee, Andrew"));
        assert_eq!(entry.get_field("YEAR"), Some("2021"));
        assert_eq!(entry.get_field("doi"), None);
    }
}
