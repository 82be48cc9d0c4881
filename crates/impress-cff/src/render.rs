//! Display citations for a loaded record
//!
//! Rendering is pure: the same record and options always produce the same
//! string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::author::Author;
use crate::bibtex::{format_entry, record_to_entry};
use crate::doi::doi_url;
use crate::record::{CitationRecord, CitationType, IdentifierType, PreferredCitation};

/// Output format for [`render`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    #[default]
    Apa,
    Bibtex,
}

impl RenderFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apa => "apa",
            Self::Bibtex => "bibtex",
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown render format '{0}'; expected apa or bibtex")]
pub struct UnknownFormat(pub String);

impl FromStr for RenderFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "apa" => Ok(Self::Apa),
            "bibtex" | "bib" => Ok(Self::Bibtex),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Knobs for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Authors listed in full before APA truncates with an ellipsis
    pub apa_max_authors: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { apa_max_authors: 20 }
    }
}

/// Render a record with default options
pub fn render(record: &CitationRecord, format: RenderFormat) -> String {
    render_with(record, format, &RenderOptions::default())
}

/// Render a record in the given format
pub fn render_with(
    record: &CitationRecord,
    format: RenderFormat,
    options: &RenderOptions,
) -> String {
    match format {
        RenderFormat::Apa => match record.preferred_citation() {
            Some(citation) => apa_citation(citation, options),
            None => apa_software(record, options),
        },
        RenderFormat::Bibtex => format_entry(&record_to_entry(record)),
    }
}

// ===== APA =====

/// APA 7 author list: "A, B, & C", truncated past `max` authors
fn apa_authors(authors: &[Author], max: usize) -> String {
    let names: Vec<String> = authors.iter().map(Author::to_apa_format).collect();
    let max = max.max(2);
    match names.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{}, & {}", first, second),
        [init @ .., last] if names.len() <= max => format!("{}, & {}", init.join(", "), last),
        [.., last] => format!("{}, . . . {}", names[..max - 1].join(", "), last),
    }
}

fn apa_year(year: Option<u32>) -> String {
    match year {
        Some(year) => format!("({})", year),
        None => "(n.d.)".to_string(),
    }
}

/// Terminate a sentence unless it already ends in punctuation
fn sentence(text: &str) -> String {
    let text = text.trim();
    if text.ends_with(['.', '?', '!']) {
        text.to_string()
    } else {
        format!("{}.", text)
    }
}

fn apa_author_block(authors: &[Author], options: &RenderOptions) -> String {
    let authors = apa_authors(authors, options.apa_max_authors);
    // "Miller, D. C." already ends with a period
    sentence(&authors)
}

fn apa_citation(citation: &PreferredCitation, options: &RenderOptions) -> String {
    let mut parts = vec![
        format!(
            "{} {}.",
            apa_author_block(citation.authors(), options),
            apa_year(citation.year())
        ),
        sentence(citation.title()),
    ];

    match citation.citation_type() {
        CitationType::Article => {
            if let Some(journal) = citation.journal() {
                let mut source = journal.to_string();
                if let Some(volume) = citation.volume() {
                    source.push_str(&format!(", {}", volume));
                    if let Some(number) = citation.number() {
                        source.push_str(&format!("({})", number));
                    }
                }
                if let Some(pages) = citation.pages() {
                    source.push_str(&format!(", {}", pages.replace("--", "-")));
                }
                parts.push(sentence(&source));
            }
        }
        _ => {
            if let Some(source) = citation.journal().or(citation.publisher()) {
                parts.push(sentence(source));
            }
        }
    }

    if let Some(doi) = citation.doi() {
        parts.push(doi_url(doi));
    } else if let Some(url) = citation.url() {
        parts.push(url.to_string());
    }

    parts.join(" ")
}

fn apa_software(record: &CitationRecord, options: &RenderOptions) -> String {
    let mut title = record.title().to_string();
    if let Some(version) = record.version() {
        title.push_str(&format!(" (Version {})", version));
    }
    title.push_str(" [Computer software]");

    let mut parts = vec![
        format!(
            "{} {}.",
            apa_author_block(record.authors(), options),
            apa_year(record.release_year())
        ),
        sentence(&title),
    ];

    if let Some(doi) = record.identifier(IdentifierType::Doi) {
        parts.push(doi_url(&doi.value));
    } else if let Some(url) = record.url().or(record.repository_code()) {
        parts.push(url.to_string());
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::author::PersonAuthor;

    fn person(family: &str, given: &str) -> Author {
        Author::Person(PersonAuthor::new(family).with_given_names(given))
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("apa".parse::<RenderFormat>(), Ok(RenderFormat::Apa));
        assert_eq!("BibTeX".parse::<RenderFormat>(), Ok(RenderFormat::Bibtex));
        assert!("mla".parse::<RenderFormat>().is_err());
    }

    #[test]
    fn test_apa_authors_short_lists() {
        let a = person("Lee", "Andrew");
        let b = person("Ghouse", "Jaffer H.");
        let c = person("Miller", "David C.");
        assert_eq!(apa_authors(&[a.clone()], 20), "Lee, A.");
        assert_eq!(
            apa_authors(&[a.clone(), b.clone()], 20),
            "Lee, A., & Ghouse, J. H."
        );
        assert_eq!(
            apa_authors(&[a, b, c], 20),
            "Lee, A., Ghouse, J. H., & Miller, D. C."
        );
    }

    #[test]
    fn test_apa_authors_truncated() {
        let authors: Vec<Author> = (1..=5)
            .map(|i| Author::entity(format!("Group {}", i)))
            .collect();
        assert_eq!(
            apa_authors(&authors, 3),
            "Group 1, Group 2, . . . Group 5"
        );
        assert_eq!(
            apa_authors(&authors, 5),
            "Group 1, Group 2, Group 3, Group 4, & Group 5"
        );
    }

    #[test]
    fn test_sentence() {
        assert_eq!(sentence("Title"), "Title.");
        assert_eq!(sentence("Why?"), "Why?");
        assert_eq!(sentence("Lee, A."), "Lee, A.");
    }
}
