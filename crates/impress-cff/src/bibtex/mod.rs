//! BibTeX output for citation records

mod cite_key;
mod entry;
mod formatter;

pub use cite_key::generate_cite_key;
pub use entry::{BibTeXEntry, BibTeXEntryType, BibTeXField};
pub use formatter::{escape_value, format_entry};

use crate::author::bibtex_author_field;
use crate::record::CitationRecord;

/// Build the BibTeX entry for a record.
///
/// The preferred citation is used when present; otherwise the software
/// itself becomes a `@software` entry.
pub fn record_to_entry(record: &CitationRecord) -> BibTeXEntry {
    match record.preferred_citation() {
        Some(citation) => {
            let cite_key = generate_cite_key(
                citation.authors().first(),
                citation.year(),
                Some(citation.title()),
            );
            let mut entry = BibTeXEntry::new(cite_key, citation.citation_type().into());
            entry.add_field("author", bibtex_author_field(citation.authors()));
            entry.add_field("title", citation.title());
            entry.add_optional_field("journal", citation.journal());
            entry.add_optional_field("publisher", citation.publisher());
            entry.add_optional_field("volume", citation.volume());
            entry.add_optional_field("number", citation.number());
            entry.add_optional_field("pages", citation.pages().map(bibtex_pages));
            entry.add_optional_field("year", citation.year());
            entry.add_optional_field("month", citation.month());
            entry.add_optional_field("doi", citation.doi().map(crate::doi::normalize_doi));
            entry.add_optional_field("url", citation.url());
            entry
        }
        None => {
            let year = record.release_year();
            let cite_key =
                generate_cite_key(record.authors().first(), year, Some(record.title()));
            let mut entry = BibTeXEntry::new(cite_key, BibTeXEntryType::Software);
            entry.add_field("author", bibtex_author_field(record.authors()));
            entry.add_field("title", record.title());
            entry.add_optional_field("version", record.version());
            entry.add_optional_field("year", year);
            entry.add_optional_field(
                "doi",
                record
                    .identifier(crate::record::IdentifierType::Doi)
                    .map(|id| crate::doi::normalize_doi(&id.value)),
            );
            entry.add_optional_field("url", record.url().or(record.repository_code()));
            entry
        }
    }
}

/// Page ranges use an en-dash in BibTeX: `12-20` -> `12--20`
fn bibtex_pages(pages: &str) -> String {
    if pages.contains("--") {
        pages.to_string()
    } else {
        pages.replacen('-', "--", 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bibtex_pages() {
        assert_eq!(bibtex_pages("12-20"), "12--20");
        assert_eq!(bibtex_pages("12--20"), "12--20");
        assert_eq!(bibtex_pages("e10095"), "e10095");
    }
}
