//! Validated citation record types
//!
//! Records are produced only by [`crate::validate`]; nothing exposes a
//! way to mutate one after loading.

use crate::author::Author;

/// Kind of identifier listed under `identifiers`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierType {
    Url,
    Doi,
    Swh,
    Other,
}

impl IdentifierType {
    /// Parse an identifier type; CFF spells these in lowercase
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "url" => Some(Self::Url),
            "doi" => Some(Self::Doi),
            "swh" => Some(Self::Swh),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Doi => "doi",
            Self::Swh => "swh",
            Self::Other => "other",
        }
    }

    pub const ALL: [IdentifierType; 4] = [Self::Url, Self::Doi, Self::Swh, Self::Other];
}

/// An entry under `identifiers`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub description: Option<String>,
    pub identifier_type: IdentifierType,
    pub value: String,
}

/// Work type of a preferred citation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CitationType {
    Article,
    Book,
    ConferencePaper,
    Data,
    Generic,
    Manual,
    Misc,
    Proceedings,
    Report,
    Software,
    Thesis,
    Unpublished,
}

impl CitationType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "article" => Some(Self::Article),
            "book" => Some(Self::Book),
            "conference-paper" => Some(Self::ConferencePaper),
            "data" => Some(Self::Data),
            "generic" => Some(Self::Generic),
            "manual" => Some(Self::Manual),
            "misc" => Some(Self::Misc),
            "proceedings" => Some(Self::Proceedings),
            "report" => Some(Self::Report),
            "software" => Some(Self::Software),
            "thesis" => Some(Self::Thesis),
            "unpublished" => Some(Self::Unpublished),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Book => "book",
            Self::ConferencePaper => "conference-paper",
            Self::Data => "data",
            Self::Generic => "generic",
            Self::Manual => "manual",
            Self::Misc => "misc",
            Self::Proceedings => "proceedings",
            Self::Report => "report",
            Self::Software => "software",
            Self::Thesis => "thesis",
            Self::Unpublished => "unpublished",
        }
    }

    pub const ALL: [CitationType; 12] = [
        Self::Article,
        Self::Book,
        Self::ConferencePaper,
        Self::Data,
        Self::Generic,
        Self::Manual,
        Self::Misc,
        Self::Proceedings,
        Self::Report,
        Self::Software,
        Self::Thesis,
        Self::Unpublished,
    ];
}

/// The `preferred-citation` block: the work users should cite instead of
/// the software itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferredCitation {
    pub(crate) citation_type: CitationType,
    pub(crate) authors: Vec<Author>,
    pub(crate) title: String,
    pub(crate) journal: Option<String>,
    pub(crate) publisher: Option<String>,
    pub(crate) volume: Option<u32>,
    pub(crate) number: Option<u32>,
    pub(crate) pages: Option<String>,
    pub(crate) year: Option<u32>,
    pub(crate) month: Option<u8>,
    pub(crate) doi: Option<String>,
    pub(crate) url: Option<String>,
}

impl PreferredCitation {
    pub fn citation_type(&self) -> CitationType {
        self.citation_type
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn journal(&self) -> Option<&str> {
        self.journal.as_deref()
    }

    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }

    pub fn volume(&self) -> Option<u32> {
        self.volume
    }

    pub fn number(&self) -> Option<u32> {
        self.number
    }

    pub fn pages(&self) -> Option<&str> {
        self.pages.as_deref()
    }

    pub fn year(&self) -> Option<u32> {
        self.year
    }

    pub fn month(&self) -> Option<u8> {
        self.month
    }

    /// The DOI exactly as written in the source document
    pub fn doi(&self) -> Option<&str> {
        self.doi.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// A loaded and validated `CITATION.cff` document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationRecord {
    pub(crate) cff_version: String,
    pub(crate) message: String,
    pub(crate) authors: Vec<Author>,
    pub(crate) title: String,
    pub(crate) version: Option<String>,
    pub(crate) date_released: Option<String>,
    pub(crate) abstract_text: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) repository_code: Option<String>,
    pub(crate) license: Option<String>,
    pub(crate) license_url: Option<String>,
    pub(crate) keywords: Vec<String>,
    pub(crate) identifiers: Vec<Identifier>,
    pub(crate) preferred_citation: Option<PreferredCitation>,
}

impl CitationRecord {
    pub fn cff_version(&self) -> &str {
        &self.cff_version
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Release date as `YYYY-MM-DD`
    pub fn date_released(&self) -> Option<&str> {
        self.date_released.as_deref()
    }

    /// Year of `date-released`, if any
    pub fn release_year(&self) -> Option<u32> {
        self.date_released
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }

    pub fn abstract_text(&self) -> Option<&str> {
        self.abstract_text.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn repository_code(&self) -> Option<&str> {
        self.repository_code.as_deref()
    }

    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }

    pub fn license_url(&self) -> Option<&str> {
        self.license_url.as_deref()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }

    /// First identifier of the given type
    pub fn identifier(&self, identifier_type: IdentifierType) -> Option<&Identifier> {
        self.identifiers
            .iter()
            .find(|id| id.identifier_type == identifier_type)
    }

    pub fn preferred_citation(&self) -> Option<&PreferredCitation> {
        self.preferred_citation.as_ref()
    }
}
