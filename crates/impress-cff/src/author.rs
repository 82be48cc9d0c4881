//! Author representation

use crate::bibtex::escape_value;

/// An author entry: either a free-text name (an organization, a project
/// team) or a structured person.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Author {
    Entity(EntityAuthor),
    Person(PersonAuthor),
}

/// An author identified by a single free-text name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityAuthor {
    pub name: String,
    pub email: Option<String>,
}

/// A person with family and given names
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonAuthor {
    pub family_names: String,
    pub given_names: Option<String>,
    pub orcid: Option<String>,
    pub affiliation: Option<String>,
    pub email: Option<String>,
}

impl PersonAuthor {
    /// Create a person with just a family name
    pub fn new(family_names: impl Into<String>) -> Self {
        Self {
            family_names: family_names.into(),
            given_names: None,
            orcid: None,
            affiliation: None,
            email: None,
        }
    }

    /// Builder method to add given names
    pub fn with_given_names(mut self, given: impl Into<String>) -> Self {
        self.given_names = Some(given.into());
        self
    }

    /// Builder method to add ORCID
    pub fn with_orcid(mut self, orcid: impl Into<String>) -> Self {
        self.orcid = Some(orcid.into());
        self
    }

    /// Given names reduced to initials: "Jaffer H." -> "J. H."
    pub fn initials(&self) -> Option<String> {
        let given = self.given_names.as_deref()?;
        let initials: Vec<String> = given
            .split_whitespace()
            .map(|part| {
                // "Jean-Luc" -> "J.-L."
                part.split('-')
                    .filter_map(|piece| piece.chars().find(|c| c.is_alphabetic()))
                    .map(|c| format!("{}.", c.to_uppercase()))
                    .collect::<Vec<_>>()
                    .join("-")
            })
            .filter(|s| !s.is_empty())
            .collect();
        if initials.is_empty() {
            None
        } else {
            Some(initials.join(" "))
        }
    }
}

impl Author {
    /// Free-text author
    pub fn entity(name: impl Into<String>) -> Self {
        Self::Entity(EntityAuthor {
            name: name.into(),
            email: None,
        })
    }

    /// Format as "Given Family" for display
    pub fn display_name(&self) -> String {
        match self {
            Self::Entity(entity) => entity.name.clone(),
            Self::Person(person) => match &person.given_names {
                Some(given) => format!("{} {}", given, person.family_names),
                None => person.family_names.clone(),
            },
        }
    }

    /// Format as "Family, Given" for BibTeX.
    ///
    /// Free-text names are wrapped in braces so BibTeX keeps them whole.
    /// Special characters inside the names are escaped.
    pub fn to_bibtex_format(&self) -> String {
        match self {
            Self::Entity(entity) => format!("{{{}}}", escape_value(&entity.name)),
            Self::Person(person) => match &person.given_names {
                Some(given) => format!(
                    "{}, {}",
                    escape_value(&person.family_names),
                    escape_value(given)
                ),
                None => escape_value(&person.family_names),
            },
        }
    }

    /// Format as "Family, G. G." for APA reference lists
    pub fn to_apa_format(&self) -> String {
        match self {
            Self::Entity(entity) => entity.name.clone(),
            Self::Person(person) => match person.initials() {
                Some(initials) => format!("{}, {}", person.family_names, initials),
                None => person.family_names.clone(),
            },
        }
    }

    /// Family name for persons, the whole name for entities
    pub fn sort_name(&self) -> &str {
        match self {
            Self::Entity(entity) => &entity.name,
            Self::Person(person) => &person.family_names,
        }
    }

    pub fn orcid(&self) -> Option<&str> {
        match self {
            Self::Entity(_) => None,
            Self::Person(person) => person.orcid.as_deref(),
        }
    }
}

/// Join authors into a BibTeX author field
pub fn bibtex_author_field(authors: &[Author]) -> String {
    authors
        .iter()
        .map(Author::to_bibtex_format)
        .collect::<Vec<_>>()
        .join(" and ")
}
