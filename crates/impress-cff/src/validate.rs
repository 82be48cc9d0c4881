//! Validation of a parsed tree into a [`CitationRecord`]
//!
//! Validation walks the whole document and accumulates every issue rather
//! than stopping at the first one. Issues carry a field path
//! (`preferred-citation.authors[3].given-names`) and a severity: errors make
//! validation fail, warnings are logged and handed back with the record.

use lazy_static::lazy_static;
use regex::Regex;
use serde_yaml::{Mapping, Value};

use crate::author::{Author, EntityAuthor, PersonAuthor};
use crate::doi::is_valid_doi;
use crate::error::{ValidationError, ValidationIssue};
use crate::record::{CitationRecord, CitationType, Identifier, IdentifierType, PreferredCitation};
use crate::tree::ParsedTree;

/// Path used for issues about the document itself
pub const ROOT_PATH: &str = "$";

/// Top-level keys every citation file must carry
pub const REQUIRED_KEYS: [&str; 4] = ["cff-version", "message", "authors", "title"];

lazy_static! {
    static ref VERSION_REGEX: Regex = Regex::new(r"^(\d+)\.(\d+)\.(\d+)$").unwrap();
    static ref DATE_REGEX: Regex = Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap();
    static ref ORCID_PATH_REGEX: Regex = Regex::new(r"^/\d{4}-\d{4}-\d{4}-\d{3}[\dX]$").unwrap();
}

/// A validated record together with the warnings raised on the way
#[derive(Debug, Clone)]
pub struct Validated {
    pub record: CitationRecord,
    pub warnings: Vec<ValidationIssue>,
}

/// Validate a parsed tree, discarding warnings
pub fn validate(tree: &ParsedTree) -> Result<CitationRecord, ValidationError> {
    validate_with_warnings(tree).map(|validated| validated.record)
}

/// Validate a parsed tree, returning the record and any warnings
pub fn validate_with_warnings(tree: &ParsedTree) -> Result<Validated, ValidationError> {
    let mut checker = Checker::default();
    let record = checker.record(tree.root());

    let (errors, warnings): (Vec<_>, Vec<_>) =
        checker.issues.into_iter().partition(ValidationIssue::is_error);

    for warning in &warnings {
        tracing::warn!(path = %warning.path, "{}", warning.message);
    }

    match record {
        Some(record) if errors.is_empty() => {
            tracing::debug!(
                authors = record.authors.len(),
                identifiers = record.identifiers.len(),
                warnings = warnings.len(),
                "citation record validated"
            );
            Ok(Validated { record, warnings })
        }
        _ => Err(ValidationError { issues: errors }),
    }
}

fn child(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn index(parent: &str, i: usize) -> String {
    format!("{}[{}]", parent, i)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Null values count as absent
fn lookup<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

/// Proleptic Gregorian month length; `None` for a month outside 1..=12
fn days_in_month(year: u32, month: u32) -> Option<u32> {
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if leap => Some(29),
        2 => Some(28),
        _ => None,
    }
}

#[derive(Default)]
struct Checker {
    issues: Vec<ValidationIssue>,
}

impl Checker {
    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue::error(path, message));
    }

    fn warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue::warning(path, message));
    }

    fn record(&mut self, root: &Value) -> Option<CitationRecord> {
        let Some(map) = root.as_mapping() else {
            self.error(
                ROOT_PATH,
                format!("expected a mapping of citation fields, found {}", describe(root)),
            );
            return None;
        };

        let cff_version = self.cff_version(map);
        let message = self.required_str(map, "", "message");
        let authors = self.authors(map, "");
        let title = self.required_str(map, "", "title");

        let version = self.optional_scalar_str(map, "", "version");
        let date_released = self.date(map, "", "date-released");
        let abstract_text = self.optional_str(map, "", "abstract");
        let url = self.optional_url(map, "", "url");
        let repository_code = self.optional_url(map, "", "repository-code");
        let license = self.optional_str(map, "", "license");
        let license_url = self.optional_url(map, "", "license-url");
        let keywords = self.keywords(map);
        let identifiers = self.identifiers(map);
        let preferred_citation = match lookup(map, "preferred-citation") {
            Some(value) => self.preferred_citation(value, "preferred-citation"),
            None => None,
        };

        Some(CitationRecord {
            cff_version: cff_version?,
            message: message?,
            authors: authors?,
            title: title?,
            version,
            date_released,
            abstract_text,
            url,
            repository_code,
            license,
            license_url,
            keywords,
            identifiers,
            preferred_citation,
        })
    }

    fn cff_version(&mut self, map: &Mapping) -> Option<String> {
        let version = self.required_str(map, "", "cff-version")?;
        let Some(caps) = VERSION_REGEX.captures(&version) else {
            self.error(
                "cff-version",
                format!("'{}' is not a MAJOR.MINOR.PATCH version", version),
            );
            return None;
        };
        if &caps[1] != "1" {
            self.warning(
                "cff-version",
                format!("schema version {} is not a 1.x release", version),
            );
        }
        Some(version)
    }

    // ===== Scalars =====

    fn required_str(&mut self, map: &Mapping, parent: &str, key: &str) -> Option<String> {
        if lookup(map, key).is_none() {
            self.error(child(parent, key), "missing required key");
            return None;
        }
        self.optional_str(map, parent, key)
    }

    fn optional_str(&mut self, map: &Mapping, parent: &str, key: &str) -> Option<String> {
        let value = lookup(map, key)?;
        let path = child(parent, key);
        match value.as_str() {
            Some(s) if s.trim().is_empty() => {
                self.error(path, "must not be empty");
                None
            }
            Some(s) => Some(s.to_string()),
            None => {
                self.error(path, format!("expected a string, found {}", describe(value)));
                None
            }
        }
    }

    /// Accepts strings and numbers, keeping numbers in their written form
    fn optional_scalar_str(&mut self, map: &Mapping, parent: &str, key: &str) -> Option<String> {
        match lookup(map, key)? {
            Value::Number(n) => Some(n.to_string()),
            _ => self.optional_str(map, parent, key),
        }
    }

    /// Accepts integers and integer strings such as `"3"`
    fn optional_u32(&mut self, map: &Mapping, parent: &str, key: &str) -> Option<u32> {
        let value = lookup(map, key)?;
        let path = child(parent, key);
        let parsed = match value {
            Value::Number(n) => match n.as_u64() {
                Some(v) => u32::try_from(v).ok(),
                None if n.as_i64().is_some() => {
                    self.error(path, format!("must be a positive integer, found {}", n));
                    return None;
                }
                None => None,
            },
            Value::String(s) => s.trim().parse::<u32>().ok(),
            _ => None,
        };
        if parsed.is_none() {
            let shown = match value {
                Value::String(s) => format!("'{}'", s),
                other => describe(other).to_string(),
            };
            self.error(path, format!("expected an integer, found {}", shown));
        }
        parsed
    }

    fn positive_u32(&mut self, map: &Mapping, parent: &str, key: &str) -> Option<u32> {
        let value = self.optional_u32(map, parent, key)?;
        if value == 0 {
            self.error(child(parent, key), "must be a positive integer");
            return None;
        }
        Some(value)
    }

    fn optional_url(&mut self, map: &Mapping, parent: &str, key: &str) -> Option<String> {
        let value = self.optional_str(map, parent, key)?;
        self.check_url(&child(parent, key), &value).then_some(value)
    }

    fn check_url(&mut self, path: &str, value: &str) -> bool {
        match url::Url::parse(value) {
            Ok(_) => true,
            Err(e) => {
                self.error(path, format!("'{}' is not a valid URL: {}", value, e));
                false
            }
        }
    }

    fn check_doi(&mut self, path: &str, value: &str) {
        if !is_valid_doi(value) {
            self.warning(path, format!("'{}' does not look like a DOI (10.NNNN/...)", value));
        }
    }

    fn date(&mut self, map: &Mapping, parent: &str, key: &str) -> Option<String> {
        let value = self.optional_str(map, parent, key)?;
        let valid = DATE_REGEX.captures(&value).is_some_and(|caps| {
            let year: u32 = caps[1].parse().unwrap_or(0);
            let month: u32 = caps[2].parse().unwrap_or(0);
            let day: u32 = caps[3].parse().unwrap_or(0);
            days_in_month(year, month).is_some_and(|days| (1..=days).contains(&day))
        });
        if !valid {
            self.error(
                child(parent, key),
                format!("'{}' is not a YYYY-MM-DD date", value),
            );
            return None;
        }
        Some(value)
    }

    fn keywords(&mut self, map: &Mapping) -> Vec<String> {
        let Some(value) = lookup(map, "keywords") else {
            return Vec::new();
        };
        let Some(items) = value.as_sequence() else {
            self.error("keywords", format!("expected a list, found {}", describe(value)));
            return Vec::new();
        };
        let mut keywords = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(s) => keywords.push(s.to_string()),
                None => self.error(
                    index("keywords", i),
                    format!("expected a string, found {}", describe(item)),
                ),
            }
        }
        keywords
    }

    // ===== Authors =====

    fn authors(&mut self, map: &Mapping, parent: &str) -> Option<Vec<Author>> {
        let path = child(parent, "authors");
        let Some(value) = lookup(map, "authors") else {
            self.error(path, "missing required key");
            return None;
        };
        let Some(items) = value.as_sequence() else {
            self.error(path, format!("expected a list, found {}", describe(value)));
            return None;
        };
        if items.is_empty() {
            self.error(path, "at least one author is required");
            return None;
        }

        let before = self.issues.len();
        let authors: Vec<Author> = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| self.author(item, &index(&path, i)))
            .collect();
        let failed = self.issues[before..].iter().any(ValidationIssue::is_error);
        (!failed).then_some(authors)
    }

    fn author(&mut self, value: &Value, path: &str) -> Option<Author> {
        let Some(map) = value.as_mapping() else {
            self.error(
                path,
                format!(
                    "expected a mapping with `name` or `family-names`, found {}",
                    describe(value)
                ),
            );
            return None;
        };

        let has_name = lookup(map, "name").is_some();
        let has_family = lookup(map, "family-names").is_some();
        let email = self.optional_str(map, path, "email");

        match (has_name, has_family) {
            (true, true) => {
                self.error(
                    path,
                    "has both `name` and `family-names`; use exactly one form",
                );
                None
            }
            (false, false) => {
                self.error(path, "must have either `name` or `family-names`");
                None
            }
            (true, false) => {
                let name = self.optional_str(map, path, "name")?;
                Some(Author::Entity(EntityAuthor { name, email }))
            }
            (false, true) => {
                let family_names = self.optional_str(map, path, "family-names");
                let given_names = self.optional_str(map, path, "given-names");
                let affiliation = self.optional_str(map, path, "affiliation");
                let orcid = self.orcid(map, path);
                Some(Author::Person(PersonAuthor {
                    family_names: family_names?,
                    given_names,
                    orcid,
                    affiliation,
                    email,
                }))
            }
        }
    }

    fn orcid(&mut self, map: &Mapping, parent: &str) -> Option<String> {
        let value = self.optional_str(map, parent, "orcid")?;
        let valid = url::Url::parse(&value).is_ok_and(|u| {
            u.scheme() == "https"
                && u.host_str() == Some("orcid.org")
                && ORCID_PATH_REGEX.is_match(u.path())
        });
        if !valid {
            self.error(
                child(parent, "orcid"),
                format!("'{}' is not an https://orcid.org/NNNN-NNNN-NNNN-NNNN URL", value),
            );
            return None;
        }
        Some(value)
    }

    // ===== Identifiers =====

    fn identifiers(&mut self, map: &Mapping) -> Vec<Identifier> {
        let Some(value) = lookup(map, "identifiers") else {
            return Vec::new();
        };
        let Some(items) = value.as_sequence() else {
            self.error("identifiers", format!("expected a list, found {}", describe(value)));
            return Vec::new();
        };
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| self.identifier(item, &index("identifiers", i)))
            .collect()
    }

    fn identifier(&mut self, value: &Value, path: &str) -> Option<Identifier> {
        let Some(map) = value.as_mapping() else {
            self.error(path, format!("expected a mapping, found {}", describe(value)));
            return None;
        };

        let description = self.optional_str(map, path, "description");
        let identifier_type = self.required_str(map, path, "type").and_then(|t| {
            let parsed = IdentifierType::parse(&t);
            if parsed.is_none() {
                let allowed: Vec<&str> = IdentifierType::ALL.iter().map(|t| t.as_str()).collect();
                self.error(
                    child(path, "type"),
                    format!(
                        "unknown identifier type '{}'; expected one of {}",
                        t,
                        allowed.join(", ")
                    ),
                );
            }
            parsed
        });
        let value = self.required_str(map, path, "value");

        let (identifier_type, value) = (identifier_type?, value?);
        let value_path = child(path, "value");
        match identifier_type {
            IdentifierType::Url => {
                if !self.check_url(&value_path, &value) {
                    return None;
                }
            }
            IdentifierType::Doi => self.check_doi(&value_path, &value),
            IdentifierType::Swh | IdentifierType::Other => {}
        }

        Some(Identifier {
            description,
            identifier_type,
            value,
        })
    }

    // ===== Preferred citation =====

    fn preferred_citation(&mut self, value: &Value, path: &str) -> Option<PreferredCitation> {
        let Some(map) = value.as_mapping() else {
            self.error(path, format!("expected a mapping, found {}", describe(value)));
            return None;
        };

        let citation_type = self.required_str(map, path, "type").and_then(|t| {
            let parsed = CitationType::parse(&t);
            if parsed.is_none() {
                self.error(child(path, "type"), format!("unknown citation type '{}'", t));
            }
            parsed
        });
        let authors = self.authors(map, path);
        let title = self.required_str(map, path, "title");
        let journal = self.optional_str(map, path, "journal");
        let publisher = self.optional_str(map, path, "publisher");
        let volume = self.optional_u32(map, path, "volume");
        let number = match lookup(map, "number") {
            Some(_) => self.optional_u32(map, path, "number"),
            None => self.optional_u32(map, path, "issue"),
        };
        let pages = self.optional_scalar_str(map, path, "pages");
        let year = self.positive_u32(map, path, "year");
        let month = self.optional_u32(map, path, "month").and_then(|m| {
            if (1..=12).contains(&m) {
                Some(m as u8)
            } else {
                self.error(child(path, "month"), format!("month {} is not in 1..=12", m));
                None
            }
        });
        let doi = self.optional_str(map, path, "doi");
        if let Some(doi) = &doi {
            self.check_doi(&child(path, "doi"), doi);
        }
        let url = self.optional_url(map, path, "url");

        if citation_type == Some(CitationType::Article) && journal.is_none() {
            self.warning(child(path, "journal"), "articles should name a journal");
        }

        Some(PreferredCitation {
            citation_type: citation_type?,
            authors: authors?,
            title: title?,
            journal,
            publisher,
            volume,
            number,
            pages,
            year,
            month,
            doi,
            url,
        })
    }
}
