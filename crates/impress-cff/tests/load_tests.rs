//! Loader integration tests against the fixture documents

mod common;

use common::fixtures::{fixture_path, load_fixture};
use impress_cff::{
    load, load_str, parse, validate, Author, CffError, CitationRecord, CitationType,
    IdentifierType, Loader, ValidationError,
};
use rstest::rstest;

fn expect_validation_error(result: Result<CitationRecord, CffError>) -> ValidationError {
    match result {
        Err(CffError::Validation(err)) => err,
        other => panic!("expected a validation error, got {:?}", other),
    }
}

// === The IDAES citation file ===

#[test]
fn test_load_idaes_citation() {
    let record = load(fixture_path("CITATION.cff")).unwrap();

    assert_eq!(record.cff_version(), "1.2.0");
    assert_eq!(record.title(), "IDAES Integrated Platform");
    assert_eq!(
        record.message(),
        "If you use this software, please cite it using the preferred citation below."
    );
    assert_eq!(record.url(), Some("https://idaes.org"));
    assert_eq!(
        record.license_url(),
        Some("https://github.com/IDAES/idaes-pse/blob/main/LICENSE.md")
    );
    assert_eq!(record.authors().len(), 1);
    assert_eq!(record.authors()[0].display_name(), "The IDAES Project");

    assert_eq!(record.identifiers().len(), 2);
    assert!(record
        .identifiers()
        .iter()
        .all(|id| id.identifier_type == IdentifierType::Url));
}

#[test]
fn test_idaes_preferred_citation() {
    let record = load(fixture_path("CITATION.cff")).unwrap();
    let citation = record.preferred_citation().expect("preferred citation");

    assert_eq!(citation.doi(), Some("doi/10.1002/amp2.10095"));
    assert_eq!(citation.authors().len(), 14);
    assert_eq!(citation.citation_type(), CitationType::Article);
    assert_eq!(
        citation.journal(),
        Some("Journal of Advanced Manufacturing and Processing")
    );
    assert_eq!(citation.publisher(), Some("Wiley"));
    assert_eq!(citation.volume(), Some(3));
    assert_eq!(citation.number(), Some(3));
    assert_eq!(citation.pages(), Some("e10095"));
    assert_eq!(citation.year(), Some(2021));

    assert_eq!(citation.authors()[0].display_name(), "Andrew Lee");
    assert_eq!(citation.authors()[12].display_name(), "David C. Miller");
    assert!(matches!(citation.authors()[13], Author::Entity(_)));
}

#[test]
fn test_idaes_citation_has_no_warnings() {
    let validated = Loader::strict()
        .load_validated(fixture_path("CITATION.cff"))
        .unwrap();
    assert!(validated.warnings.is_empty());
}

#[test]
fn test_title_matches_source_literal() {
    let source = load_fixture("software.cff");
    let record = load_str(&source).unwrap();
    assert!(source.contains(&format!("title: \"{}\"", record.title())));
}

// === Software-only citation ===

#[test]
fn test_load_software_citation() {
    let record = load(fixture_path("software.cff")).unwrap();

    assert_eq!(record.title(), "Flux Capacitor Toolkit");
    assert_eq!(record.version(), Some("2.1.0"));
    assert_eq!(record.date_released(), Some("2023-04-18"));
    assert_eq!(record.release_year(), Some(2023));
    assert_eq!(record.license(), Some("MIT"));
    assert_eq!(record.keywords(), ["simulation", "time travel"]);
    assert!(record.preferred_citation().is_none());

    let doi = record.identifier(IdentifierType::Doi).unwrap();
    assert_eq!(doi.value, "10.5281/zenodo.1234567");
    assert_eq!(doi.description.as_deref(), Some("Archived release"));
    assert!(record.identifier(IdentifierType::Swh).is_some());

    match &record.authors()[0] {
        Author::Person(person) => {
            assert_eq!(person.family_names, "Doe");
            assert_eq!(person.given_names.as_deref(), Some("Jane Q."));
            assert_eq!(person.affiliation.as_deref(), Some("Example University"));
            assert_eq!(
                person.orcid.as_deref(),
                Some("https://orcid.org/0000-0002-1825-0097")
            );
        }
        other => panic!("expected a person, got {:?}", other),
    }
}

// === Failures ===

#[rstest]
#[case("missing_authors.cff", "authors")]
#[case("unknown_identifier_type.cff", "identifiers[0].type")]
#[case("non_numeric_year.cff", "preferred-citation.year")]
fn test_invalid_fixture_reports_path(#[case] fixture: &str, #[case] path: &str) {
    let err = expect_validation_error(load(fixture_path(fixture)));
    assert!(
        err.references(path),
        "expected an issue at {}, got {:?}",
        path,
        err.issues
    );
}

#[test]
fn test_missing_authors_is_the_only_issue() {
    let err = expect_validation_error(load(fixture_path("missing_authors.cff")));
    assert_eq!(err.issues.len(), 1);
    assert_eq!(err.issues[0].path, "authors");
    assert_eq!(err.issues[0].message, "missing required key");
}

#[test]
fn test_unknown_identifier_type_names_allowed_values() {
    let err = expect_validation_error(load(fixture_path("unknown_identifier_type.cff")));
    let issue = err.first().unwrap();
    assert!(issue.message.contains("'ftp'"));
    assert!(issue.message.contains("url, doi, swh, other"));
}

#[test]
fn test_malformed_yaml_is_parse_error() {
    match load(fixture_path("malformed.cff")) {
        Err(CffError::Parse(err)) => assert!(err.line.is_some()),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_violations_are_accumulated() {
    let yaml = r#"
cff-version: 1.2.0
message: m
title: t
authors:
  - family-names: Lee
  - 42
identifiers:
  - type: ftp
    value: x
  - type: url
    value: "not a url"
preferred-citation:
  type: article
  authors:
    - name: X
  title: P
  journal: J
  year: soon
"#;
    let err = expect_validation_error(load_str(yaml));
    let paths: Vec<&str> = err.issues.iter().map(|i| i.path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "authors[1]",
            "identifiers[0].type",
            "identifiers[1].value",
            "preferred-citation.year",
        ]
    );
}

#[test]
fn test_parse_then_validate_matches_load() {
    let source = load_fixture("CITATION.cff");
    let tree = parse(&source).unwrap();
    let record = validate(&tree).unwrap();
    assert_eq!(record, load_str(&source).unwrap());
}

#[test]
fn test_load_from_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CITATION.cff");
    std::fs::write(
        &path,
        "cff-version: 1.2.0\nmessage: m\ntitle: Temp\nauthors:\n  - name: T\n",
    )
    .unwrap();

    let record = load(&path).unwrap();
    assert_eq!(record.title(), "Temp");
}
