//! DOI normalization and syntax checks

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // 10.<registrant>/<suffix>; registrant codes are 4-9 digits, optionally dotted
    static ref DOI_REGEX: Regex = Regex::new(r"^10\.\d{4,9}(?:\.\d+)*/\S+$").unwrap();
}

const DOI_PREFIXES: [&str; 6] = [
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
    "doi:",
    "doi/",
];

/// Strip resolver and scheme prefixes, leaving the bare `10.xxxx/...` form.
///
/// Prefix matching is case-insensitive; the DOI itself is returned as written
/// minus trailing punctuation.
pub fn normalize_doi(doi: &str) -> String {
    let mut s = doi.trim();
    loop {
        let lower = s.to_ascii_lowercase();
        match DOI_PREFIXES.iter().find(|p| lower.starts_with(*p)) {
            Some(prefix) => s = s[prefix.len()..].trim_start(),
            None => break,
        }
    }
    s.trim_end_matches(['.', ',', ';']).to_string()
}

/// Whether `doi` looks like a DOI once normalized
pub fn is_valid_doi(doi: &str) -> bool {
    DOI_REGEX.is_match(&normalize_doi(doi))
}

/// Resolver URL for a DOI
pub fn doi_url(doi: &str) -> String {
    format!("https://doi.org/{}", normalize_doi(doi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_doi_variants() {
        assert_eq!(normalize_doi("10.1002/amp2.10095"), "10.1002/amp2.10095");
        assert_eq!(normalize_doi("doi/10.1002/amp2.10095"), "10.1002/amp2.10095");
        assert_eq!(normalize_doi("doi:10.1038/nature12373"), "10.1038/nature12373");
        assert_eq!(
            normalize_doi("https://doi.org/10.1038/nature12373."),
            "10.1038/nature12373"
        );
        assert_eq!(
            normalize_doi("HTTPS://DX.DOI.ORG/10.1038/nature12373"),
            "10.1038/nature12373"
        );
    }

    #[test]
    fn test_is_valid_doi() {
        assert!(is_valid_doi("10.1002/amp2.10095"));
        assert!(is_valid_doi("doi/10.1002/amp2.10095"));
        assert!(is_valid_doi("10.5281/zenodo.1234567"));
        assert!(!is_valid_doi("amp2.10095"));
        assert!(!is_valid_doi("10.12/too-short"));
        assert!(!is_valid_doi(""));
    }

    #[test]
    fn test_doi_url() {
        assert_eq!(
            doi_url("doi/10.1002/amp2.10095"),
            "https://doi.org/10.1002/amp2.10095"
        );
    }
}
