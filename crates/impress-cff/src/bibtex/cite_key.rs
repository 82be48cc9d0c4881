//! Cite key generation
//!
//! Keys follow the `FamilyYYYYWord` pattern: the first author's family name,
//! the year, and the first significant word of the title.

use unicode_normalization::UnicodeNormalization;

use crate::author::Author;

const STOPWORDS: [&str; 37] = [
    "a", "an", "the", "on", "in", "of", "for", "to", "and", "with", "by", "from", "as", "at",
    "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did",
    "will", "would", "could", "should", "may", "might", "must", "shall", "can", "via",
];

/// Generate a cite key from the first author, year, and title
pub fn generate_cite_key(
    first_author: Option<&Author>,
    year: Option<u32>,
    title: Option<&str>,
) -> String {
    let mut key = String::new();

    if let Some(author) = first_author {
        // Entities such as "The IDAES Project" contribute their first significant word
        let name = match author {
            Author::Person(person) => Some(person.family_names.clone()),
            Author::Entity(entity) => first_significant_word(&entity.name),
        };
        if let Some(name) = name {
            key.push_str(&normalize_for_key(&name));
        }
    }

    if let Some(year) = year {
        key.push_str(&year.to_string());
    }

    if let Some(word) = title.and_then(first_significant_word) {
        key.push_str(&normalize_for_key(&word));
    }

    if key.is_empty() {
        key = "Unknown".to_string();
    }

    key
}

/// Get first significant word from title
///
/// Skips common articles and prepositions
fn first_significant_word(title: &str) -> Option<String> {
    for word in title.split_whitespace() {
        let clean: String = word.chars().filter(|c| c.is_alphanumeric()).collect();

        if clean.is_empty() {
            continue;
        }

        if !STOPWORDS.contains(&clean.to_lowercase().as_str()) {
            return Some(clean);
        }
    }

    // If all words are stopwords, return the first word
    title
        .split_whitespace()
        .next()
        .map(|w| w.chars().filter(|c| c.is_alphanumeric()).collect())
}

/// Normalize a string for use in a cite key
///
/// - Removes diacritics
/// - Converts to ASCII
/// - Capitalizes the first letter, lowercases the rest
fn normalize_for_key(s: &str) -> String {
    s.nfkd()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
        .chars()
        .enumerate()
        .map(|(i, c)| if i == 0 { c.to_ascii_uppercase() } else { c })
        .collect()
}
