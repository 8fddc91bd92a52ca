//! Text normalization, tokenization and small scanners shared by the parser and matcher

use crate::processing::lexicon;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("Invalid email regex")
});

/// Runs of capitalized words, e.g. "Senior Engineer" or "Python".
static CAPITALIZED_PHRASE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").expect("Invalid capitalized phrase regex")
});

static YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("Invalid year regex"));

/// Normalize text into similarity tokens.
///
/// Lowercases, turns every non-alphanumeric character into a space, splits on
/// whitespace and drops tokens of two characters or fewer as well as stopwords.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|w| w.len() > 2)
        .filter(|w| !lexicon::is_stopword(w))
        .map(str::to_string)
        .collect()
}

pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// Jaccard similarity of two token sets; 0.0 when either side is empty.
pub fn jaccard(set1: &HashSet<String>, set2: &HashSet<String>) -> f64 {
    if set1.is_empty() || set2.is_empty() {
        return 0.0;
    }

    let intersection = set1.intersection(set2).count();
    let union = set1.len() + set2.len() - intersection;

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Calculate text similarity using Jaccard similarity on tokens
pub fn text_similarity(text1: &str, text2: &str) -> f64 {
    jaccard(&token_set(text1), &token_set(text2))
}

/// Capitalized phrases in document order, lowercased. Not deduplicated.
pub fn capitalized_terms(text: &str) -> Vec<String> {
    CAPITALIZED_PHRASE_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Four-digit 19xx/20xx years in document order.
pub fn years(text: &str) -> Vec<String> {
    YEAR_REGEX.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

pub fn first_year(text: &str) -> Option<&str> {
    YEAR_REGEX.find(text).map(|m| m.as_str())
}

/// The first email address in document order, lowercased.
pub fn first_email(text: &str) -> Option<String> {
    EMAIL_REGEX.find(text).map(|m| m.as_str().to_lowercase())
}

/// Keep the first occurrence of every item.
pub fn dedup_preserving_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Keep the first spelling of every item, comparing case-insensitively.
pub fn dedup_case_insensitive<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}
