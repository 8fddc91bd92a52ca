//! Shared lexicons for resume and job description analysis
//!
//! Everything here is process-wide, read-only data. Compiled matchers are
//! built once on first use and never mutated afterwards.

use aho_corasick::{AhoCorasick, MatchKind};
use regex::{Regex, RegexSet};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Maximum number of keywords kept for a resume or job description.
pub const KEYWORD_CAP: usize = 30;

/// Maximum number of capitalized terms contributing to the keyword list.
pub const CAPITALIZED_TERM_CAP: usize = 20;

/// Canonical technical skills, grouped by area. Matching is case-insensitive.
pub const TECHNICAL_SKILLS: &[&str] = &[
    // Programming languages
    "javascript", "typescript", "python", "java", "c++", "c#", "go", "rust", "php", "ruby",
    "swift", "kotlin", "scala", "r", "matlab", "perl", "shell", "bash", "powershell",
    // Frontend
    "react", "vue", "angular", "svelte", "next.js", "nuxt", "gatsby", "remix",
    "html", "css", "sass", "scss", "less", "tailwind", "bootstrap", "material-ui", "ant design",
    // Backend
    "node", "express", "django", "flask", "fastapi", "spring", "spring boot", "laravel", "symfony",
    "nest.js", "koa", "hapi", "rails", "asp.net", "dotnet", ".net",
    // Databases
    "mongodb", "postgresql", "mysql", "mariadb", "sqlite", "oracle", "sql server", "redis",
    "elasticsearch", "cassandra", "dynamodb", "couchdb", "neo4j", "firebase", "supabase",
    // Cloud & DevOps
    "aws", "azure", "gcp", "google cloud", "docker", "kubernetes", "terraform", "ansible", "chef",
    "puppet", "jenkins", "github actions", "gitlab ci", "circleci", "travis ci", "azure devops",
    "git", "svn", "mercurial", "ci/cd", "continuous integration", "continuous deployment",
    // Tools & technologies
    "rest", "graphql", "soap", "microservices", "api", "web services", "json", "xml", "yaml",
    "linux", "unix", "windows", "macos", "nginx", "apache", "iis",
    // Data & analytics
    "machine learning", "ml", "ai", "artificial intelligence", "data science", "analytics",
    "big data", "tensorflow", "pytorch", "keras", "scikit-learn", "pandas", "numpy", "jupyter",
    "tableau", "power bi",
    // Methodologies & testing
    "agile", "scrum", "kanban", "devops", "testing", "tdd", "bdd", "unit testing",
    "integration testing", "selenium", "cypress", "jest", "mocha", "jasmine", "pytest", "junit",
    // Mobile
    "react native", "flutter", "ionic", "xamarin", "android", "ios",
    // Other
    "blockchain", "ethereum", "solidity", "web3", "cybersecurity", "penetration testing",
];

/// Words signalling a degree on an education line.
pub const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor", "master", "phd", "doctorate", "diploma", "certificate", "degree",
];

/// Nouns that mark an education institution.
pub const INSTITUTION_KEYWORDS: &[&str] = &[
    "university", "college", "institute", "school", "academy", "polytechnic",
];

/// Words signalling a certification.
pub const CERT_KEYWORDS: &[&str] = &[
    "certified", "certification", "certificate", "license", "accredited",
];

/// Vendors whose name alone marks a line in a certifications section.
pub const CERT_VENDORS: &[&str] = &["aws", "google", "microsoft", "oracle", "cisco"];

/// Requirement and soft-skill terms looked up verbatim in a job description.
pub const REQUIREMENT_TERMS: &[&str] = &[
    "experience", "years", "required", "preferred", "must have", "should have", "nice to have",
    "knowledge", "understanding", "familiar", "proficient", "expert", "advanced", "intermediate",
    "bachelor", "master", "degree", "certification", "diploma", "phd", "doctorate",
    "responsibilities", "duties", "qualifications", "requirements", "skills", "abilities",
    "team", "collaboration", "communication", "leadership", "management", "problem solving",
];

/// Function words dropped from capitalized terms and similarity tokens.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "or", "but", "for", "with", "from", "this", "that",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Substring automaton over the lexicon, used for loose "present anywhere" checks.
static SKILL_AUTOMATON: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::Standard)
        .build(TECHNICAL_SKILLS)
        .expect("skill lexicon is a valid pattern list")
});

/// Substring automaton over the requirement terms.
static REQUIREMENT_AUTOMATON: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::Standard)
        .build(REQUIREMENT_TERMS)
        .expect("requirement terms are a valid pattern list")
});

/// One boundary-aware regex per lexicon entry, in lexicon order.
static SKILL_BOUNDARY_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    let patterns: Vec<String> = TECHNICAL_SKILLS.iter().map(|s| boundary_pattern(s)).collect();
    RegexSet::new(patterns).expect("skill boundary patterns compile")
});

/// Build a case-insensitive pattern that only matches `term` as a whole token.
///
/// `\b` is only meaningful next to a word character, so entries such as
/// `c++` or `.net` get an explicit non-word/edge guard on that side instead.
pub fn boundary_pattern(term: &str) -> String {
    let escaped = regex::escape(term);
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    let left = match term.chars().next() {
        Some(c) if is_word(c) => r"\b",
        _ => r"(?:^|[^\w])",
    };
    let right = match term.chars().last() {
        Some(c) if is_word(c) => r"\b",
        _ => r"(?:$|[^\w])",
    };

    format!("(?i){}{}{}", left, escaped, right)
}

/// Lexicon skills appearing as whole tokens in `text`, in lexicon order.
pub fn skills_with_boundaries(text: &str) -> Vec<&'static str> {
    let hits = SKILL_BOUNDARY_SET.matches(text);
    hits.iter().map(|idx| TECHNICAL_SKILLS[idx]).collect()
}

/// Lexicon skills contained anywhere in `text` (plain substring), in lexicon order.
pub fn skills_as_substrings(text: &str) -> Vec<&'static str> {
    contained_terms(&SKILL_AUTOMATON, TECHNICAL_SKILLS, text)
}

/// Requirement terms contained anywhere in `text`, in list order.
pub fn requirement_terms_in(text: &str) -> Vec<&'static str> {
    contained_terms(&REQUIREMENT_AUTOMATON, REQUIREMENT_TERMS, text)
}

fn contained_terms(
    automaton: &AhoCorasick,
    terms: &'static [&'static str],
    text: &str,
) -> Vec<&'static str> {
    let mut found = vec![false; terms.len()];
    for mat in automaton.find_overlapping_iter(text) {
        found[mat.pattern().as_usize()] = true;
    }

    terms
        .iter()
        .zip(found)
        .filter_map(|(term, hit)| hit.then_some(*term))
        .collect()
}

pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

/// A line opening with a bullet glyph.
pub static BULLET_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-•·*▪◦]\s*").expect("bullet regex"));

pub fn strip_bullet(line: &str) -> &str {
    match BULLET_PREFIX.find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_has_no_duplicates() {
        let unique: HashSet<_> = TECHNICAL_SKILLS.iter().collect();
        assert_eq!(unique.len(), TECHNICAL_SKILLS.len());
        assert_eq!(TECHNICAL_SKILLS.len(), 149);
    }

    #[test]
    fn test_database_names_do_not_imply_generic_sql() {
        let skills = skills_as_substrings("PostgreSQL and MySQL");
        assert!(skills.contains(&"postgresql"));
        assert!(skills.contains(&"mysql"));
        assert!(!skills.contains(&"sql"));
        assert!(!TECHNICAL_SKILLS.contains(&"nosql"));
    }

    #[test]
    fn test_boundary_matching_respects_words() {
        let skills = skills_with_boundaries("Built services in TypeScript and Go.");
        assert!(skills.contains(&"typescript"));
        assert!(skills.contains(&"go"));

        // "go" inside "google" is not a whole token
        let skills = skills_with_boundaries("worked at google");
        assert!(!skills.contains(&"go"));
    }

    #[test]
    fn test_boundary_matching_handles_metacharacters() {
        let skills = skills_with_boundaries("Languages: C++, C#, .NET and Node.js");
        assert!(skills.contains(&"c++"));
        assert!(skills.contains(&"c#"));
        assert!(skills.contains(&".net"));
        assert!(skills.contains(&"node"));
    }

    #[test]
    fn test_substring_matching_is_loose() {
        let skills = skills_as_substrings("email me");
        // "ai" is contained in "email"
        assert!(skills.contains(&"ai"));
    }

    #[test]
    fn test_requirement_terms() {
        let terms = requirement_terms_in("5 years experience required, strong communication");
        assert_eq!(terms, vec!["experience", "years", "required", "communication"]);
    }

    #[test]
    fn test_strip_bullet() {
        assert_eq!(strip_bullet("• Led a team"), "Led a team");
        assert_eq!(strip_bullet("- Shipped v2"), "Shipped v2");
        assert_eq!(strip_bullet("Plain line"), "Plain line");
    }
}
