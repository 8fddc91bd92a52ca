//! Education entry extraction

use crate::processing::lexicon::{DEGREE_KEYWORDS, INSTITUTION_KEYWORDS};
use crate::processing::sections::{self, SectionType};
use crate::processing::text_processor;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub field: String,
}

static DEGREE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Bachelor of Science in Computer Science
        r"(?i)\b(?:bachelor|master|doctor)(?:'s|s)?\s+(?:of|in)\s+[a-z&]+(?:\s+[a-z&]+){0,3}",
        // B.S. Computer Science, M.B.A., B.Tech
        r"\b(?:M\.?B\.?A|B\.?Tech|M\.?Tech|Ph\.?D|B\.?Sc|M\.?Sc|B\.?S|B\.?A|M\.?S|M\.?A|B\.?E|M\.?E)\b\.?(?:\s+(?:in\s+)?[A-Z][A-Za-z&]*(?:\s+[A-Z][A-Za-z&]*)*)?",
        // Bachelor's degree, Diploma in ..., PhD
        r"(?i)\b(?:bachelor|master|phd|doctorate|diploma|certificate|associate)(?:'s|s)?\b[\w ]*",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("degree pattern compiles"))
    .collect()
});

static INSTITUTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"((?:[A-Z][A-Za-z&.'-]*\s+)*(?:University|College|Institute|School|Academy|Polytechnic)\b(?:\s+(?:of|for|in)(?:\s+(?:the\s+)?[A-Z][A-Za-z&.'-]*)+)?)",
        r"(?i)\b([a-z][a-z&.' -]{4,}?(?:university|college|institute|school|academy))",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("institution pattern compiles"))
    .collect()
});

const DISCIPLINES: &str = "Engineering|Sciences|Science|Arts|Business|Administration|Management|Computer|Information|Technology|Mathematics|Physics|Chemistry|Biology|Economics|Finance|Marketing|Accounting|Law|Medicine|Education|Design|Studies|Statistics|Psychology";

static FIELD_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let phrase = format!(r"((?:[A-Z][A-Za-z&]*\s+){{0,4}}(?:{}))\b", DISCIPLINES);
    [
        format!(r"\b(?:[Mm]ajor(?:ing|ed)?(?:\s+in)?|in)\s+{}", phrase),
        format!(r"(?:\bof\b|,)\s*{}", phrase),
        format!(r"\b{}", phrase),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("field pattern compiles"))
    .collect()
});

/// Splits a line into the comma/pipe/dash separated parts it is made of.
static SEGMENT_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,|;•·()]|\s[-–—]\s").expect("segment regex"));

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn find_degree(line: &str) -> Option<String> {
    DEGREE_PATTERNS
        .iter()
        .find_map(|p| p.find(line))
        .map(|m| m.as_str().trim().to_string())
        .filter(|d| !d.is_empty())
}

fn find_institution(line: &str) -> Option<String> {
    let segment = SEGMENT_SPLIT
        .split(line)
        .find(|s| contains_any(&s.to_lowercase(), INSTITUTION_KEYWORDS))?;

    INSTITUTION_PATTERNS.iter().find_map(|p| {
        let name = p.captures(segment)?.get(1)?.as_str().trim();
        (!name.is_empty()).then(|| name.to_string())
    })
}

fn find_field(line: &str) -> Option<String> {
    FIELD_PATTERNS.iter().find_map(|p| {
        let field = p.captures(line)?.get(1)?.as_str().trim();
        (!field.is_empty()).then(|| field.to_string())
    })
}

/// Degree text when no explicit degree pattern matched.
fn fallback_degree(line: &str) -> String {
    let first_segment = line.split(',').next().unwrap_or_default().trim();
    if !first_segment.is_empty() {
        return first_segment.to_string();
    }
    line.split_whitespace().take(3).collect::<Vec<_>>().join(" ")
}

/// Parse a single candidate line into an education entry.
pub fn parse_education_line(line: &str) -> Option<EducationEntry> {
    let lower = line.to_lowercase();
    if !contains_any(&lower, DEGREE_KEYWORDS) && !contains_any(&lower, INSTITUTION_KEYWORDS) {
        return None;
    }

    let degree = find_degree(line);
    let institution = find_institution(line);
    if degree.is_none() && institution.is_none() {
        return None;
    }

    Some(EducationEntry {
        degree: degree.unwrap_or_else(|| fallback_degree(line)),
        institution: institution.unwrap_or_default(),
        year: text_processor::first_year(line).unwrap_or_default().to_string(),
        field: find_field(line).unwrap_or_default(),
    })
}

/// Extract education entries from a resume.
pub fn extract_education(text: &str) -> Vec<EducationEntry> {
    let candidates: Vec<&str> = match sections::section_body_of(text, SectionType::Education) {
        Some(body) => body
            .lines()
            .map(str::trim)
            .filter(|l| l.chars().count() > 3)
            .collect(),
        None => text
            .lines()
            .map(str::trim)
            .filter(|l| {
                let lower = l.to_lowercase();
                contains_any(&lower, DEGREE_KEYWORDS) || contains_any(&lower, INSTITUTION_KEYWORDS)
            })
            .collect(),
    };

    candidates.into_iter().filter_map(parse_education_line).collect()
}
