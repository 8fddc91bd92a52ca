//! Work experience extraction
//!
//! Inside an experience section lines are scanned left to right while a
//! [`PartialEntry`] accumulates company, position, duration and description.
//! A duration line flushes the running entry and opens the next one. When the
//! section yields nothing, [`extract_from_whole_text`] looks for date ranges
//! anywhere in the document instead.

use crate::processing::lexicon::{self, BULLET_PREFIX};
use crate::processing::sections::{self, SectionType};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const UNKNOWN: &str = "Unknown";

/// Lines longer than this are treated as prose when nothing else matches.
const DESCRIPTION_MIN_CHARS: usize = 30;
/// Same threshold for the whole-document fallback.
const FALLBACK_DESCRIPTION_MIN_CHARS: usize = 20;
/// Lines following a date range that may feed the fallback description.
const FALLBACK_DESCRIPTION_LINES: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
}

const MONTH: &str = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?";
const OPEN_END: &str = r"present|current|now";

/// Date ranges in priority order: month names, numeric months, bare years.
static DURATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!(r"(?i)\b{m}\s+\d{{4}}\s*[-–—]\s*(?:{m}\s+\d{{4}}|{o})\b", m = MONTH, o = OPEN_END),
        format!(r"(?i)\b\d{{1,2}}/\d{{4}}\s*[-–—]\s*(?:\d{{1,2}}/\d{{4}}|{o})\b", o = OPEN_END),
        format!(r"(?i)\b\d{{4}}\s*[-–—]\s*(?:\d{{4}}|{o})\b", o = OPEN_END),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("duration pattern compiles"))
    .collect()
});

const COMPANY_SUFFIXES: &str =
    "Inc|LLC|Ltd|Corp|Corporation|Company|Co|Technologies|Systems|Solutions|Group|Labs";
const ROLE_NOUNS: &str = "engineer|developer|manager|analyst|designer|specialist|architect|consultant|programmer|coordinator|assistant|director|officer|executive|representative|intern|trainee|lead|scientist|administrator";
const SENIORITY: &str = "senior|sr\\.?|junior|jr\\.?|lead|principal|staff|associate|mid|entry|chief|head";

/// Company detectors tried in order. The last one is only consulted when the
/// line did not already yield a position title.
static COMPANY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!(r"\b((?:[A-Z][A-Za-z0-9&.'-]*\s+){{0,4}}(?:{})\b\.?)", COMPANY_SUFFIXES),
        r"\b((?:[A-Z][A-Za-z0-9&.'-]*\s+){0,4}(?:University|College|Institute|School)\b)".to_string(),
        r"^([A-Z][A-Za-z&.,' -]{3,})".to_string(),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("company pattern compiles"))
    .collect()
});

static POSITION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!(r"(?i)\b((?:{s})[\s-]+(?:[a-z]+\s+){{0,3}}?(?:{r}))\b", s = SENIORITY, r = ROLE_NOUNS),
        format!(r"\b((?:[A-Z][A-Za-z/&-]*\s+){{0,3}}(?i:{r}))\b", r = ROLE_NOUNS),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("position pattern compiles"))
    .collect()
});

/// Characters trimmed off a position left over after removing a date range.
const SEPARATORS: &[char] = &['|', ',', '-', '–', '—', ':', '@', '(', ')', ' '];

fn find_duration(line: &str) -> Option<regex::Match<'_>> {
    DURATION_PATTERNS.iter().find_map(|p| p.find(line))
}

fn find_company(line: &str, allow_fallback: bool) -> Option<String> {
    let patterns = if allow_fallback {
        &COMPANY_PATTERNS[..]
    } else {
        &COMPANY_PATTERNS[..COMPANY_PATTERNS.len() - 1]
    };

    patterns.iter().find_map(|p| {
        let name = p.captures(line)?.get(1)?.as_str().trim();
        let len = name.chars().count();
        (len > 3 && len < 50).then(|| name.to_string())
    })
}

fn find_position(line: &str) -> Option<String> {
    POSITION_PATTERNS.iter().find_map(|p| {
        let title = p.captures(line)?.get(1)?.as_str().trim();
        (!title.is_empty()).then(|| title.to_string())
    })
}

fn remove_span(line: &str, span: &regex::Match<'_>) -> String {
    format!("{} {}", &line[..span.start()], &line[span.end()..])
        .trim()
        .trim_matches(SEPARATORS)
        .to_string()
}

/// Join description fragments as sentences.
fn join_sentences(fragments: &[String]) -> String {
    fragments
        .iter()
        .map(|f| format!("{}.", f.trim_end_matches('.')))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The entry being assembled while scanning an experience section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialEntry {
    pub company: Option<String>,
    pub position: Option<String>,
    pub duration: Option<String>,
    pub description: Vec<String>,
}

impl PartialEntry {
    fn starting_at(duration: &str) -> Self {
        Self {
            duration: Some(duration.to_string()),
            ..Self::default()
        }
    }

    /// An entry is only worth emitting once it knows who or what.
    pub fn has_identity(&self) -> bool {
        self.company.is_some() || self.position.is_some()
    }

    /// Turn the partial entry into a finished one, filling placeholders.
    pub fn flush(self) -> Option<ExperienceEntry> {
        if !self.has_identity() {
            return None;
        }

        Some(ExperienceEntry {
            company: self.company.unwrap_or_else(|| UNKNOWN.to_string()),
            position: self.position.unwrap_or_else(|| UNKNOWN.to_string()),
            duration: self.duration.unwrap_or_else(|| UNKNOWN.to_string()),
            description: join_sentences(&self.description),
        })
    }
}

/// Left-to-right scan state over the lines of an experience section.
#[derive(Debug, Default)]
pub struct ExperienceScan {
    current: PartialEntry,
    entries: Vec<ExperienceEntry>,
}

impl ExperienceScan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, raw_line: &str) {
        let line = raw_line.trim();

        if BULLET_PREFIX.is_match(line) {
            let text = lexicon::strip_bullet(line);
            if !text.is_empty() {
                self.current.description.push(text.to_string());
            }
            return;
        }

        let duration = find_duration(line);
        let rest = match &duration {
            Some(span) => {
                let previous = std::mem::replace(&mut self.current, PartialEntry::starting_at(span.as_str()));
                self.entries.extend(previous.flush());
                remove_span(line, span)
            }
            None => line.to_string(),
        };

        let mut assigned = false;

        let position = find_position(&rest);
        if self.current.position.is_none() {
            if let Some(title) = &position {
                self.current.position = Some(title.clone());
                assigned = true;
            }
        }

        if self.current.company.is_none() {
            if let Some(company) = find_company(&rest, position.is_none()) {
                self.current.company = Some(company);
                assigned = true;
            }
        }

        if duration.is_none() && !assigned && line.chars().count() > DESCRIPTION_MIN_CHARS {
            self.current.description.push(line.to_string());
        }
    }

    pub fn finish(mut self) -> Vec<ExperienceEntry> {
        self.entries.extend(self.current.flush());
        self.entries
    }
}

/// Extract experience entries from a resume.
pub fn extract_experience(text: &str) -> Vec<ExperienceEntry> {
    let Some(body) = sections::section_body_of(text, SectionType::Experience) else {
        return extract_from_whole_text(text);
    };

    let mut scan = ExperienceScan::new();
    for line in body.lines().filter(|l| l.trim().chars().count() > 3) {
        scan.feed(line);
    }

    let entries = scan.finish();
    if entries.is_empty() {
        extract_from_whole_text(text)
    } else {
        entries
    }
}

/// Fallback: every line holding a date range becomes an entry.
pub fn extract_from_whole_text(text: &str) -> Vec<ExperienceEntry> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| l.chars().count() > 5)
        .collect();

    let mut entries = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some(span) = find_duration(line) else {
            continue;
        };

        let position = remove_span(line, &span);
        let description: Vec<String> = lines[idx + 1..]
            .iter()
            .take(FALLBACK_DESCRIPTION_LINES)
            .take_while(|next| {
                find_duration(next).is_none()
                    && (BULLET_PREFIX.is_match(next)
                        || next.chars().count() > FALLBACK_DESCRIPTION_MIN_CHARS)
            })
            .map(|next| lexicon::strip_bullet(next).to_string())
            .collect();

        entries.push(ExperienceEntry {
            company: UNKNOWN.to_string(),
            position: if position.is_empty() { UNKNOWN.to_string() } else { position },
            duration: span.as_str().to_string(),
            description: join_sentences(&description),
        });
    }

    entries
}
