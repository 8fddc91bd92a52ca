//! ATS (Applicant Tracking System) keyword matching and scoring

use crate::processing::lexicon::{self, CAPITALIZED_TERM_CAP, KEYWORD_CAP};
use crate::processing::text_processor;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Percentage at or above which a candidate is shortlisted.
pub const SHORTLIST_THRESHOLD: u8 = 80;
/// Percentage at or above which a candidate is kept as low priority.
pub const LOW_PRIORITY_THRESHOLD: u8 = 50;

pub const KEYWORD_WEIGHT: f64 = 0.4;
pub const SKILL_WEIGHT: f64 = 0.4;
pub const SIMILARITY_WEIGHT: f64 = 0.2;

static YEARS_OF_EXPERIENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+\+?\s*(?:years?|yrs?)\s*(?:of\s*)?(?:experience|exp)")
        .expect("Invalid years-of-experience regex")
});

static EDUCATION_LEVELS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:bachelor|master|phd|doctorate|diploma)\s*(?:degree|in|of)?",
        r"(?i)\b(?:bs|ms|mba|phd|b\.?s\.?|m\.?s\.?|b\.?a\.?|m\.?a\.?)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid education level regex"))
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Shortlisted,
    LowPriority,
    Rejected,
}

impl MatchStatus {
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= SHORTLIST_THRESHOLD {
            MatchStatus::Shortlisted
        } else if percentage >= LOW_PRIORITY_THRESHOLD {
            MatchStatus::LowPriority
        } else {
            MatchStatus::Rejected
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Shortlisted => "shortlisted",
            MatchStatus::LowPriority => "low_priority",
            MatchStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "shortlisted" => Ok(MatchStatus::Shortlisted),
            "low_priority" => Ok(MatchStatus::LowPriority),
            "rejected" => Ok(MatchStatus::Rejected),
            other => Err(format!(
                "Unknown status '{}'. Use shortlisted, low_priority or rejected",
                other
            )),
        }
    }
}

/// The three weighted components behind a score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub keyword_ratio: f64,
    pub skill_ratio: f64,
    pub text_similarity: f64,
}

impl ScoreBreakdown {
    pub fn weighted_score(&self) -> f64 {
        let score = KEYWORD_WEIGHT * self.keyword_ratio
            + SKILL_WEIGHT * self.skill_ratio
            + SIMILARITY_WEIGHT * self.text_similarity;
        score.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub match_score: f64,
    pub match_percentage: u8,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub status: MatchStatus,
    pub breakdown: ScoreBreakdown,
}

/// Keywords, skills and tokens derived from one job description.
///
/// Extraction is independent of any resume, so a batch builds this once
/// and scores every candidate against it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobRequirements {
    pub keywords: Vec<String>,
    pub skills: Vec<String>,
    tokens: HashSet<String>,
}

impl JobRequirements {
    pub fn extract(job_description: &str) -> Self {
        Self {
            keywords: extract_jd_keywords(job_description),
            skills: extract_jd_skills(job_description),
            tokens: text_processor::token_set(job_description),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.skills.is_empty() && self.tokens.is_empty()
    }

    /// Score a resume against these requirements.
    pub fn score<K, S>(&self, resume_keywords: K, resume_skills: S, resume_text: &str) -> MatchResult
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let resume_keywords = lowercase_all(resume_keywords);
        let resume_skills = lowercase_all(resume_skills);
        let resume_lower = resume_text.to_lowercase();

        let mut matched = Vec::new();
        let mut missing = Vec::new();

        let mut keyword_hits = 0;
        for keyword in &self.keywords {
            if is_present(keyword, &resume_keywords, &resume_lower) {
                keyword_hits += 1;
                matched.push(keyword.clone());
            } else {
                missing.push(keyword.clone());
            }
        }

        let mut skill_hits = 0;
        for skill in &self.skills {
            if is_present(skill, &resume_skills, &resume_lower) {
                skill_hits += 1;
                matched.push(skill.clone());
            } else {
                missing.push(skill.clone());
            }
        }

        let breakdown = ScoreBreakdown {
            keyword_ratio: ratio(keyword_hits, self.keywords.len()),
            skill_ratio: ratio(skill_hits, self.skills.len()),
            text_similarity: text_processor::jaccard(
                &text_processor::token_set(&resume_lower),
                &self.tokens,
            ),
        };

        let matched_keywords = text_processor::dedup_preserving_order(matched);
        let matched_set: HashSet<&str> = matched_keywords.iter().map(String::as_str).collect();
        let missing_keywords = text_processor::dedup_preserving_order(missing)
            .into_iter()
            .filter(|k| !matched_set.contains(k.as_str()))
            .collect();

        let match_score = breakdown.weighted_score();
        let match_percentage = (match_score * 100.0).round() as u8;

        MatchResult {
            match_score,
            match_percentage,
            matched_keywords,
            missing_keywords,
            status: MatchStatus::from_percentage(match_percentage),
            breakdown,
        }
    }
}

/// Match a resume against a job description in one call.
pub fn match_resume<K, S>(
    resume_keywords: K,
    resume_skills: S,
    resume_text: &str,
    job_description: &str,
) -> MatchResult
where
    K: IntoIterator,
    K::Item: AsRef<str>,
    S: IntoIterator,
    S::Item: AsRef<str>,
{
    JobRequirements::extract(job_description).score(resume_keywords, resume_skills, resume_text)
}

/// Capitalized terms, requirement terms, years-of-experience phrases and
/// education levels, deduplicated and capped.
pub fn extract_jd_keywords(job_description: &str) -> Vec<String> {
    let capitalized = text_processor::capitalized_terms(job_description)
        .into_iter()
        .filter(|term| term.chars().count() > 2 && !lexicon::is_stopword(term))
        .take(CAPITALIZED_TERM_CAP);

    let requirements = lexicon::requirement_terms_in(job_description)
        .into_iter()
        .map(str::to_string);

    let years = YEARS_OF_EXPERIENCE
        .find_iter(job_description)
        .map(|m| m.as_str().to_lowercase());

    let education = EDUCATION_LEVELS.iter().flat_map(|pattern| {
        pattern
            .find_iter(job_description)
            .map(|m| m.as_str().trim().to_lowercase())
    });

    let mut keywords = text_processor::dedup_preserving_order(
        capitalized
            .chain(requirements)
            .chain(years)
            .chain(education)
            .filter(|k| !k.is_empty()),
    );
    keywords.truncate(KEYWORD_CAP);
    keywords
}

/// Lexicon skills named in the job description as whole tokens.
pub fn extract_jd_skills(job_description: &str) -> Vec<String> {
    lexicon::skills_with_boundaries(job_description)
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn lowercase_all<I>(items: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| item.as_ref().trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Bidirectional containment against `candidates`, or verbatim presence in the text.
fn is_present(term: &str, candidates: &[String], resume_lower: &str) -> bool {
    candidates.iter().any(|candidate| contains_loosely(candidate, term))
        || resume_lower.contains(term)
}

/// Either term contains the other. Short terms such as "go" or "r" match
/// generously; scores depend on this.
fn contains_loosely(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

fn ratio(hits: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}
