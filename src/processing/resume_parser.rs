//! Structured profile extraction from plain resume text

use crate::processing::certificates::extract_certificates;
use crate::processing::education::{extract_education, EducationEntry};
use crate::processing::experience::{extract_experience, ExperienceEntry};
use crate::processing::lexicon::{self, CAPITALIZED_TERM_CAP, KEYWORD_CAP};
use crate::processing::sections::{self, SectionType};
use crate::processing::text_processor;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Everything the parser recovers from one resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeProfile {
    /// Canonical lowercase skill names, sorted.
    pub skills: BTreeSet<String>,
    /// Salient terms in first-seen order, at most [`KEYWORD_CAP`].
    pub keywords: Vec<String>,
    /// First address found, lowercased; empty when absent.
    pub email: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub certificates: Vec<String>,
}

impl ResumeProfile {
    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }
}

static SKILL_FRAGMENT_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n,;•·|/]").expect("skill fragment regex"));

/// Skills named anywhere in the text plus skills listed in a skills section.
///
/// Whole-text hits need word boundaries. Inside the skills section every
/// fragment is searched for skill substrings, so "React Native" yields both
/// `react` and `react native`, and "PostgreSQL" also yields `r`.
pub fn extract_skills(text: &str) -> BTreeSet<String> {
    let mut skills: BTreeSet<String> = lexicon::skills_with_boundaries(text)
        .into_iter()
        .map(str::to_string)
        .collect();

    if let Some(body) = sections::section_body_of(text, SectionType::Skills) {
        for fragment in SKILL_FRAGMENT_SPLIT.split(body) {
            let fragment = lexicon::strip_bullet(fragment);
            if fragment.chars().count() <= 1 {
                continue;
            }

            skills.extend(
                lexicon::skills_as_substrings(fragment)
                    .into_iter()
                    .map(str::to_string),
            );
        }
    }

    skills
}

/// Capitalized terms, lexicon terms and years, deduplicated and capped.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let capitalized = text_processor::capitalized_terms(text)
        .into_iter()
        .take(CAPITALIZED_TERM_CAP);
    let lexicon_terms = lexicon::skills_as_substrings(text)
        .into_iter()
        .map(str::to_string);
    let years = text_processor::years(text);

    let mut keywords = text_processor::dedup_preserving_order(capitalized.chain(lexicon_terms).chain(years));
    keywords.truncate(KEYWORD_CAP);
    keywords
}

/// Parse resume text into a [`ResumeProfile`].
///
/// Pure and deterministic: the same text always yields the same profile.
pub fn parse_resume(text: &str) -> ResumeProfile {
    let profile = ResumeProfile {
        skills: extract_skills(text),
        keywords: extract_keywords(text),
        email: text_processor::first_email(text).unwrap_or_default(),
        experience: extract_experience(text),
        education: extract_education(text),
        certificates: extract_certificates(text),
    };

    debug!(
        "Parsed resume: {} skills, {} keywords, {} experience, {} education, {} certificates",
        profile.skills.len(),
        profile.keywords.len(),
        profile.experience.len(),
        profile.education.len(),
        profile.certificates.len()
    );

    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\njane.doe@Example.com\n\nSKILLS:\nPython, React Native, PostgreSQL\nDocker / Kubernetes\n\nEXPERIENCE:\nJan 2020 - Present\nSenior Software Engineer at Acme Corp\n- Built billing services in TypeScript\n\nEDUCATION:\nB.S. Computer Science, Stanford University, 2019\n\nCERTIFICATIONS:\nAWS Certified Solutions Architect";

    #[test]
    fn test_full_profile() {
        let profile = parse_resume(RESUME);

        for skill in ["python", "react", "react native", "postgresql", "docker", "kubernetes", "typescript"] {
            assert!(profile.skills.contains(skill), "missing skill {skill}");
        }
        // section fragments match by substring, so "PostgreSQL" implies "r"
        assert!(profile.skills.contains("r"));

        assert_eq!(profile.email, "jane.doe@example.com");
        assert!(profile.has_email());
        assert_eq!(profile.experience.len(), 1);
        assert_eq!(profile.experience[0].company, "Acme Corp");
        assert_eq!(profile.education.len(), 1);
        assert_eq!(profile.education[0].institution, "Stanford University");
        assert_eq!(profile.certificates, vec!["AWS Certified Solutions Architect"]);
    }

    #[test]
    fn test_parsing_is_deterministic() {
        assert_eq!(parse_resume(RESUME), parse_resume(RESUME));
    }

    #[test]
    fn test_typescript_anywhere_is_a_skill() {
        let profile = parse_resume("Wrote most of the frontend in TypeScript last year.");
        assert!(profile.skills.contains("typescript"));
    }

    #[test]
    fn test_skills_section_matches_short_entries_by_substring() {
        let skills = extract_skills("Skills:\nPostgreSQL databases\n");
        let expected: BTreeSet<String> = ["postgresql", "r"].iter().map(|s| s.to_string()).collect();
        assert_eq!(skills, expected);
    }

    #[test]
    fn test_garbled_text_degrades_gracefully() {
        let garbled = [
            "\u{0}\u{1}\u{7f}%PDF-1.4 \u{fffd}\u{fffd} obj << /Length 42 >> stream",
            "SKILLS:\n\u{fffd}\u{fffd}\u{fffd}\n\nEXPERIENCE:\n— – -\n2020 -",
            "Образование: Университет 2019 ✓ 学歴 大学 ▪▪▪ @@@ a@",
            "CERTIFICATIONS:\n,,,;;;\n\u{200b}\u{200b}",
        ];

        for text in garbled {
            let first = parse_resume(text);
            assert_eq!(first, parse_resume(text));
            assert!(first.keywords.len() <= KEYWORD_CAP);
            assert!(first.email.is_empty());
        }
    }

    #[test]
    fn test_keywords_are_unique_and_capped() {
        let text = (0..40)
            .map(|i| format!("Term{} Python 2020", "abcdefghijklmnopqrstuvwxyzabcdefghijklmn".chars().nth(i).unwrap_or('a')))
            .collect::<Vec<_>>()
            .join("\n");
        let keywords = extract_keywords(&text);

        assert!(keywords.len() <= KEYWORD_CAP);
        let unique: BTreeSet<_> = keywords.iter().collect();
        assert_eq!(unique.len(), keywords.len());
        assert!(keywords.contains(&"2020".to_string()));
    }

    #[test]
    fn test_empty_text_yields_empty_profile() {
        assert_eq!(parse_resume(""), ResumeProfile::default());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(parse_resume(RESUME)).unwrap();
        assert!(json.get("certificates").is_some());
        assert!(json["education"][0].get("institution").is_some());
    }
}
