//! Section detection for resume text
//!
//! A section is located by trying every header alias of a [`SectionType`] in
//! order, and for each alias every [`SectionStrategy`] from strictest to
//! loosest. The first candidate whose body is longer than
//! [`MIN_SECTION_CHARS`] wins.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Bodies this short are treated as a false hit (e.g. a header in a sentence).
pub const MIN_SECTION_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionType {
    Skills,
    Experience,
    Education,
    Certifications,
}

impl SectionType {
    pub const ALL: [SectionType; 4] = [
        SectionType::Skills,
        SectionType::Experience,
        SectionType::Education,
        SectionType::Certifications,
    ];

    /// Header aliases in priority order.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            SectionType::Skills => &[
                "skills",
                "technical skills",
                "core competencies",
                "expertise",
                "technologies",
                "tools",
                "programming languages",
                "languages",
            ],
            SectionType::Experience => &[
                "experience",
                "work experience",
                "employment",
                "professional experience",
                "work history",
                "career",
                "positions",
            ],
            SectionType::Education => &[
                "education",
                "academic",
                "qualifications",
                "academic background",
                "educational background",
            ],
            SectionType::Certifications => &[
                "certifications",
                "certificates",
                "licenses",
                "credentials",
                "professional certifications",
                "certifications & licenses",
            ],
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionType::Skills => write!(f, "Skills"),
            SectionType::Experience => write!(f, "Experience"),
            SectionType::Education => write!(f, "Education"),
            SectionType::Certifications => write!(f, "Certifications"),
        }
    }
}

/// How strictly a header alias must be positioned to open a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionStrategy {
    /// Alias at the start of a line, header line ends with a newline.
    AnchoredLine,
    /// Alias anywhere, header still ends with a newline.
    AnyHeaderLine,
    /// Alias anywhere, body starts right after it on the same line.
    Inline,
}

impl SectionStrategy {
    pub const ORDERED: [SectionStrategy; 3] = [
        SectionStrategy::AnchoredLine,
        SectionStrategy::AnyHeaderLine,
        SectionStrategy::Inline,
    ];

    fn header_pattern(&self, alias: &str) -> String {
        let alias = regex::escape(alias);
        match self {
            SectionStrategy::AnchoredLine => format!(r"(?im)^{}[\s:]*\n", alias),
            SectionStrategy::AnyHeaderLine => format!(r"(?i){}[\s:]*\n", alias),
            SectionStrategy::Inline => format!(r"(?i){}[\s:]*", alias),
        }
    }
}

/// A blank line followed by a `HEADER:` line closes the running section.
static SECTION_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\n\n[A-Z][A-Z\s]+:").expect("Invalid section end regex"));

struct HeaderMatcher {
    strategy: SectionStrategy,
    regex: Regex,
}

static HEADER_MATCHERS: LazyLock<HashMap<SectionType, Vec<HeaderMatcher>>> = LazyLock::new(|| {
    SectionType::ALL
        .iter()
        .map(|section| {
            let matchers = section
                .aliases()
                .iter()
                .flat_map(|alias| {
                    SectionStrategy::ORDERED.iter().map(move |strategy| HeaderMatcher {
                        strategy: *strategy,
                        regex: Regex::new(&strategy.header_pattern(alias))
                            .expect("section header pattern compiles"),
                    })
                })
                .collect();
            (*section, matchers)
        })
        .collect()
});

/// A located section body, borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    pub section_type: SectionType,
    pub strategy: SectionStrategy,
    pub body: &'a str,
}

/// Find the body of `section` in `text`, if any.
pub fn find_section(text: &str, section: SectionType) -> Option<Section<'_>> {
    let matchers = HEADER_MATCHERS.get(&section)?;

    matchers.iter().find_map(|matcher| {
        let header = matcher.regex.find(text)?;
        let body = section_body(text, header.end());
        (body.chars().count() > MIN_SECTION_CHARS).then_some(Section {
            section_type: section,
            strategy: matcher.strategy,
            body,
        })
    })
}

/// Convenience wrapper returning only the trimmed body.
pub fn section_body_of(text: &str, section: SectionType) -> Option<&str> {
    find_section(text, section).map(|s| s.body)
}

fn section_body(text: &str, start: usize) -> &str {
    let end = SECTION_END
        .find_at(text, start)
        .map(|m| m.start())
        .unwrap_or(text.len());
    text[start..end].trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\n\nSUMMARY:\nBackend developer\n\nSKILLS:\nRust, Python, PostgreSQL\nDocker, Kubernetes\n\nEXPERIENCE:\nJan 2020 - Present\nSenior Engineer at Acme Corp\n- Built billing services\n\nEDUCATION:\nB.S. Computer Science, Stanford University, 2019";

    #[test]
    fn test_anchored_section_stops_at_next_header() {
        let section = find_section(RESUME, SectionType::Skills).unwrap();
        assert_eq!(section.strategy, SectionStrategy::AnchoredLine);
        assert_eq!(section.body, "Rust, Python, PostgreSQL\nDocker, Kubernetes");
    }

    #[test]
    fn test_last_section_runs_to_end_of_text() {
        let body = section_body_of(RESUME, SectionType::Education).unwrap();
        assert_eq!(body, "B.S. Computer Science, Stanford University, 2019");
    }

    #[test]
    fn test_inline_header_falls_back_to_loosest_strategy() {
        let text = "Skills: Python, React, AWS\nemail: a@b.com";
        let section = find_section(text, SectionType::Skills).unwrap();
        assert_eq!(section.strategy, SectionStrategy::Inline);
        assert_eq!(section.body, "Python, React, AWS\nemail: a@b.com");
    }

    #[test]
    fn test_short_bodies_are_rejected() {
        assert!(find_section("Skills: Go", SectionType::Skills).is_none());
        assert!(find_section("nothing relevant here", SectionType::Certifications).is_none());
    }

    #[test]
    fn test_aliases_are_escaped() {
        let text = "Certifications & Licenses\nAWS Certified Solutions Architect";
        let body = section_body_of(text, SectionType::Certifications).unwrap();
        assert!(body.contains("AWS Certified Solutions Architect"));
    }
}
