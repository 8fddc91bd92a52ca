//! Certification extraction

use crate::processing::lexicon::{self, CERT_KEYWORDS, CERT_VENDORS};
use crate::processing::sections::{self, SectionType};
use crate::processing::text_processor;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static CERT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:certified|certification|certificate|licensed|license)\b\s*")
        .expect("cert prefix regex")
});

static SECTION_ITEM_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n,;]").expect("cert split regex"));

/// Vendor certifications and "Certified ... Professional" style titles.
static CERT_TEMPLATES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b(?i:AWS|Google|Microsoft|Oracle|Cisco|Salesforce|Adobe|IBM|Red Hat|VMware)[\s\w]+?(?i:Certified|Certification|Certificate)\b(?:\s+[A-Z][\w-]*)*",
        r"\b(?i:Certified|Certification|Certificate|License)\s+(?:[A-Z][A-Za-z]*\s+)*?(?:Professional|Associate|Expert|Specialist|Developer|Architect|Administrator|Engineer|Accountant|Manager)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("cert template compiles"))
    .collect()
});

fn mentions_any(lower: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| lower.contains(t))
}

/// Strip bullets and a leading "Certified"/"License" word.
fn clean_item(item: &str) -> String {
    let item = lexicon::strip_bullet(item);
    CERT_PREFIX.replace(item, "").trim().to_string()
}

fn plausible_length(item: &str) -> bool {
    let len = item.chars().count();
    len > 5 && len < 100
}

fn is_section_header(line: &str) -> bool {
    let normalized = line.trim_end_matches(':').trim().to_lowercase();
    SectionType::Certifications.aliases().contains(&normalized.as_str())
}

fn from_section(body: &str) -> Vec<String> {
    SECTION_ITEM_SPLIT
        .split(body)
        .map(str::trim)
        .filter(|item| item.chars().count() > 3)
        .filter(|item| {
            let lower = item.to_lowercase();
            mentions_any(&lower, CERT_KEYWORDS) || mentions_any(&lower, CERT_VENDORS)
        })
        .map(clean_item)
        .filter(|item| plausible_length(item))
        .collect()
}

/// Scan every line outside the certifications section.
///
/// A line mentioning a certificate keyword yields its first template match;
/// lines no template recognizes are kept whole after cleaning.
fn from_whole_text(text: &str, section_lines: &HashSet<&str>) -> Vec<String> {
    let mut found = Vec::new();

    for line in text.lines().map(str::trim) {
        if line.chars().count() <= 10 || is_section_header(line) || section_lines.contains(line) {
            continue;
        }
        if !mentions_any(&line.to_lowercase(), CERT_KEYWORDS) {
            continue;
        }

        let templated = CERT_TEMPLATES
            .iter()
            .filter_map(|t| t.find(line))
            .map(|m| m.as_str().trim().to_string())
            .find(|cert| cert.chars().count() > 5);

        match templated {
            Some(cert) => found.push(cert),
            None => {
                let cleaned = clean_item(line);
                if plausible_length(&cleaned) {
                    found.push(cleaned);
                }
            }
        }
    }

    found
}

/// Extract certifications, deduplicated case-insensitively in first-seen order.
pub fn extract_certificates(text: &str) -> Vec<String> {
    let body = sections::section_body_of(text, SectionType::Certifications);
    let section_items = body.map(from_section).unwrap_or_default();
    let section_lines: HashSet<&str> = body
        .map(|b| b.lines().map(str::trim).collect())
        .unwrap_or_default();

    text_processor::dedup_case_insensitive(
        section_items
            .into_iter()
            .chain(from_whole_text(text, &section_lines)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_items() {
        let text = "CERTIFICATIONS:\n- AWS Certified Solutions Architect - Associate, 2021\n- Certified Kubernetes Administrator\n- Google Cloud Professional Data Engineer";
        let certs = extract_certificates(text);

        assert_eq!(
            certs,
            vec![
                "AWS Certified Solutions Architect - Associate",
                "Kubernetes Administrator",
                "Google Cloud Professional Data Engineer",
            ]
        );
    }

    #[test]
    fn test_casing_variants_collapse() {
        let text = "AWS Certified Solutions Architect\nAWS CERTIFIED SOLUTIONS ARCHITECT";
        assert_eq!(extract_certificates(text), vec!["AWS Certified Solutions Architect"]);
    }

    #[test]
    fn test_template_match_inside_sentence() {
        let text = "Passed exam to become Certified Kubernetes Administrator in 2021";
        assert_eq!(extract_certificates(text), vec!["Certified Kubernetes Administrator"]);
    }

    #[test]
    fn test_unrecognized_line_is_kept_whole() {
        let text = "Licensed Professional Engineer (PE), State of Texas";
        assert_eq!(
            extract_certificates(text),
            vec!["Professional Engineer (PE), State of Texas"]
        );
    }

    #[test]
    fn test_headers_are_not_certificates() {
        let text = "CERTIFICATIONS:\nNone at this time";
        assert!(extract_certificates(text).is_empty());
    }

    #[test]
    fn test_template_match_in_long_line() {
        let text = format!(
            "In 2022 I passed the exam and became an AWS Certified Solutions Architect while {}",
            "leading a platform migration across several business units and regions worldwide"
        );
        let certs = extract_certificates(&text);
        assert_eq!(certs.len(), 1);
        assert!(certs[0].starts_with("AWS"));
        assert!(certs[0].contains("Certified Solutions Architect"));
    }
}
