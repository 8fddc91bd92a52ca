//! Report structures handed to the formatters

use crate::processing::analyzer::{AnalysisOutcome, BatchOutcome};
use crate::processing::ats_matcher::{MatchResult, MatchStatus, SHORTLIST_THRESHOLD};
use crate::processing::resume_parser::ResumeProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;

/// Default size of the matched/missing keyword slices shown to a reader.
pub const DEFAULT_TOP_KEYWORDS: usize = 10;
/// Default number of rows in a batch ranking.
pub const DEFAULT_BATCH_LIMIT: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub matcher_version: String,
    pub resume_file: String,
    pub job_file: String,
    pub processing_time_ms: u64,
}

/// A single resume scored against a job description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub result: MatchResult,
    pub profile: ResumeProfile,
    /// Display threshold; the decision itself uses the fixed thresholds.
    pub threshold: u8,
    pub top_matched: Vec<String>,
    pub top_missing: Vec<String>,
    pub metadata: ReportMetadata,
}

impl MatchReport {
    pub fn new(
        outcome: AnalysisOutcome,
        resume_file: &Path,
        job_file: &Path,
        top_n: usize,
        processing_time_ms: u64,
    ) -> Self {
        let AnalysisOutcome { profile, result } = outcome;
        Self {
            top_matched: top(&result.matched_keywords, top_n),
            top_missing: top(&result.missing_keywords, top_n),
            threshold: SHORTLIST_THRESHOLD,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                matcher_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: display_name(resume_file),
                job_file: display_name(job_file),
                processing_time_ms,
            },
            result,
            profile,
        }
    }

    /// One-line decision summary.
    pub fn verdict(&self) -> &'static str {
        verdict_for(self.result.status)
    }
}

pub fn verdict_for(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Shortlisted => "Strong match, shortlist for interview",
        MatchStatus::LowPriority => "Partial match, keep as low priority",
        MatchStatus::Rejected => "Weak match, not recommended",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "desc" | "descending" => Ok(SortOrder::Desc),
            "asc" | "ascending" => Ok(SortOrder::Asc),
            other => Err(format!("Unknown sort order '{}'. Use asc or desc", other)),
        }
    }
}

/// Filtering and ranking applied when building a [`BatchReport`].
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub status: Option<MatchStatus>,
    pub order: SortOrder,
    pub limit: usize,
    pub top_n: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            status: None,
            order: SortOrder::Desc,
            limit: DEFAULT_BATCH_LIMIT,
            top_n: DEFAULT_TOP_KEYWORDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRow {
    pub rank: usize,
    pub index: usize,
    pub file_name: String,
    pub match_score: f64,
    pub match_percentage: u8,
    pub status: MatchStatus,
    pub email: String,
    pub skills: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

/// A resume that could not be read; the matcher never saw it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    pub index: usize,
    pub file_name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub shortlisted: usize,
    pub low_priority: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub job_file: String,
    pub generated_at: DateTime<Utc>,
    /// Every file attempted, failures included.
    pub processed: usize,
    pub counts: StatusCounts,
    pub threshold: u8,
    pub rows: Vec<BatchRow>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn build(
        job_file: &Path,
        outcomes: Vec<BatchOutcome>,
        mut failures: Vec<BatchFailure>,
        options: &BatchOptions,
    ) -> Self {
        let processed = outcomes.len() + failures.len();

        let mut counts = StatusCounts::default();
        for outcome in &outcomes {
            match outcome.outcome.result.status {
                MatchStatus::Shortlisted => counts.shortlisted += 1,
                MatchStatus::LowPriority => counts.low_priority += 1,
                MatchStatus::Rejected => counts.rejected += 1,
            }
        }

        let mut ranked: Vec<BatchOutcome> = outcomes
            .into_iter()
            .filter(|o| options.status.map_or(true, |s| o.outcome.result.status == s))
            .collect();
        ranked.sort_by(|a, b| compare_outcomes(a, b, options.order));
        ranked.truncate(options.limit);

        let rows = ranked
            .into_iter()
            .enumerate()
            .map(|(position, o)| {
                let AnalysisOutcome { profile, result } = o.outcome;
                BatchRow {
                    rank: position + 1,
                    index: o.index,
                    file_name: o.name,
                    match_score: result.match_score,
                    match_percentage: result.match_percentage,
                    status: result.status,
                    email: profile.email,
                    skills: profile.skills.into_iter().collect(),
                    matched_keywords: top(&result.matched_keywords, options.top_n),
                    missing_keywords: top(&result.missing_keywords, options.top_n),
                }
            })
            .collect();

        failures.sort_by_key(|f| f.index);

        Self {
            job_file: display_name(job_file),
            generated_at: Utc::now(),
            processed,
            counts,
            threshold: SHORTLIST_THRESHOLD,
            rows,
            failures,
        }
    }
}

/// Score order first, input order on ties.
fn compare_outcomes(a: &BatchOutcome, b: &BatchOutcome, order: SortOrder) -> Ordering {
    let by_score = a
        .outcome
        .result
        .match_score
        .total_cmp(&b.outcome.result.match_score);
    let by_score = match order {
        SortOrder::Desc => by_score.reverse(),
        SortOrder::Asc => by_score,
    };
    by_score.then(a.index.cmp(&b.index))
}

fn top(keywords: &[String], n: usize) -> Vec<String> {
    keywords.iter().take(n).cloned().collect()
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::AnalysisEngine;

    const JD: &str = "Rust engineer with Docker and PostgreSQL experience";

    fn outcome(index: usize, text: &str) -> BatchOutcome {
        BatchOutcome {
            index,
            name: format!("resume-{}.txt", index),
            outcome: AnalysisEngine::with_parallelism(1).analyze(text, JD),
        }
    }

    fn outcomes() -> Vec<BatchOutcome> {
        vec![
            outcome(0, "Watercolor artist"),
            outcome(1, "Rust engineer with Docker and PostgreSQL experience"),
            outcome(2, "Rust developer"),
        ]
    }

    #[test]
    fn test_match_report_slices_keywords() {
        let engine = AnalysisEngine::with_parallelism(1);
        let outcome = engine.analyze("Python developer", "Python Django Flask React Docker AWS engineer");
        let report = MatchReport::new(outcome, Path::new("/tmp/cv.txt"), Path::new("jd.md"), 2, 5);

        assert_eq!(report.threshold, 80);
        assert!(report.top_missing.len() <= 2);
        assert!(report.top_matched.len() <= 2);
        assert_eq!(report.metadata.resume_file, "cv.txt");
        assert_eq!(report.metadata.job_file, "jd.md");
    }

    #[test]
    fn test_batch_ranking_descending() {
        let report = BatchReport::build(Path::new("jd.txt"), outcomes(), Vec::new(), &BatchOptions::default());

        let order: Vec<usize> = report.rows.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![1, 2, 0]);
        assert_eq!(report.rows[0].rank, 1);
        assert_eq!(report.processed, 3);
        assert_eq!(
            report.counts.shortlisted + report.counts.low_priority + report.counts.rejected,
            3
        );
    }

    #[test]
    fn test_batch_ascending_limit_and_failures() {
        let options = BatchOptions {
            order: SortOrder::Asc,
            limit: 2,
            ..BatchOptions::default()
        };
        let failures = vec![BatchFailure {
            index: 3,
            file_name: "broken.pdf".to_string(),
            error: "PDF extraction error".to_string(),
        }];
        let report = BatchReport::build(Path::new("jd.txt"), outcomes(), failures, &options);

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].index, 0);
        assert_eq!(report.processed, 4);
        assert_eq!(report.failures[0].file_name, "broken.pdf");
    }

    #[test]
    fn test_batch_status_filter() {
        let options = BatchOptions {
            status: Some(MatchStatus::Rejected),
            ..BatchOptions::default()
        };
        let report = BatchReport::build(Path::new("jd.txt"), outcomes(), Vec::new(), &options);
        assert!(report.rows.iter().all(|r| r.status == MatchStatus::Rejected));
        assert!(report.rows.iter().any(|r| r.index == 0));
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!("ASC".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!("descending".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}
