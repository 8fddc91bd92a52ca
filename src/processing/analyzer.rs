//! Analysis engine: parse a resume and score it against a job description

use crate::config::Config;
use crate::error::Result;
use crate::processing::ats_matcher::{JobRequirements, MatchResult};
use crate::processing::resume_parser::{parse_resume, ResumeProfile};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Parsed profile plus its score for one resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub profile: ResumeProfile,
    pub result: MatchResult,
}

/// One resume queued for batch scoring.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub index: usize,
    pub name: String,
    pub text: String,
}

/// A batch result, tagged with the index of the item it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub index: usize,
    pub name: String,
    pub outcome: AnalysisOutcome,
}

pub struct AnalysisEngine {
    max_parallel: usize,
}

impl AnalysisEngine {
    pub fn new(config: &Config) -> Self {
        Self::with_parallelism(config.worker_count())
    }

    pub fn with_parallelism(max_parallel: usize) -> Self {
        Self {
            max_parallel: max_parallel.max(1),
        }
    }

    pub fn max_parallel(&self) -> usize {
        self.max_parallel
    }

    /// Parse and score a single resume.
    pub fn analyze(&self, resume_text: &str, job_description: &str) -> AnalysisOutcome {
        let requirements = JobRequirements::extract(job_description);
        Self::analyze_with(&requirements, resume_text)
    }

    pub fn analyze_with(requirements: &JobRequirements, resume_text: &str) -> AnalysisOutcome {
        let profile = parse_resume(resume_text);
        let result = requirements.score(&profile.keywords, &profile.skills, resume_text);
        debug!(
            "Scored resume: {}% ({}), {} matched, {} missing",
            result.match_percentage,
            result.status,
            result.matched_keywords.len(),
            result.missing_keywords.len()
        );
        AnalysisOutcome { profile, result }
    }

    /// Score many resumes against one job description.
    ///
    /// Requirements are extracted once and shared. Each resume runs on the
    /// blocking pool with at most `max_parallel` in flight. Outcomes are
    /// returned in completion order; use [`BatchOutcome::index`] to recover
    /// input order. `on_complete` is called once per finished item.
    pub async fn analyze_batch<F>(
        &self,
        job_description: &str,
        items: Vec<BatchItem>,
        mut on_complete: F,
    ) -> Result<Vec<BatchOutcome>>
    where
        F: FnMut(&BatchOutcome),
    {
        let start_time = Instant::now();
        let total = items.len();
        let requirements = Arc::new(JobRequirements::extract(job_description));

        let mut tasks = JoinSet::new();
        let mut outcomes = Vec::with_capacity(total);

        for item in items {
            if tasks.len() >= self.max_parallel {
                if let Some(joined) = tasks.join_next().await {
                    let outcome: BatchOutcome = joined?;
                    on_complete(&outcome);
                    outcomes.push(outcome);
                }
            }

            let requirements = Arc::clone(&requirements);
            tasks.spawn_blocking(move || BatchOutcome {
                index: item.index,
                outcome: Self::analyze_with(&requirements, &item.text),
                name: item.name,
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let outcome = joined?;
            on_complete(&outcome);
            outcomes.push(outcome);
        }

        info!(
            "Scored {} resumes in {} ms using up to {} workers",
            total,
            start_time.elapsed().as_millis(),
            self.max_parallel
        );

        Ok(outcomes)
    }
}
