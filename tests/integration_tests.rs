//! Integration tests for the resume matcher

use resume_matcher::input::InputManager;
use resume_matcher::output::{BatchOptions, BatchReport, MatchReport, ReportGenerator};
use resume_matcher::config::OutputFormat;
use resume_matcher::processing::analyzer::{AnalysisEngine, BatchItem};
use resume_matcher::{parse_resume, MatchStatus, ResumeMatcherError};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SAMPLE_RESUME: &str = "Jane Doe\njane.doe@example.com\n\nSKILLS:\nPython, React, Node.js, Docker\n\nEXPERIENCE:\nSoftware Engineer at Acme Corp\n2019 - 2023\nBuilt React dashboards\n\nEDUCATION:\nB.S. Computer Science, Stanford University, 2019\n";

const SAMPLE_MARKDOWN: &str = "# Jane Doe\n\n**Software Engineer** at *Acme Corp*\n\n## Skills\n\n- Python\n- React\n- Docker\n\nContact: jane.doe@example.com\n";

const JOB_DESCRIPTION: &str = "We need 3+ years experience with Python and React. Bachelor degree required.";

fn write_fixture(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "resume.txt", SAMPLE_RESUME.as_bytes());

    let mut manager = InputManager::new();
    let text = manager.extract_text(&path).await.unwrap();

    assert!(text.contains("Jane Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "resume.md", SAMPLE_MARKDOWN.as_bytes());

    let mut manager = InputManager::new();
    let text = manager.extract_text(&path).await.unwrap();

    assert!(text.contains("Jane Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));

    let profile = parse_resume(&text);
    assert_eq!(profile.email, "jane.doe@example.com");
    for skill in ["python", "react", "docker"] {
        assert!(profile.skills.contains(skill), "missing {}", skill);
    }
}

#[tokio::test]
async fn test_latin1_text_is_decoded() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "cv.txt", b"Caf\xe9 manager, Python");

    let mut manager = InputManager::new();
    let text = manager.extract_text(&path).await.unwrap();
    assert_eq!(text, "Café manager, Python");
}

#[tokio::test]
async fn test_caching_functionality() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "resume.txt", SAMPLE_RESUME.as_bytes());

    let mut manager = InputManager::new();
    let first = manager.extract_text(&path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let second = manager.extract_text(&path).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);

    let mut uncached = InputManager::new().with_cache(false);
    uncached.extract_text(&path).await.unwrap();
    assert_eq!(uncached.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "resume.xyz", b"Python developer");

    let mut manager = InputManager::new();
    let result = manager.extract_text(&path).await;
    assert!(matches!(result, Err(ResumeMatcherError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_pdf_extension_without_pdf_content() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "resume.pdf", b"just plain text pretending");

    let mut manager = InputManager::new();
    let result = manager.extract_text(&path).await;
    assert!(matches!(result, Err(ResumeMatcherError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("does/not/exist.txt")).await;
    assert!(matches!(result, Err(ResumeMatcherError::InvalidInput(_))));
}

#[tokio::test]
async fn test_match_end_to_end() {
    let dir = TempDir::new().unwrap();
    let resume_path = write_fixture(&dir, "resume.txt", b"Skills: Python, React, AWS\nemail: a@b.com");
    let job_path = write_fixture(&dir, "job.txt", JOB_DESCRIPTION.as_bytes());

    let mut manager = InputManager::new();
    let resume_text = manager.extract_text(&resume_path).await.unwrap();
    let job_text = manager.extract_text(&job_path).await.unwrap();

    let outcome = AnalysisEngine::with_parallelism(1).analyze(&resume_text, &job_text);
    assert_eq!(outcome.profile.email, "a@b.com");
    assert_eq!(outcome.result.status, MatchStatus::Shortlisted);
    assert_eq!(outcome.result.match_percentage, 83);
    assert!(outcome.result.matched_keywords.contains(&"python".to_string()));
    assert!(outcome.result.matched_keywords.contains(&"bachelor".to_string()));

    let report = MatchReport::new(outcome, &resume_path, &job_path, 5, 1);
    let generator = ReportGenerator::with_options(false, true, true, true);

    let json = generator.generate_match_report(&report, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["result"]["status"], "shortlisted");
    assert_eq!(value["metadata"]["resumeFile"], "resume.txt");

    let markdown = generator.generate_match_report(&report, OutputFormat::Markdown).unwrap();
    assert!(markdown.contains("resume.txt"));
}

#[tokio::test]
async fn test_batch_ranking_end_to_end() {
    let resumes = [
        "SKILLS:\nKnitting, Sculpting\n\nWood studio",
        "SKILLS:\nPython, React, Django\n\nBachelor degree in Computer Science. 4 years experience.",
        "SKILLS:\nPython\n\nData analyst",
    ];
    let items = resumes
        .iter()
        .enumerate()
        .map(|(index, text)| BatchItem {
            index,
            name: format!("candidate-{}.txt", index),
            text: text.to_string(),
        })
        .collect();

    let engine = AnalysisEngine::with_parallelism(2);
    let mut seen = 0;
    let outcomes = engine
        .analyze_batch(JOB_DESCRIPTION, items, |_| seen += 1)
        .await
        .unwrap();
    assert_eq!(seen, 3);

    let report = BatchReport::build(Path::new("job.txt"), outcomes, Vec::new(), &BatchOptions::default());
    let ranked: Vec<usize> = report.rows.iter().map(|row| row.index).collect();
    assert_eq!(ranked, vec![1, 2, 0]);
    assert_eq!(report.rows[2].status, MatchStatus::Rejected);

    let rendered = ReportGenerator::with_options(false, false, true, true)
        .generate_batch_report(&report, OutputFormat::Console)
        .unwrap();
    assert!(rendered.contains("candidate-1.txt"));
}
