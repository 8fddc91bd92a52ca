//! Resume matcher: parse resumes and score them against job descriptions

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::config::{Config, OutputFormat};
use resume_matcher::input::InputManager;
use resume_matcher::output::formatter::suggest_filename;
use resume_matcher::output::report::display_name;
use resume_matcher::output::{
    save_report_to_file, BatchFailure, BatchOptions, BatchReport, MatchReport, ReportGenerator,
    SortOrder,
};
use resume_matcher::processing::analyzer::{AnalysisEngine, BatchItem};
use resume_matcher::processing::ats_matcher::{
    MatchStatus, KEYWORD_WEIGHT, LOW_PRIORITY_THRESHOLD, SHORTLIST_THRESHOLD, SIMILARITY_WEIGHT,
    SKILL_WEIGHT,
};
use resume_matcher::processing::lexicon::{KEYWORD_CAP, TECHNICAL_SKILLS};
use resume_matcher::processing::resume_parser::parse_resume;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "txt", "text", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration from {}: {}", config_path.display(), e);
            process::exit(1);
        }
    };

    if !config.output.color_output {
        colored::control::set_override(false);
    }

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Parse { resume } => {
            let mut input = InputManager::new().with_normalization(config.processing.normalize_input);
            let text = read_document(&mut input, &resume, "resume").await?;

            let profile = parse_resume(&text);
            info!(
                "Parsed {}: {} skills, {} keywords",
                display_name(&resume),
                profile.skills.len(),
                profile.keywords.len()
            );
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }

        Commands::Match {
            resume,
            job,
            detailed,
            output,
            save,
        } => {
            cli::validate_file_extension(&job, DOCUMENT_EXTENSIONS)
                .map_err(|e| anyhow!("Job description file: {}", e))?;

            let start_time = Instant::now();
            let mut input = InputManager::new().with_normalization(config.processing.normalize_input);
            let resume_text = read_document(&mut input, &resume, "resume").await?;
            let job_text = read_document(&mut input, &job, "job description").await?;

            let engine = AnalysisEngine::new(&config);
            let outcome = engine.analyze(&resume_text, &job_text);
            let report = MatchReport::new(
                outcome,
                &resume,
                &job,
                config.output.top_keywords,
                start_time.elapsed().as_millis() as u64,
            );
            info!(
                "{}: {}% ({})",
                report.metadata.resume_file, report.result.match_percentage, report.result.status
            );

            let format = output.unwrap_or(config.output.format);
            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
            );
            let rendered = generator.generate_match_report(&report, format)?;
            emit(&rendered, save.as_deref(), format, &report.metadata.resume_file)?;
        }

        Commands::Batch {
            job,
            resumes,
            status,
            sort,
            limit,
            detailed,
            output,
            save,
        } => {
            cli::validate_file_extension(&job, DOCUMENT_EXTENSIONS)
                .map_err(|e| anyhow!("Job description file: {}", e))?;

            let mut input = InputManager::new()
                .with_cache(false)
                .with_normalization(config.processing.normalize_input);
            let job_text = read_document(&mut input, &job, "job description").await?;

            let (items, failures) = load_batch(&mut input, &resumes).await;
            if items.is_empty() {
                warn!("None of the {} resumes could be read", resumes.len());
            }

            let engine = AnalysisEngine::new(&config);
            let progress = ProgressBar::new(items.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")?
                    .progress_chars("=>-"),
            );
            let outcomes = engine
                .analyze_batch(&job_text, items, |outcome| {
                    progress.set_message(outcome.name.clone());
                    progress.inc(1);
                })
                .await?;
            progress.finish_and_clear();

            let options = batch_options(&config, status, sort, limit);
            let report = BatchReport::build(&job, outcomes, failures, &options);
            info!(
                "Ranked {} of {} resumes: {} shortlisted, {} low priority, {} rejected",
                report.rows.len(),
                report.processed,
                report.counts.shortlisted,
                report.counts.low_priority,
                report.counts.rejected
            );

            let format = output.unwrap_or(config.output.format);
            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
            );
            let rendered = generator.generate_batch_report(&report, format)?;
            emit(&rendered, save.as_deref(), format, "batch")?;
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                println!("Configuration file: {}", config_path.display());
                println!();
                println!("{}", toml::to_string_pretty(&config)?);
                println!("Scoring (fixed):");
                println!(
                    "  weights: keywords {:.1}, skills {:.1}, text similarity {:.1}",
                    KEYWORD_WEIGHT, SKILL_WEIGHT, SIMILARITY_WEIGHT
                );
                println!(
                    "  status: shortlisted >= {}%, low priority >= {}%, otherwise rejected",
                    SHORTLIST_THRESHOLD, LOW_PRIORITY_THRESHOLD
                );
                println!(
                    "  lexicon: {} technical skills, keyword cap {}",
                    TECHNICAL_SKILLS.len(),
                    KEYWORD_CAP
                );
                println!("  batch workers: {}", config.worker_count());
            }
            ConfigAction::Reset => {
                Config::default()
                    .save_to(config_path)
                    .with_context(|| format!("Failed to reset {}", config_path.display()))?;
                println!("Configuration reset to defaults: {}", config_path.display());
            }
            ConfigAction::Path => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

async fn read_document(input: &mut InputManager, path: &Path, role: &str) -> Result<String> {
    input
        .extract_text(path)
        .await
        .with_context(|| format!("Failed to read {} {}", role, path.display()))
}

/// Extract every resume; unreadable files become failures instead of aborting the batch.
async fn load_batch(input: &mut InputManager, resumes: &[PathBuf]) -> (Vec<BatchItem>, Vec<BatchFailure>) {
    let mut items = Vec::with_capacity(resumes.len());
    let mut failures = Vec::new();

    for (index, path) in resumes.iter().enumerate() {
        match input.extract_text(path).await {
            Ok(text) => items.push(BatchItem {
                index,
                name: display_name(path),
                text,
            }),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                failures.push(BatchFailure {
                    index,
                    file_name: display_name(path),
                    error: e.to_string(),
                });
            }
        }
    }

    (items, failures)
}

fn batch_options(
    config: &Config,
    status: Option<MatchStatus>,
    order: SortOrder,
    limit: Option<usize>,
) -> BatchOptions {
    BatchOptions {
        status,
        order,
        limit: limit.unwrap_or(config.output.batch_limit),
        top_n: config.output.top_keywords,
    }
}

/// Print the rendered report, or write it to `save` (a file, or a directory
/// that receives a generated file name).
fn emit(rendered: &str, save: Option<&Path>, format: OutputFormat, name: &str) -> Result<()> {
    let Some(target) = save else {
        println!("{}", rendered);
        return Ok(());
    };

    let path = if target.is_dir() {
        target.join(suggest_filename(format, name, true))
    } else {
        target.to_path_buf()
    };

    save_report_to_file(rendered, &path)
        .with_context(|| format!("Failed to save report to {}", path.display()))?;
    info!("Report saved to {}", path.display());
    Ok(())
}
