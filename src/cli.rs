//! CLI interface for the resume matcher

use crate::config::OutputFormat;
use crate::output::report::SortOrder;
use crate::processing::ats_matcher::MatchStatus;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Resume parsing and job description matching tool")]
#[command(long_about = "Extract structured profiles from resumes and score them against a job description with keyword, skill and text-similarity matching")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a resume and print the extracted profile as JSON
    Parse {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,
    },

    /// Score one resume against a job description
    Match {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Include the full parsed profile in console output
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown
        #[arg(short, long, value_parser = parse_output_format)]
        output: Option<OutputFormat>,

        /// Save output to a file, or into a directory with a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Rank many resumes against one job description
    Batch {
        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Resume files to score
        #[arg(required = true)]
        resumes: Vec<PathBuf>,

        /// Only show resumes with this status: shortlisted, low_priority, rejected
        #[arg(long)]
        status: Option<MatchStatus>,

        /// Sort by match score: desc or asc
        #[arg(long, default_value = "desc")]
        sort: SortOrder,

        /// Maximum number of ranked rows
        #[arg(short, long)]
        limit: Option<usize>,

        /// Include skills for every row in console output
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown
        #[arg(short, long, value_parser = parse_output_format)]
        output: Option<OutputFormat>,

        /// Save output to a file, or into a directory with a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration and the fixed scoring constants
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_batch_arguments() {
        let cli = Cli::parse_from([
            "resume-matcher",
            "batch",
            "--job",
            "jd.txt",
            "a.pdf",
            "b.md",
            "--status",
            "low_priority",
            "--sort",
            "asc",
            "-o",
            "md",
        ]);

        match cli.command {
            Commands::Batch { resumes, status, sort, output, limit, .. } => {
                assert_eq!(resumes.len(), 2);
                assert_eq!(status, Some(MatchStatus::LowPriority));
                assert_eq!(sort, SortOrder::Asc);
                assert_eq!(output, Some(OutputFormat::Markdown));
                assert_eq!(limit, None);
            }
            _ => panic!("expected batch command"),
        }
    }

    #[test]
    fn test_output_format_and_extensions() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert!(parse_output_format("html").is_err());

        assert!(validate_file_extension(Path::new("jd.md"), &["txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("jd.docx"), &["txt", "md"]).is_err());
        assert!(validate_file_extension(Path::new("jd"), &["txt", "md"]).is_err());
    }
}
