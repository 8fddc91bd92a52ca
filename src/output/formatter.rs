//! Output formatters for match and batch reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{BatchReport, MatchReport};
use crate::processing::ats_matcher::MatchStatus;
use colored::{Color, Colorize};
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

/// Longest description shown per experience entry in detailed console output.
const DESCRIPTION_PREVIEW: usize = 120;

pub trait OutputFormatter {
    fn format_match(&self, report: &MatchReport) -> Result<String>;
    fn format_batch(&self, report: &BatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

/// Cut `text` to at most `max` graphemes, marking the cut with an ellipsis.
pub fn truncate_graphemes(text: &str, max: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max {
        return text.to_string();
    }
    let mut truncated = graphemes[..max.saturating_sub(1)].concat();
    truncated.push('…');
    truncated
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn status_color(status: MatchStatus) -> Color {
        match status {
            MatchStatus::Shortlisted => Color::Green,
            MatchStatus::LowPriority => Color::Yellow,
            MatchStatus::Rejected => Color::Red,
        }
    }

    fn format_status_badge(&self, status: MatchStatus) -> String {
        let label = status.as_str().to_uppercase();
        if self.use_colors {
            format!("[{}]", label.color(Self::status_color(status)).bold())
        } else {
            format!("[{}]", label)
        }
    }

    fn format_profile(&self, report: &MatchReport, output: &mut String) {
        let profile = &report.profile;

        output.push_str(&self.format_header("Parsed Resume", 2));
        let email = if profile.has_email() { profile.email.as_str() } else { "not found" };
        output.push_str(&format!("Email: {}\n", email));
        let skills: Vec<String> = profile.skills.iter().cloned().collect();
        output.push_str(&format!("Skills ({}): {}\n", skills.len(), join_or_none(&skills)));
        output.push_str(&format!(
            "Experience: {} | Education: {} | Certificates: {}\n",
            profile.experience.len(),
            profile.education.len(),
            profile.certificates.len()
        ));

        if !self.detailed {
            return;
        }

        if !profile.experience.is_empty() {
            output.push_str(&self.format_header("Experience", 3));
            for entry in &profile.experience {
                output.push_str(&format!(
                    "• {} @ {} ({})\n",
                    entry.position, entry.company, entry.duration
                ));
                if !entry.description.is_empty() {
                    output.push_str(&format!(
                        "  {}\n",
                        truncate_graphemes(&entry.description, DESCRIPTION_PREVIEW)
                    ));
                }
            }
        }

        if !profile.education.is_empty() {
            output.push_str(&self.format_header("Education", 3));
            for entry in &profile.education {
                let mut line = format!("• {}", entry.degree);
                if !entry.field.is_empty() {
                    line.push_str(&format!(", {}", entry.field));
                }
                if !entry.institution.is_empty() {
                    line.push_str(&format!(" at {}", entry.institution));
                }
                if !entry.year.is_empty() {
                    line.push_str(&format!(" ({})", entry.year));
                }
                output.push_str(&line);
                output.push('\n');
            }
        }

        if !profile.certificates.is_empty() {
            output.push_str(&self.format_header("Certificates", 3));
            for cert in &profile.certificates {
                output.push_str(&format!("• {}\n", cert));
            }
        }

        output.push_str(&self.format_header("Keywords", 3));
        output.push_str(&format!("{}\n", join_or_none(&profile.keywords)));
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_match(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();
        let result = &report.result;

        output.push_str(&self.format_header("RESUME MATCH", 1));
        output.push_str(&format!(
            "Resume: {} | Job: {} | Generated: {}\n",
            report.metadata.resume_file,
            report.metadata.job_file,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&self.format_header("Decision", 2));
        output.push_str(&format!(
            "Match: {}% {} (threshold {}%)\n",
            result.match_percentage,
            self.format_status_badge(result.status),
            report.threshold
        ));
        output.push_str(&format!(
            "Verdict: {}\n",
            self.colorize(report.verdict(), Color::Cyan)
        ));

        output.push_str(&self.format_header("Score Breakdown", 3));
        output.push_str(&format!(
            "Keywords: {:.0}% | Skills: {:.0}% | Text similarity: {:.0}%\n",
            result.breakdown.keyword_ratio * 100.0,
            result.breakdown.skill_ratio * 100.0,
            result.breakdown.text_similarity * 100.0
        ));

        output.push_str(&self.format_header("Keywords", 3));
        output.push_str(&format!(
            "{} {}\n",
            self.colorize("Matched:", Color::Green),
            join_or_none(&report.top_matched)
        ));
        output.push_str(&format!(
            "{} {}\n",
            self.colorize("Missing:", Color::Red),
            join_or_none(&report.top_missing)
        ));

        self.format_profile(report, &mut output);

        Ok(output)
    }

    fn format_batch(&self, report: &BatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("BATCH RANKING", 1));
        output.push_str(&format!(
            "Job: {} | Processed: {} | Shortlisted: {} | Low priority: {} | Rejected: {} | Failed: {}\n",
            report.job_file,
            report.processed,
            report.counts.shortlisted,
            report.counts.low_priority,
            report.counts.rejected,
            report.failures.len()
        ));

        if report.rows.is_empty() {
            output.push_str("\nNo resumes to show.\n");
        }

        for row in &report.rows {
            output.push_str(&format!(
                "\n{:>3}. {} {}% {}\n",
                row.rank,
                self.colorize(&row.file_name, Color::Cyan),
                row.match_percentage,
                self.format_status_badge(row.status)
            ));
            if !row.email.is_empty() {
                output.push_str(&format!("     Email: {}\n", row.email));
            }
            if self.detailed {
                output.push_str(&format!("     Skills: {}\n", join_or_none(&row.skills)));
            }
            output.push_str(&format!("     Matched: {}\n", join_or_none(&row.matched_keywords)));
            output.push_str(&format!("     Missing: {}\n", join_or_none(&row.missing_keywords)));
        }

        if !report.failures.is_empty() {
            output.push_str(&self.format_header("Failures", 2));
            for failure in &report.failures {
                output.push_str(&format!(
                    "{} {}: {}\n",
                    self.colorize("✗", Color::Red),
                    failure.file_name,
                    failure.error
                ));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_match(&self, report: &MatchReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_batch(&self, report: &BatchReport) -> Result<String> {
        self.to_json(report)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_status_badge(status: MatchStatus) -> &'static str {
        match status {
            MatchStatus::Shortlisted => "🟢 Shortlisted",
            MatchStatus::LowPriority => "🟡 Low priority",
            MatchStatus::Rejected => "🔴 Rejected",
        }
    }

    fn bullet_list(items: &[String]) -> String {
        if items.is_empty() {
            return "_none_\n".to_string();
        }
        items.iter().map(|item| format!("- {}\n", item)).collect()
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_match(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();
        let result = &report.result;
        let profile = &report.profile;

        output.push_str("# Resume Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Resume:** `{}` | **Job:** `{}`\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.resume_file,
                report.metadata.job_file
            ));
        }

        output.push_str("## Decision\n\n");
        output.push_str(&format!(
            "**Match:** {}% {} (threshold {}%)\n\n",
            result.match_percentage,
            Self::markdown_status_badge(result.status),
            report.threshold
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", report.verdict()));

        output.push_str("### Score Breakdown\n\n");
        output.push_str("| Component | Score | Weight |\n");
        output.push_str("|-----------|-------|--------|\n");
        output.push_str(&format!(
            "| Keywords | {:.0}% | 40% |\n",
            result.breakdown.keyword_ratio * 100.0
        ));
        output.push_str(&format!(
            "| Skills | {:.0}% | 40% |\n",
            result.breakdown.skill_ratio * 100.0
        ));
        output.push_str(&format!(
            "| Text similarity | {:.0}% | 20% |\n\n",
            result.breakdown.text_similarity * 100.0
        ));

        output.push_str("### Matched Keywords\n\n");
        output.push_str(&Self::bullet_list(&report.top_matched));
        output.push_str("\n### Missing Keywords\n\n");
        output.push_str(&Self::bullet_list(&report.top_missing));

        output.push_str("\n## Parsed Resume\n\n");
        if profile.has_email() {
            output.push_str(&format!("**Email:** {}\n\n", profile.email));
        }
        let skills: Vec<String> = profile.skills.iter().cloned().collect();
        output.push_str(&format!("**Skills:** {}\n\n", join_or_none(&skills)));

        if !profile.experience.is_empty() {
            output.push_str("### Experience\n\n");
            output.push_str("| Position | Company | Duration |\n");
            output.push_str("|----------|---------|----------|\n");
            for entry in &profile.experience {
                output.push_str(&format!(
                    "| {} | {} | {} |\n",
                    entry.position, entry.company, entry.duration
                ));
            }
            output.push('\n');
        }

        if !profile.education.is_empty() {
            output.push_str("### Education\n\n");
            output.push_str("| Degree | Field | Institution | Year |\n");
            output.push_str("|--------|-------|-------------|------|\n");
            for entry in &profile.education {
                output.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    entry.degree, entry.field, entry.institution, entry.year
                ));
            }
            output.push('\n');
        }

        if !profile.certificates.is_empty() {
            output.push_str("### Certificates\n\n");
            output.push_str(&Self::bullet_list(&profile.certificates));
        }

        Ok(output)
    }

    fn format_batch(&self, report: &BatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Batch Ranking\n\n");
        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Job:** `{}`\n\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.job_file
            ));
        }
        output.push_str(&format!(
            "**Processed:** {} | **Shortlisted:** {} | **Low priority:** {} | **Rejected:** {}\n\n",
            report.processed,
            report.counts.shortlisted,
            report.counts.low_priority,
            report.counts.rejected
        ));

        output.push_str("| Rank | File | Match | Status | Email | Matched | Missing |\n");
        output.push_str("|------|------|-------|--------|-------|---------|---------|\n");
        for row in &report.rows {
            output.push_str(&format!(
                "| {} | {} | {}% | {} | {} | {} | {} |\n",
                row.rank,
                row.file_name,
                row.match_percentage,
                Self::markdown_status_badge(row.status),
                row.email,
                row.matched_keywords.join(", "),
                row.missing_keywords.join(", ")
            ));
        }

        if !report.failures.is_empty() {
            output.push_str("\n## Failures\n\n");
            for failure in &report.failures {
                output.push_str(&format!("- `{}`: {}\n", failure.file_name, failure.error));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_match_report(&self, report: &MatchReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_match(report)
    }

    pub fn generate_batch_report(&self, report: &BatchReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_batch(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_match{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_match{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_match{}.md", base_name, timestamp_suffix),
    }
}
