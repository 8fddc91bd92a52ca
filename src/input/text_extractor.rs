//! Text extraction from various file formats

use crate::error::{Result, ResumeMatcherError};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));
static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("Invalid whitespace regex"));
static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("Invalid newline regex"));

/// Turns the raw bytes of one file into text.
pub trait TextExtractor {
    fn extract(&self, bytes: &[u8], source: &Path) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8], source: &Path) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            ResumeMatcherError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                source.display(),
                e
            ))
        })?;
        Ok(clean_pdf_text(&text))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8], _source: &Path) -> Result<String> {
        Ok(decode_text(bytes))
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8], _source: &Path) -> Result<String> {
        let markdown_content = decode_text(bytes);

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output))
    }
}

impl MarkdownExtractor {
    /// Headings and paragraphs become blank-line separated blocks so the
    /// section finder still sees `HEADER:` lines after a blank line.
    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("<br />", "\n")
            .replace("</p>", "\n\n")
            .replace("</h1>", "\n\n")
            .replace("</h2>", "\n\n")
            .replace("</h3>", "\n\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let stripped = HTML_TAG.replace_all(&text, "");
        let lines: Vec<&str> = stripped.lines().map(str::trim).collect();
        BLANK_RUNS.replace_all(&lines.join("\n"), "\n\n").trim().to_string()
    }
}

/// Decode as UTF-8, falling back to Latin-1 when the bytes are not valid UTF-8.
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Unify line endings and drop control characters other than newline and tab.
pub fn normalize_text(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .filter(|&c| c == '\n' || c == '\t' || !c.is_control())
        .collect()
}

/// PDF output is noisy: collapse horizontal whitespace and long blank runs.
pub fn clean_pdf_text(text: &str) -> String {
    let normalized = normalize_text(text);
    let collapsed = HORIZONTAL_SPACE.replace_all(&normalized, " ");
    BLANK_RUNS.replace_all(&collapsed, "\n\n").trim().to_string()
}
