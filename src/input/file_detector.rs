//! File type detection

use std::path::Path;

/// Leading bytes of every PDF document.
pub const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    /// Content sniffing wins over the extension for PDFs, so a PDF saved as
    /// `.txt` is still extracted as one. Extension-less files without the
    /// PDF signature are read as plain text.
    pub fn detect(path: &Path, head: &[u8]) -> Self {
        if is_pdf(head) {
            return FileType::Pdf;
        }
        match Self::from_path(path) {
            FileType::Pdf => FileType::Unknown,
            FileType::Unknown if path.extension().is_none() => FileType::Text,
            other => other,
        }
    }
}

pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_mapping() {
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("md"), FileType::Markdown);
        assert_eq!(FileType::from_extension("markdown"), FileType::Markdown);
        assert_eq!(FileType::from_extension("txt"), FileType::Text);
        assert_eq!(FileType::from_extension("docx"), FileType::Unknown);
    }

    #[test]
    fn test_magic_bytes_override_extension() {
        let path = Path::new("resume.txt");
        assert_eq!(FileType::detect(path, b"%PDF-1.7\n"), FileType::Pdf);
        assert_eq!(FileType::detect(path, b"Jane Doe"), FileType::Text);
    }

    #[test]
    fn test_fake_pdf_and_bare_files() {
        assert_eq!(FileType::detect(Path::new("resume.pdf"), b"plain"), FileType::Unknown);
        assert_eq!(FileType::detect(Path::new("RESUME"), b"Jane Doe"), FileType::Text);
        assert_eq!(FileType::detect(Path::new("resume.xyz"), b"Jane Doe"), FileType::Unknown);
    }
}
