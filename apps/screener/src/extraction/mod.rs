//! Text extraction: turns an uploaded file into raw text.
//!
//! The analyzer only sees `Option<String>`: `None` means the file could not be
//! read, and the pipeline reports it as unreadable. Reader failures are logged
//! here and never surface as errors.

pub mod docx;

use std::path::Path;

use anyhow::{anyhow, Context, Result};

/// Black-box reader from a file path to its plain text.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, path: &Path) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    /// Picks a reader from the file extension. Legacy `.doc` is routed to the
    /// docx reader and fails there unless the file is really a docx package.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" | "doc" => Some(DocumentFormat::Docx),
            "txt" | "text" | "md" => Some(DocumentFormat::PlainText),
            _ => None,
        }
    }
}

/// Default extractor: PDF via `pdf-extract`, DOCX via the zip reader, plain
/// text straight from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTextExtractor;

impl FileTextExtractor {
    fn read(&self, path: &Path) -> Result<String> {
        let format = DocumentFormat::from_path(path)
            .ok_or_else(|| anyhow!("Unsupported file type: {}", path.display()))?;
        match format {
            DocumentFormat::Pdf => extract_pdf_text(path),
            DocumentFormat::Docx => docx::extract_docx_text(path),
            DocumentFormat::PlainText => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
        }
    }
}

/// pdf-extract panics on some malformed content streams; a panic is treated
/// like any other read failure.
fn extract_pdf_text(path: &Path) -> Result<String> {
    match std::panic::catch_unwind(|| pdf_extract::extract_text(path)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(anyhow!("PDF extraction failed for {}: {e}", path.display())),
        Err(_) => Err(anyhow!("PDF reader panicked on {}", path.display())),
    }
}

impl TextExtractor for FileTextExtractor {
    fn extract_text(&self, path: &Path) -> Option<String> {
        match self.read(path) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!("Text extraction failed: {e:#}");
                None
            }
        }
    }
}
