use crate::errors::AnalysisError;

/// A résumé reduced to its canonical text and line sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    text: String,
    lines: Vec<String>,
}

impl Document {
    /// Builds a document from the extractor's output. `None` (extraction
    /// failed) and whitespace-only text are both unreadable.
    pub fn from_extracted(raw: Option<&str>) -> Result<Self, AnalysisError> {
        let raw = raw.ok_or(AnalysisError::UnreadableDocument)?;
        let text = normalize(raw);
        if text.is_empty() {
            return Err(AnalysisError::UnreadableDocument);
        }
        let lines = text.split('\n').map(str::to_string).collect();
        Ok(Self { text, lines })
    }

    /// Normalized full text (newline-joined lines).
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Unifies line endings, collapses runs of newlines into one and trims the
/// whole document. Lines holding only spaces are kept; the segmenter skips them.
pub fn normalize(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(unified.len());
    let mut prev_newline = false;
    for c in unified.chars() {
        if c == '\n' {
            if prev_newline {
                continue;
            }
            prev_newline = true;
        } else {
            prev_newline = false;
        }
        out.push(c);
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_blank_line_runs() {
        assert_eq!(normalize("a\n\n\n\nb\nc\n\n"), "a\nb\nc");
    }

    #[test]
    fn test_handles_windows_line_endings() {
        assert_eq!(normalize("a\r\n\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_trims_document_but_keeps_space_only_lines() {
        let doc = Document::from_extracted(Some("\n\n  Jane Roe\n   \nSkills  \n")).unwrap();
        assert_eq!(doc.lines(), &["Jane Roe", "   ", "Skills"]);
        assert_eq!(doc.text(), "Jane Roe\n   \nSkills");
    }

    #[test]
    fn test_absent_text_is_unreadable() {
        assert_eq!(
            Document::from_extracted(None),
            Err(AnalysisError::UnreadableDocument)
        );
    }

    #[test]
    fn test_blank_text_is_unreadable() {
        assert_eq!(
            Document::from_extracted(Some(" \n\n\t ")),
            Err(AnalysisError::UnreadableDocument)
        );
    }
}
