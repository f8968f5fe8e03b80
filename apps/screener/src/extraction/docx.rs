//! Plain-text extraction from Word (.docx) packages.
//!
//! A .docx is a zip archive; the body lives in `word/document.xml`. Each
//! `<w:p>` paragraph becomes one line built from its `<w:t>` runs.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

const DOCUMENT_PART: &str = "word/document.xml";
const RUN_PATTERN: &str = r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:tab\s*/>|<w:br\s*/>";
const CHAR_REF_PATTERN: &str = r"&#(?:x([0-9A-Fa-f]+)|([0-9]+));";

pub fn extract_docx_text(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut archive = zip::ZipArchive::new(file).context("Not a valid .docx archive")?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .with_context(|| format!("Archive has no {DOCUMENT_PART}"))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .context("Document body is not valid UTF-8")?;

    document_xml_to_text(&xml)
}

pub fn document_xml_to_text(xml: &str) -> Result<String> {
    let run_re = Regex::new(RUN_PATTERN).context("invalid docx run pattern")?;
    let char_ref_re = Regex::new(CHAR_REF_PATTERN).context("invalid character reference pattern")?;

    let paragraphs: Vec<String> = xml
        .split("</w:p>")
        .map(|paragraph| {
            let mut line = String::new();
            for caps in run_re.captures_iter(paragraph) {
                match caps.get(1) {
                    Some(text) => line.push_str(&unescape(text.as_str(), &char_ref_re)),
                    None if caps[0].starts_with("<w:tab") => line.push('\t'),
                    None => line.push('\n'),
                }
            }
            line
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

/// Decodes the predefined XML entities and numeric character references.
/// `&amp;` goes last so `&amp;lt;` stays the literal text `&lt;`.
fn unescape(s: &str, char_ref_re: &Regex) -> String {
    let named = s
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'");
    let numeric = char_ref_re.replace_all(&named, |caps: &regex::Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (None, Some(dec)) => dec.as_str().parse::<u32>().ok(),
            (None, None) => None,
        };
        // Out-of-range references are left as written.
        code.and_then(char::from_u32)
            .map_or_else(|| caps[0].to_string(), |c| c.to_string())
    });
    numeric.replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn paragraph(runs: &str) -> String {
        format!("<w:p><w:pPr><w:pStyle w:val=\"Normal\"/></w:pPr>{runs}</w:p>")
    }

    fn write_docx(body: &str) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let mut zip = zip::ZipWriter::new(file.reopen().unwrap());
        zip.start_file(DOCUMENT_PART, zip::write::FileOptions::default())
            .unwrap();
        let xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><w:document><w:body>{body}</w:body></w:document>"
        );
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
        file
    }

    #[test]
    fn test_paragraphs_become_lines() {
        let body = [
            paragraph("<w:r><w:t>Jane</w:t></w:r><w:r><w:t xml:space=\"preserve\"> Roe</w:t></w:r>"),
            paragraph("<w:r><w:t>EXPERIENCE</w:t></w:r>"),
            paragraph("<w:r><w:t>Acme</w:t><w:tab/><w:t>2019</w:t></w:r>"),
        ]
        .concat();
        let file = write_docx(&body);
        let text = extract_docx_text(file.path()).unwrap();
        assert!(text.starts_with("Jane Roe\nEXPERIENCE\nAcme\t2019"));
    }

    #[test]
    fn test_entities_are_unescaped() {
        let xml = paragraph("<w:r><w:t>R&amp;D &lt;core&gt; &amp;lt;</w:t></w:r>");
        assert_eq!(document_xml_to_text(&xml).unwrap(), "R&D <core> &lt;\n");
    }

    #[test]
    fn test_numeric_character_references_are_decoded() {
        let xml = paragraph("<w:r><w:t>Se&#241;ora O&#x2019;Brien</w:t></w:r>");
        assert_eq!(document_xml_to_text(&xml).unwrap(), "Se\u{f1}ora O\u{2019}Brien\n");
    }

    #[test]
    fn test_escaped_and_invalid_references_stay_literal() {
        let xml = paragraph("<w:r><w:t>&amp;#241; &#xD800; &#99999999;</w:t></w:r>");
        assert_eq!(
            document_xml_to_text(&xml).unwrap(),
            "&#241; &#xD800; &#99999999;\n"
        );
    }

    #[test]
    fn test_line_break_inside_paragraph() {
        let xml = paragraph("<w:r><w:t>a</w:t><w:br/><w:t>b</w:t></w:r>");
        assert_eq!(document_xml_to_text(&xml).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_non_zip_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"plain text, not a zip").unwrap();
        assert!(extract_docx_text(file.path()).is_err());
    }
}
