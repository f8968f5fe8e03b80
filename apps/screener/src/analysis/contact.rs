//! Contact extraction: first email, first phone number, and a best-guess name.

use crate::analysis::keywords::Patterns;
use crate::analysis::normalizer::Document;
use crate::models::analysis::{ContactInfo, NOT_FOUND};

/// Only the top of the document is considered for the candidate's name.
const NAME_SCAN_LINES: usize = 5;

pub fn extract_contact(doc: &Document, patterns: &Patterns) -> ContactInfo {
    let first_match = |re: &regex::Regex| {
        re.find(doc.text())
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| NOT_FOUND.to_string())
    };

    ContactInfo {
        full_name: guess_name(doc.lines()).unwrap_or_else(|| NOT_FOUND.to_string()),
        email: first_match(&patterns.email),
        phone: first_match(&patterns.phone),
    }
}

/// First of the leading lines that is longer than two characters and is
/// neither a "Resume" banner nor an email line. Header words like
/// "Curriculum Vitae" still pass; this is a heuristic.
fn guess_name(lines: &[String]) -> Option<String> {
    lines
        .iter()
        .take(NAME_SCAN_LINES)
        .map(|line| line.trim())
        .find(|line| {
            line.chars().count() > 2
                && !line.to_lowercase().contains("resume")
                && !line.contains('@')
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_for(text: &str) -> ContactInfo {
        let doc = Document::from_extracted(Some(text)).unwrap();
        extract_contact(&doc, &Patterns::compile().unwrap())
    }

    #[test]
    fn test_extracts_all_fields() {
        let info = contact_for("John Doe\njohn@x.com\n555-123-4567\nEXPERIENCE");
        assert_eq!(info.full_name, "John Doe");
        assert_eq!(info.email, "john@x.com");
        assert_eq!(info.phone, "555-123-4567");
    }

    #[test]
    fn test_skips_resume_banner_and_email_lines() {
        let info = contact_for("RESUME\nJo\nmail: jo@site.io\n  Joanna Smith  \nSkills");
        assert_eq!(info.full_name, "Joanna Smith");
    }

    #[test]
    fn test_name_only_scans_first_five_lines() {
        let info = contact_for("CV\n@\nab\nResume\nx\nRealName Here");
        assert_eq!(info.full_name, NOT_FOUND);
    }

    #[test]
    fn test_missing_fields_default_to_not_found() {
        let info = contact_for("Alexandra\nno contact details here");
        assert_eq!(info.email, NOT_FOUND);
        assert_eq!(info.phone, NOT_FOUND);
        assert_eq!(info.full_name, "Alexandra");
    }

    #[test]
    fn test_first_email_wins() {
        let info = contact_for("Sam Lee\nsam@first.com, sam@second.org");
        assert_eq!(info.email, "sam@first.com");
    }

    #[test]
    fn test_email_is_substring_of_text() {
        let text = "Pat Kim\nContact: pat.kim+jobs@uni.edu.au | (020) 555-0199";
        let info = contact_for(text);
        assert!(text.contains(&info.email));
        assert_eq!(info.email, "pat.kim+jobs@uni.edu.au");
    }

    #[test]
    fn test_parenthesized_area_code() {
        let info = contact_for("Pat Kim\nPhone: (415) 555-0199");
        assert_eq!(info.phone, "(415) 555-0199");
    }
}
