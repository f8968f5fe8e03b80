//! Section segmentation as a single forward pass over the normalized lines.
//!
//! A short line containing a section keyword is a header: it switches the
//! active section and is itself discarded. Every other non-blank line lands
//! in the active section. Lines seen before the first header are dropped.

use std::collections::BTreeMap;

use crate::analysis::keywords::SectionKeywords;
use crate::models::analysis::SectionTag;

/// Header lines must have fewer whitespace-delimited tokens than this.
const HEADER_MAX_TOKENS: usize = 5;

/// Section tag → content lines, in document order. Every tag is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMap {
    sections: BTreeMap<SectionTag, Vec<String>>,
}

impl Default for SectionMap {
    fn default() -> Self {
        Self {
            sections: SectionTag::ALL.iter().map(|t| (*t, Vec::new())).collect(),
        }
    }
}

impl SectionMap {
    pub fn get(&self, tag: SectionTag) -> &[String] {
        self.sections.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Moves one section's lines out of the map.
    pub fn take(&mut self, tag: SectionTag) -> Vec<String> {
        self.sections.get_mut(&tag).map(std::mem::take).unwrap_or_default()
    }

    fn push(&mut self, tag: SectionTag, line: String) {
        self.sections.entry(tag).or_default().push(line);
    }
}

/// Output of segmentation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segmentation {
    pub sections: SectionMap,
    /// Experience lines as they appeared (untrimmed), each followed by a
    /// space. Feeds date extraction only.
    pub experience_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmenterState {
    Idle,
    InSection(SectionTag),
}

pub fn segment(lines: &[String], table: &[SectionKeywords]) -> Segmentation {
    let mut out = Segmentation::default();
    let mut state = SegmenterState::Idle;

    for line in lines {
        let trimmed = line.trim();
        if let Some(tag) = detect_header(&trimmed.to_lowercase(), table) {
            state = SegmenterState::InSection(tag);
            continue;
        }

        let SegmenterState::InSection(tag) = state else {
            continue;
        };
        if trimmed.is_empty() {
            continue;
        }

        out.sections.push(tag, trimmed.to_string());
        if tag == SectionTag::Experience {
            out.experience_text.push_str(line);
            out.experience_text.push(' ');
        }
    }

    out
}

/// First section (in table order) with a keyword contained in the line,
/// provided the line is short enough to be a header.
fn detect_header(lowered: &str, table: &[SectionKeywords]) -> Option<SectionTag> {
    if lowered.split_whitespace().count() >= HEADER_MAX_TOKENS {
        return None;
    }
    table
        .iter()
        .find(|entry| entry.keywords.iter().any(|k| lowered.contains(k.as_str())))
        .map(|entry| entry.section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::keywords::KeywordTables;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    fn run(text: &str) -> Segmentation {
        segment(&lines(text), &KeywordTables::default().sections)
    }

    #[test]
    fn test_lines_before_first_header_are_dropped() {
        let seg = run("Jane Roe\njane@roe.dev\nSKILLS\nRust, Go");
        assert_eq!(seg.sections.get(SectionTag::Skills), &["Rust, Go"]);
        for tag in [SectionTag::Education, SectionTag::Experience, SectionTag::Projects] {
            assert!(seg.sections.get(tag).is_empty());
        }
    }

    #[test]
    fn test_header_line_is_not_content() {
        let seg = run("Professional Experience\nEngineer at Acme");
        assert_eq!(seg.sections.get(SectionTag::Experience), &["Engineer at Acme"]);
    }

    #[test]
    fn test_long_line_with_keyword_is_content() {
        let seg = run("Experience\nBuilt the education platform for the whole district");
        assert_eq!(
            seg.sections.get(SectionTag::Experience),
            &["Built the education platform for the whole district"]
        );
        assert!(seg.sections.get(SectionTag::Education).is_empty());
    }

    #[test]
    fn test_first_table_entry_wins_on_multiple_keywords() {
        // "skills" (skills) and "career" (experience) both match; skills comes first.
        let seg = run("Career Skills\nNegotiation");
        assert_eq!(seg.sections.get(SectionTag::Skills), &["Negotiation"]);
        assert!(seg.sections.get(SectionTag::Experience).is_empty());
    }

    #[test]
    fn test_sections_switch_and_accumulate() {
        let seg = run(
            "EDUCATION\nBSc CS, 2016\nEXPERIENCE\nDev, Acme 2016-2019\nLead, Beta 2019-2023\n\
             AWARDS\nHackathon winner\nPROJECTS\nrustfmt plugin",
        );
        assert_eq!(seg.sections.get(SectionTag::Education), &["BSc CS, 2016"]);
        assert_eq!(
            seg.sections.get(SectionTag::Experience),
            &["Dev, Acme 2016-2019", "Lead, Beta 2019-2023"]
        );
        assert_eq!(seg.sections.get(SectionTag::Achievements), &["Hackathon winner"]);
        assert_eq!(seg.sections.get(SectionTag::Projects), &["rustfmt plugin"]);
    }

    #[test]
    fn test_experience_text_keeps_untrimmed_lines() {
        let seg = run("Experience\n  Dev 2018  \n   \nLead 2021");
        assert_eq!(seg.experience_text, "  Dev 2018   Lead 2021 ");
        assert_eq!(seg.sections.get(SectionTag::Experience), &["Dev 2018", "Lead 2021"]);
    }

    #[test]
    fn test_segmentation_is_deterministic() {
        let text = "Skills\nRust\nExperience\nAcme 2019\nProjects\nCLI";
        assert_eq!(run(text), run(text));
    }

    #[test]
    fn test_substituted_table() {
        let table = vec![SectionKeywords {
            section: SectionTag::Projects,
            keywords: vec!["side quests".to_string()],
        }];
        let seg = segment(&lines("Side Quests\nToy compiler\nSkills\nRust"), &table);
        assert_eq!(seg.sections.get(SectionTag::Projects), &["Toy compiler", "Skills", "Rust"]);
    }

    #[test]
    fn test_take_moves_lines_out() {
        let mut seg = run("Skills\nRust");
        assert_eq!(seg.sections.take(SectionTag::Skills), vec!["Rust".to_string()]);
        assert!(seg.sections.get(SectionTag::Skills).is_empty());
    }
}
