//! Analyzer configuration: keyword tables and compiled patterns.
//!
//! Built once at startup and handed to every pipeline stage by reference.
//! Tables can be overridden from a JSON file (`KEYWORD_TABLES_PATH`).

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::analysis::{SectionTag, SoftSkill};

const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";
const PHONE_PATTERN: &str = r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}";
const YEAR_PATTERN: &str = r"\b(?:19|20)\d{2}\b";

/// Header synonyms for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionKeywords {
    pub section: SectionTag,
    pub keywords: Vec<String>,
}

/// Scoring keywords for one soft skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillKeywords {
    pub skill: SoftSkill,
    pub keywords: Vec<String>,
}

/// All keyword tables used by the pipeline. Table order is significant:
/// the first section whose keyword matches a header line wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordTables {
    pub sections: Vec<SectionKeywords>,
    pub personality: Vec<SkillKeywords>,
    /// Senior-sounding title words that bump the seniority label.
    pub title_bump: Vec<String>,
    /// Words that mark an explicit entry-level candidate.
    pub fresher: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Default for KeywordTables {
    fn default() -> Self {
        let sections = vec![
            SectionKeywords {
                section: SectionTag::Education,
                keywords: words(&["education", "academic", "qualifications", "university", "college"]),
            },
            SectionKeywords {
                section: SectionTag::Skills,
                keywords: words(&["skills", "technologies", "technical skills", "competencies", "stack"]),
            },
            SectionKeywords {
                section: SectionTag::Experience,
                keywords: words(&[
                    "experience",
                    "work history",
                    "employment",
                    "internships",
                    "career",
                    "professional experience",
                ]),
            },
            SectionKeywords {
                section: SectionTag::Achievements,
                keywords: words(&["achievements", "certifications", "awards", "honors", "licenses"]),
            },
            SectionKeywords {
                section: SectionTag::Projects,
                keywords: words(&["projects", "portfolio"]),
            },
        ];

        let personality = vec![
            SkillKeywords {
                skill: SoftSkill::Leadership,
                keywords: words(&[
                    "led", "managed", "spearheaded", "oversaw", "directed", "supervised", "guided",
                    "mentored", "chief", "head",
                ]),
            },
            SkillKeywords {
                skill: SoftSkill::Teamwork,
                keywords: words(&[
                    "collaborated", "team", "partnered", "assisted", "supported", "cooperated",
                    "joint", "group", "member",
                ]),
            },
            SkillKeywords {
                skill: SoftSkill::Communication,
                keywords: words(&[
                    "presented", "negotiated", "authored", "wrote", "corresponded", "spoke",
                    "briefed", "explained", "facilitated",
                ]),
            },
            SkillKeywords {
                skill: SoftSkill::ProblemSolving,
                keywords: words(&[
                    "solved", "resolved", "debugged", "fixed", "troubleshot", "analyzed",
                    "diagnosed", "improved", "optimized",
                ]),
            },
            SkillKeywords {
                skill: SoftSkill::Creativity,
                keywords: words(&[
                    "designed", "created", "innovated", "architected", "developed",
                    "conceptualized", "drafted", "originated",
                ]),
            },
            SkillKeywords {
                skill: SoftSkill::Adaptability,
                keywords: words(&[
                    "adapted", "adjusted", "flexible", "versatile", "changed", "learned",
                    "migrated", "transitioned",
                ]),
            },
        ];

        Self {
            sections,
            personality,
            title_bump: words(&["senior", "manager", "lead", "architect"]),
            fresher: words(&["fresher", "graduate", "entry level"]),
        }
    }
}

impl KeywordTables {
    /// Loads tables from a JSON file. Keywords are lowercased on load since
    /// every comparison runs against lowercased text.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read keyword tables from {}", path.display()))?;
        let tables: KeywordTables = serde_json::from_str(&raw)
            .with_context(|| format!("Keyword tables at {} are not valid JSON", path.display()))?;
        let tables = tables.lowercased();
        tables.validate()?;
        Ok(tables)
    }

    fn lowercased(mut self) -> Self {
        let lower = |list: &mut Vec<String>| {
            for w in list.iter_mut() {
                *w = w.trim().to_lowercase();
            }
        };
        self.sections.iter_mut().for_each(|s| lower(&mut s.keywords));
        self.personality.iter_mut().for_each(|p| lower(&mut p.keywords));
        lower(&mut self.title_bump);
        lower(&mut self.fresher);
        self
    }

    /// Rejects empty keywords and tags listed more than once.
    pub fn validate(&self) -> Result<()> {
        let mut seen_sections = HashSet::new();
        for entry in &self.sections {
            if !seen_sections.insert(entry.section) {
                bail!("Section '{}' is listed more than once", entry.section.as_str());
            }
            check_keywords(&entry.keywords, entry.section.as_str())?;
        }

        let mut seen_skills = HashSet::new();
        for entry in &self.personality {
            if !seen_skills.insert(entry.skill) {
                bail!("Soft skill {:?} is listed more than once", entry.skill);
            }
            check_keywords(&entry.keywords, &format!("{:?}", entry.skill))?;
        }

        check_keywords(&self.title_bump, "title_bump")?;
        check_keywords(&self.fresher, "fresher")?;
        Ok(())
    }
}

fn check_keywords(keywords: &[String], owner: &str) -> Result<()> {
    if keywords.iter().any(|k| k.is_empty()) {
        bail!("Keyword list '{owner}' contains an empty keyword");
    }
    Ok(())
}

/// Regexes used by the contact extractor and the experience estimator.
#[derive(Debug, Clone)]
pub struct Patterns {
    pub email: Regex,
    pub phone: Regex,
    pub year: Regex,
}

impl Patterns {
    pub fn compile() -> Result<Self> {
        Ok(Self {
            email: Regex::new(EMAIL_PATTERN).context("invalid email pattern")?,
            phone: Regex::new(PHONE_PATTERN).context("invalid phone pattern")?,
            year: Regex::new(YEAR_PATTERN).context("invalid year pattern")?,
        })
    }
}

/// Immutable configuration shared by every pipeline stage.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub tables: KeywordTables,
    pub patterns: Patterns,
}

impl AnalyzerConfig {
    pub fn new(tables: KeywordTables) -> Result<Self> {
        tables.validate()?;
        Ok(Self {
            tables,
            patterns: Patterns::compile()?,
        })
    }

    pub fn with_default_tables() -> Result<Self> {
        Self::new(KeywordTables::default())
    }
}
