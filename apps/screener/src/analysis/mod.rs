//! Résumé analysis pipeline.
//!
//! normalize → contact + sections → experience estimate + personality profile.
//! Every stage is a pure function of the document and the `AnalyzerConfig`;
//! the only failure is a document with no readable text.

pub mod contact;
pub mod experience;
pub mod handlers;
pub mod keywords;
pub mod lemmatizer;
pub mod normalizer;
pub mod personality;
pub mod sections;

use std::path::Path;
use std::sync::Arc;

use chrono::Datelike;

use crate::analysis::contact::extract_contact;
use crate::analysis::experience::estimate_experience;
use crate::analysis::keywords::AnalyzerConfig;
use crate::analysis::lemmatizer::Lemmatizer;
use crate::analysis::normalizer::Document;
use crate::analysis::personality::score_personality;
use crate::analysis::sections::segment;
use crate::errors::AnalysisError;
use crate::extraction::TextExtractor;
use crate::models::analysis::{AiAnalysis, AnalysisResult, SectionTag};

/// Runs the full pipeline. Cheap to share behind an `Arc`.
pub struct ResumeAnalyzer {
    config: AnalyzerConfig,
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl ResumeAnalyzer {
    pub fn new(config: AnalyzerConfig, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        Self { config, lemmatizer }
    }

    /// Extracts the file's text and analyzes it.
    pub fn analyze_file(
        &self,
        path: &Path,
        extractor: &dyn TextExtractor,
    ) -> Result<AnalysisResult, AnalysisError> {
        let raw = extractor.extract_text(path);
        self.analyze_text(raw.as_deref())
    }

    /// Analyzes already-extracted text against the current calendar year.
    pub fn analyze_text(&self, raw: Option<&str>) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_text_at(raw, chrono::Utc::now().year())
    }

    /// Same as `analyze_text` with an explicit "current year" for the
    /// experience estimator's plausibility window.
    pub fn analyze_text_at(
        &self,
        raw: Option<&str>,
        current_year: i32,
    ) -> Result<AnalysisResult, AnalysisError> {
        let doc = Document::from_extracted(raw)?;
        let tables = &self.config.tables;

        let contact = extract_contact(&doc, &self.config.patterns);
        let mut segmentation = segment(doc.lines(), &tables.sections);
        let sections = &segmentation.sections;
        tracing::debug!(
            skills = sections.get(SectionTag::Skills).len(),
            education = sections.get(SectionTag::Education).len(),
            experience = sections.get(SectionTag::Experience).len(),
            achievements = sections.get(SectionTag::Achievements).len(),
            projects = sections.get(SectionTag::Projects).len(),
            "Sections segmented"
        );
        let experience = estimate_experience(
            doc.text(),
            &segmentation.experience_text,
            tables,
            &self.config.patterns.year,
            current_year,
        );
        let personality = score_personality(doc.text(), &tables.personality, self.lemmatizer.as_ref());

        let sections = &mut segmentation.sections;
        Ok(AnalysisResult {
            contact,
            skills: sections.take(SectionTag::Skills),
            education: sections.take(SectionTag::Education),
            experience: sections.take(SectionTag::Experience),
            achievements: sections.take(SectionTag::Achievements),
            ai_analysis: AiAnalysis {
                experience,
                personality,
            },
        })
    }
}
