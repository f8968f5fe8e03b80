//! Analysis result records and their persisted JSON form.
//!
//! Field names on the serialized structs are part of the export contract
//! (`"Full Name"`, `"AI_Analysis"`, ...). Do not rename them.

use std::collections::BTreeMap;
use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter};

/// Sentinel used for any contact field that could not be extracted.
pub const NOT_FOUND: &str = "Not Found";

/// Error message carried by the persisted error form.
pub const UNREADABLE_MESSAGE: &str = "Could not extract text.";

// ────────────────────────────────────────────────────────────────────────────
// Closed vocabularies
// ────────────────────────────────────────────────────────────────────────────

/// A résumé content block. Declaration order is the header-matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionTag {
    Education,
    Skills,
    Experience,
    Achievements,
    Projects,
}

impl SectionTag {
    pub const ALL: [SectionTag; 5] = [
        SectionTag::Education,
        SectionTag::Skills,
        SectionTag::Experience,
        SectionTag::Achievements,
        SectionTag::Projects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionTag::Education => "education",
            SectionTag::Skills => "skills",
            SectionTag::Experience => "experience",
            SectionTag::Achievements => "achievements",
            SectionTag::Projects => "projects",
        }
    }
}

/// Soft-skill categories scored by the personality scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SoftSkill {
    Leadership,
    Teamwork,
    Communication,
    #[serde(rename = "Problem Solving")]
    ProblemSolving,
    Creativity,
    Adaptability,
}

impl SoftSkill {
    pub const ALL: [SoftSkill; 6] = [
        SoftSkill::Leadership,
        SoftSkill::Teamwork,
        SoftSkill::Communication,
        SoftSkill::ProblemSolving,
        SoftSkill::Creativity,
        SoftSkill::Adaptability,
    ];
}

/// Bucketed keyword-frequency rating for one soft skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "Not Detected")]
    NotDetected,
    Low,
    Medium,
    High,
    /// Linguistic tokenization was unavailable for this run.
    #[serde(rename = "N/A")]
    NotAvailable,
}

/// Seniority scale. `rank` gives the ordering used for comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Fresher / Entry-Level")]
    FresherEntryLevel,
    #[serde(rename = "Entry-Level (Uncertain)")]
    EntryLevelUncertain,
    Junior,
    #[serde(rename = "Junior-Mid")]
    JuniorMid,
    #[serde(rename = "Mid-Level")]
    MidLevel,
    #[serde(rename = "Mid-Senior")]
    MidSenior,
    Senior,
    /// Part of the label scale; the rule cascade never produces it.
    #[allow(dead_code)]
    Unknown,
}

impl ExperienceLevel {
    /// Position on the seniority scale; `None` for `Unknown`.
    /// Both entry-level labels share the lowest rank.
    #[cfg(test)]
    pub fn rank(&self) -> Option<u8> {
        match self {
            ExperienceLevel::FresherEntryLevel | ExperienceLevel::EntryLevelUncertain => Some(0),
            ExperienceLevel::Junior => Some(1),
            ExperienceLevel::JuniorMid => Some(2),
            ExperienceLevel::MidLevel => Some(3),
            ExperienceLevel::MidSenior => Some(4),
            ExperienceLevel::Senior => Some(5),
            ExperienceLevel::Unknown => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(rename = "Full Name")]
    pub full_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEstimate {
    #[serde(rename = "Experience_Level")]
    pub level: ExperienceLevel,
    #[serde(rename = "Experience_Detail")]
    pub detail: String,
}

/// `(rating, raw score)`; serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillScore(pub Rating, pub u32);

/// Ordered by `SoftSkill` declaration order, which is also the export order.
pub type PersonalityProfile = BTreeMap<SoftSkill, SkillScore>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAnalysis {
    #[serde(flatten)]
    pub experience: ExperienceEstimate,
    #[serde(rename = "Personality")]
    pub personality: PersonalityProfile,
}

/// Everything extracted from one résumé.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub contact: ContactInfo,
    #[serde(rename = "Skills")]
    pub skills: Vec<String>,
    #[serde(rename = "Education")]
    pub education: Vec<String>,
    #[serde(rename = "Experience")]
    pub experience: Vec<String>,
    #[serde(rename = "Achievements")]
    pub achievements: Vec<String>,
    #[serde(rename = "AI_Analysis")]
    pub ai_analysis: AiAnalysis,
}

/// Outward form of one analysis run: either the full record or `{"Error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisReport {
    Failed {
        #[serde(rename = "Error")]
        error: String,
    },
    Completed(AnalysisResult),
}

impl AnalysisReport {
    pub fn unreadable() -> Self {
        AnalysisReport::Failed {
            error: UNREADABLE_MESSAGE.to_string(),
        }
    }

    /// Serializes to the persisted form: pretty-printed JSON with 4-space
    /// indentation and non-ASCII characters written as `\uXXXX` escapes.
    pub fn to_persisted_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PersistedFormatter::new());
        self.serialize(&mut ser)?;
        // the formatter only ever writes ASCII
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Decoder for exported reports; the service itself only encodes.
    #[allow(dead_code)]
    pub fn from_persisted_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl From<AnalysisResult> for AnalysisReport {
    fn from(result: AnalysisResult) -> Self {
        AnalysisReport::Completed(result)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Persisted formatter
// ────────────────────────────────────────────────────────────────────────────

/// `PrettyFormatter` with a 4-space indent that escapes every non-ASCII
/// character as one or two (surrogate pair) `\uXXXX` sequences.
struct PersistedFormatter {
    inner: PrettyFormatter<'static>,
}

impl PersistedFormatter {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"    "),
        }
    }
}

impl Formatter for PersistedFormatter {
    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if c.is_ascii() {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }
}
