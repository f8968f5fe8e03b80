//! Soft-skill scoring by keyword frequency.
//!
//! A skill's score is the number of lemma tokens equal to one of its keywords
//! plus the number of non-overlapping substring occurrences of each keyword in
//! the lowercased text. A keyword that is also a lemma therefore counts twice.

use std::collections::HashMap;

use crate::analysis::keywords::SkillKeywords;
use crate::analysis::lemmatizer::Lemmatizer;
use crate::models::analysis::{PersonalityProfile, Rating, SkillScore, SoftSkill};

/// Lowest score rated High.
pub const HIGH_THRESHOLD: u32 = 10;
/// Lowest score rated Medium.
pub const MEDIUM_THRESHOLD: u32 = 4;

pub fn rate(score: u32) -> Rating {
    match score {
        s if s >= HIGH_THRESHOLD => Rating::High,
        s if s >= MEDIUM_THRESHOLD => Rating::Medium,
        0 => Rating::NotDetected,
        _ => Rating::Low,
    }
}

pub fn score_personality(
    text: &str,
    table: &[SkillKeywords],
    lemmatizer: &dyn Lemmatizer,
) -> PersonalityProfile {
    let lowered = text.to_lowercase();

    let Some(tokens) = lemmatizer.lemmatize_and_filter(&lowered) else {
        return SoftSkill::ALL
            .iter()
            .map(|skill| (*skill, SkillScore(Rating::NotAvailable, 0)))
            .collect();
    };

    let mut token_counts: HashMap<&str, u32> = HashMap::new();
    for token in &tokens {
        *token_counts.entry(token.as_str()).or_default() += 1;
    }

    let mut profile: PersonalityProfile = SoftSkill::ALL
        .iter()
        .map(|skill| (*skill, SkillScore(Rating::NotDetected, 0)))
        .collect();

    for entry in table {
        let score: u32 = entry
            .keywords
            .iter()
            .map(|k| {
                let as_token = token_counts.get(k.as_str()).copied().unwrap_or(0);
                let as_substring = lowered.matches(k.as_str()).count() as u32;
                as_token + as_substring
            })
            .sum();
        profile.insert(entry.skill, SkillScore(rate(score), score));
    }

    profile
}
