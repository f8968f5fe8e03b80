//! Seniority estimation from year mentions and title keywords.
//!
//! Rule cascade, first match wins:
//! 1. span ≤ 1 and a fresher keyword anywhere → Fresher / Entry-Level
//! 2. span = 0 and no title bump → Entry-Level (Uncertain)
//! 3. span < 3 → Junior, < 7 → Mid-Level, else Senior
//! 4. title bump upgrades Junior (span > 1) to Junior-Mid and Mid-Level to Mid-Senior

use regex::Regex;

use crate::analysis::keywords::KeywordTables;
use crate::models::analysis::{ExperienceEstimate, ExperienceLevel};

/// Years before this are treated as noise (birth years, school dates).
const MIN_YEAR: i32 = 1980;

/// The facts the cascade decides on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceSignals {
    /// Plausible years from the experience section, ascending.
    pub years: Vec<i32>,
    pub title_bump: bool,
    pub fresher_hint: bool,
}

impl ExperienceSignals {
    pub fn gather(
        full_text: &str,
        experience_text: &str,
        tables: &KeywordTables,
        year_re: &Regex,
        current_year: i32,
    ) -> Self {
        let lowered = full_text.to_lowercase();
        let contains_any = |words: &[String]| words.iter().any(|w| lowered.contains(w.as_str()));
        Self {
            years: detect_years(experience_text, year_re, current_year),
            title_bump: contains_any(tables.title_bump.as_slice()),
            fresher_hint: contains_any(tables.fresher.as_slice()),
        }
    }

    /// `max - min` of the detected years, 0 when none were found.
    pub fn span(&self) -> i32 {
        match (self.years.first(), self.years.last()) {
            (Some(min), Some(max)) => max - min,
            _ => 0,
        }
    }
}

pub fn detect_years(experience_text: &str, year_re: &Regex, current_year: i32) -> Vec<i32> {
    let mut years: Vec<i32> = year_re
        .find_iter(experience_text)
        .filter_map(|m| m.as_str().parse().ok())
        .filter(|y| (MIN_YEAR..=current_year).contains(y))
        .collect();
    years.sort_unstable();
    years
}

pub fn classify(signals: &ExperienceSignals) -> ExperienceEstimate {
    let span = signals.span();

    if span <= 1 && signals.fresher_hint {
        return ExperienceEstimate {
            level: ExperienceLevel::FresherEntryLevel,
            detail: "0-1 Years (inferred)".to_string(),
        };
    }

    if span == 0 && !signals.title_bump {
        return ExperienceEstimate {
            level: ExperienceLevel::EntryLevelUncertain,
            detail: "No dates found".to_string(),
        };
    }

    let mut level = match span {
        s if s < 3 => ExperienceLevel::Junior,
        s if s < 7 => ExperienceLevel::MidLevel,
        _ => ExperienceLevel::Senior,
    };

    if signals.title_bump {
        level = match level {
            ExperienceLevel::Junior if span > 1 => ExperienceLevel::JuniorMid,
            ExperienceLevel::MidLevel => ExperienceLevel::MidSenior,
            other => other,
        };
    }

    let bound = |y: Option<&i32>| y.map_or_else(|| "?".to_string(), i32::to_string);
    ExperienceEstimate {
        level,
        detail: format!(
            "{span} Years detected ({} - {})",
            bound(signals.years.first()),
            bound(signals.years.last())
        ),
    }
}

pub fn estimate_experience(
    full_text: &str,
    experience_text: &str,
    tables: &KeywordTables,
    year_re: &Regex,
    current_year: i32,
) -> ExperienceEstimate {
    let signals =
        ExperienceSignals::gather(full_text, experience_text, tables, year_re, current_year);
    tracing::debug!(
        years = ?signals.years,
        title_bump = signals.title_bump,
        fresher_hint = signals.fresher_hint,
        "Experience signals gathered"
    );
    classify(&signals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::keywords::Patterns;

    const NOW: i32 = 2026;

    fn signals(span: i32, title_bump: bool) -> ExperienceSignals {
        let years = if span == 0 { vec![] } else { vec![2010, 2010 + span] };
        ExperienceSignals {
            years,
            title_bump,
            fresher_hint: false,
        }
    }

    fn estimate(full: &str, exp: &str) -> ExperienceEstimate {
        let patterns = Patterns::compile().unwrap();
        estimate_experience(full, exp, &KeywordTables::default(), &patterns.year, NOW)
    }

    #[test]
    fn test_years_filtered_and_sorted() {
        let re = Patterns::compile().unwrap().year;
        let years = detect_years(
            "2019 born 1975, 2031 then 2012 and 2026; school 1979, first job 1980",
            &re,
            NOW,
        );
        assert_eq!(years, vec![1980, 2012, 2019, 2026]);
    }

    #[test]
    fn test_no_dates_no_bump_is_uncertain() {
        let est = estimate("Jane\nExperience\nDeveloper at Acme", "Developer at Acme ");
        assert_eq!(est.level, ExperienceLevel::EntryLevelUncertain);
        assert_eq!(est.detail, "No dates found");
    }

    #[test]
    fn test_fresher_keyword_overrides() {
        let est = estimate("Recent graduate seeking roles", "Intern 2025 ");
        assert_eq!(est.level, ExperienceLevel::FresherEntryLevel);
        assert_eq!(est.detail, "0-1 Years (inferred)");
    }

    #[test]
    fn test_fresher_keyword_ignored_for_long_span() {
        let est = estimate("graduate of MIT", "Acme 2012 Beta 2020 ");
        assert_eq!(est.level, ExperienceLevel::Senior);
        assert_eq!(est.detail, "8 Years detected (2012 - 2020)");
    }

    #[test]
    fn test_scenario_without_bump_is_mid_level() {
        let full = "John Doe\njohn@x.com\n555-123-4567\nEXPERIENCE\nLed team 2015\nManaged project 2020";
        let est = estimate(full, "Led team 2015 Managed project 2020 ");
        assert_eq!(est.level, ExperienceLevel::MidLevel);
        assert_eq!(est.detail, "5 Years detected (2015 - 2020)");
    }

    #[test]
    fn test_scenario_with_bump_is_mid_senior() {
        let full = "John Doe\nEngineering Manager\nEXPERIENCE\nLed team 2015\nManaged project 2020";
        let est = estimate(full, "Led team 2015 Managed project 2020 ");
        assert_eq!(est.level, ExperienceLevel::MidSenior);
    }

    #[test]
    fn test_bump_without_dates_is_junior_with_unknown_range() {
        let est = estimate("Senior Engineer", "");
        assert_eq!(est.level, ExperienceLevel::Junior);
        assert_eq!(est.detail, "0 Years detected (? - ?)");
    }

    #[test]
    fn test_junior_mid_needs_span_over_one() {
        assert_eq!(classify(&signals(1, true)).level, ExperienceLevel::Junior);
        assert_eq!(classify(&signals(2, true)).level, ExperienceLevel::JuniorMid);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(&signals(2, false)).level, ExperienceLevel::Junior);
        assert_eq!(classify(&signals(3, false)).level, ExperienceLevel::MidLevel);
        assert_eq!(classify(&signals(6, false)).level, ExperienceLevel::MidLevel);
        assert_eq!(classify(&signals(7, false)).level, ExperienceLevel::Senior);
        assert_eq!(classify(&signals(7, true)).level, ExperienceLevel::Senior);
    }

    #[test]
    fn test_labels_monotonic_in_span() {
        for bump in [false, true] {
            let ranks: Vec<_> = [0, 2, 5, 8]
                .iter()
                .map(|&span| classify(&signals(span, bump)).level.rank().unwrap())
                .collect();
            assert!(
                ranks.windows(2).all(|w| w[0] <= w[1]),
                "non-monotonic ranks {ranks:?} with title_bump={bump}"
            );
        }
    }
}
