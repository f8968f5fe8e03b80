//! Lemmatizer seam used by the personality scorer.
//!
//! `RuleLemmatizer` is a small English lemmatizer: Unicode word segmentation,
//! stop-word filtering, an irregular-form table and a handful of suffix rules.
//! `UnavailableLemmatizer` stands in when linguistic processing is switched
//! off; the scorer then reports every soft skill as `N/A`.
//!
//! `AppState` carries the analyzer, which holds an `Arc<dyn Lemmatizer>`
//! selected at startup via `LEMMATIZER`.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::bail;
use unicode_segmentation::UnicodeSegmentation;

/// Turns text into lowercase lemmas with stop words and punctuation removed.
pub trait Lemmatizer: Send + Sync {
    /// `None` when the backend cannot process text at all.
    fn lemmatize_and_filter(&self, text: &str) -> Option<Vec<String>>;
}

// ────────────────────────────────────────────────────────────────────────────
// Backend selection
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LemmatizerKind {
    Rule,
    Disabled,
}

impl FromStr for LemmatizerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rule" => Ok(LemmatizerKind::Rule),
            "none" => Ok(LemmatizerKind::Disabled),
            other => bail!("Unknown lemmatizer '{other}' (expected 'rule' or 'none')"),
        }
    }
}

impl fmt::Display for LemmatizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LemmatizerKind::Rule => f.write_str("rule"),
            LemmatizerKind::Disabled => f.write_str("none"),
        }
    }
}

pub fn build_lemmatizer(kind: LemmatizerKind) -> Arc<dyn Lemmatizer> {
    match kind {
        LemmatizerKind::Rule => Arc::new(RuleLemmatizer::new()),
        LemmatizerKind::Disabled => {
            tracing::warn!("Lemmatizer disabled; personality scores will be reported as N/A");
            Arc::new(UnavailableLemmatizer)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Backends
// ────────────────────────────────────────────────────────────────────────────

/// Always reports itself unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableLemmatizer;

impl Lemmatizer for UnavailableLemmatizer {
    fn lemmatize_and_filter(&self, _text: &str) -> Option<Vec<String>> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct RuleLemmatizer {
    stop_words: HashSet<&'static str>,
}

impl Default for RuleLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleLemmatizer {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize_and_filter(&self, text: &str) -> Option<Vec<String>> {
        let lowered = text.to_lowercase();
        let lemmas = lowered
            .unicode_words()
            .filter(|w| !self.is_stop_word(w))
            .map(lemma)
            .collect();
        Some(lemmas)
    }
}

/// Base form of a single lowercase word.
pub fn lemma(word: &str) -> String {
    if let Some(base) = irregular(word) {
        return base.to_string();
    }
    if !word.chars().all(|c| c.is_ascii_lowercase()) {
        return word.to_string();
    }

    let len = word.len();
    if word.ends_with("ies") && len > 4 {
        return format!("{}y", &word[..len - 3]);
    }
    if word.ends_with("sses") {
        return word[..len - 2].to_string();
    }
    if len > 4 && ["ches", "shes", "xes", "zes"].iter().any(|s| word.ends_with(s)) {
        return word[..len - 2].to_string();
    }
    if word.ends_with('s') && len > 3 && !["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
        return word[..len - 1].to_string();
    }
    if word.ends_with("ied") && len > 4 {
        return format!("{}y", &word[..len - 3]);
    }
    if word.ends_with("eed") {
        return word.to_string();
    }
    if word.ends_with("ed") && len > 4 {
        return restore(&word[..len - 2]).unwrap_or_else(|| word.to_string());
    }
    if word.ends_with("ing") && len > 5 {
        return restore(&word[..len - 3]).unwrap_or_else(|| word.to_string());
    }
    word.to_string()
}

/// Rebuilds a base form from a stem left by stripping "-ed" or "-ing".
/// `None` when the stem has no vowel (e.g. "red", "string").
fn restore(stem: &str) -> Option<String> {
    if !stem.contains(['a', 'e', 'i', 'o', 'u', 'y']) {
        return None;
    }

    let bytes = stem.as_bytes();
    if let [.., a, b] = bytes {
        if a == b && !b"aeiouylsfzd".contains(b) {
            return Some(stem[..stem.len() - 1].to_string());
        }
    }

    const SILENT_E: [&str; 18] = [
        "at", "iz", "yz", "ag", "uc", "v", "ang", "eng", "rg", "dg", "nc", "rc", "uid", "os",
        "ir", "ur", "bl", "tl",
    ];
    if SILENT_E.iter().any(|s| stem.ends_with(s)) {
        return Some(format!("{stem}e"));
    }
    Some(stem.to_string())
}

fn irregular(word: &str) -> Option<&'static str> {
    let base = match word {
        "led" => "lead",
        "wrote" | "written" => "write",
        "spoke" | "spoken" => "speak",
        "taught" => "teach",
        "built" => "build",
        "ran" | "running" => "run",
        "made" | "making" => "make",
        "took" | "taken" | "taking" => "take",
        "brought" => "bring",
        "began" | "begun" => "begin",
        "drove" | "driven" => "drive",
        "grew" | "grown" => "grow",
        "won" => "win",
        "sought" => "seek",
        "thought" => "think",
        "bought" => "buy",
        "found" => "find",
        "held" => "hold",
        "kept" => "keep",
        "met" => "meet",
        "sent" => "send",
        "spent" => "spend",
        "went" | "gone" => "go",
        "did" | "done" => "do",
        "had" | "having" => "have",
        "chose" | "chosen" => "choose",
        "gave" | "given" => "give",
        "got" => "get",
        "knew" | "known" => "know",
        "saw" | "seen" => "see",
        "told" => "tell",
        "understood" => "understand",
        "learnt" => "learn",
        "felt" => "feel",
        "left" => "leave",
        "lost" => "lose",
        "paid" => "pay",
        "said" => "say",
        "sold" => "sell",
        "stood" => "stand",
        "oversaw" | "overseen" => "oversee",
        "undertook" => "undertake",
        "children" => "child",
        "men" => "man",
        "women" => "woman",
        "feet" => "foot",
        _ => return None,
    };
    Some(base)
}

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "an",
    "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "be", "became", "because", "become", "becomes", "becoming", "been",
    "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "doing",
    "done", "down", "due", "during", "each", "either", "else", "elsewhere", "enough", "even",
    "ever", "every", "everyone", "everything", "everywhere", "except", "few", "for", "former",
    "formerly", "from", "further", "had", "has", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hers", "herself", "him", "himself", "his", "how",
    "however", "i", "if", "in", "indeed", "into", "is", "it", "its", "itself", "just", "least",
    "less", "may", "me", "meanwhile", "might", "mine", "more", "moreover", "most", "mostly",
    "much", "must", "my", "myself", "neither", "never", "nevertheless", "next", "no", "nobody",
    "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on",
    "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours",
    "ourselves", "out", "over", "own", "per", "perhaps", "please", "quite", "rather", "re",
    "really", "same", "several", "she", "should", "since", "so", "some", "somehow", "someone",
    "something", "sometime", "sometimes", "somewhere", "still", "such", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "these", "they", "this", "those", "though", "through",
    "throughout", "thru", "thus", "to", "together", "too", "toward", "towards", "under",
    "unless", "until", "up", "upon", "us", "used", "using", "various", "very", "via", "was",
    "we", "well", "were", "what", "whatever", "when", "whence", "whenever", "where",
    "whereas", "whereby", "wherein", "whether", "which", "while", "who", "whoever", "whole",
    "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Vec<String> {
        RuleLemmatizer::new().lemmatize_and_filter(text).unwrap()
    }

    #[test]
    fn test_drops_stop_words_and_punctuation() {
        assert_eq!(run("I worked with the team, and it was great!"), vec!["work", "team", "great"]);
    }

    #[test]
    fn test_irregular_forms() {
        assert_eq!(run("Led, wrote, spoke"), vec!["lead", "write", "speak"]);
    }

    #[test]
    fn test_regular_suffixes() {
        for (word, expected) in [
            ("managed", "manage"),
            ("created", "create"),
            ("debugged", "debug"),
            ("installed", "install"),
            ("studies", "study"),
            ("teams", "team"),
            ("processes", "process"),
            ("matches", "match"),
            ("guided", "guide"),
            ("solving", "solve"),
            ("agreed", "agreed"),
            ("status", "status"),
            ("red", "red"),
        ] {
            assert_eq!(lemma(word), expected, "lemma of {word}");
        }
    }

    #[test]
    fn test_base_keywords_survive() {
        assert_eq!(
            run("Team member, group head, chief of staff, flexible and versatile"),
            vec!["team", "member", "group", "head", "chief", "staff", "flexible", "versatile"]
        );
    }

    #[test]
    fn test_non_ascii_words_pass_through() {
        assert_eq!(run("Zoë façade"), vec!["zoë", "façade"]);
    }

    #[test]
    fn test_unavailable_reports_none() {
        assert!(UnavailableLemmatizer.lemmatize_and_filter("anything").is_none());
        assert!(build_lemmatizer(LemmatizerKind::Disabled)
            .lemmatize_and_filter("team")
            .is_none());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Rule".parse::<LemmatizerKind>().unwrap(), LemmatizerKind::Rule);
        assert_eq!(" none ".parse::<LemmatizerKind>().unwrap(), LemmatizerKind::Disabled);
        assert!("stanza".parse::<LemmatizerKind>().is_err());
        assert_eq!(LemmatizerKind::Disabled.to_string(), "none");
    }
}
