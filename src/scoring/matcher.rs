use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;

use crate::error::RiskError;
use crate::models::enums::MatchMode;
use crate::models::Patient;

/// Case-insensitive keyword search over free-text list fields.
///
/// In `Substring` mode a keyword matches anywhere inside a value, so "mi"
/// also matches "family" or "vomiting". `WordBoundary` requires the keyword
/// to stand on its own between non-word characters.
///
/// Word-boundary patterns are compiled once, in [`compile`](Self::compile):
/// one alternation per keyword list, keyed by the list itself.
#[derive(Debug, Clone, Default)]
pub struct TextMatcher {
    mode: MatchMode,
    patterns: Arc<HashMap<Vec<String>, Regex>>,
}

impl TextMatcher {
    /// Build a matcher for `mode` over the named keyword lists it will be
    /// asked about. Substring mode compiles nothing.
    pub fn compile<'a, I>(mode: MatchMode, lists: I) -> Result<Self, RiskError>
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        let mut patterns: HashMap<Vec<String>, Regex> = HashMap::new();
        if mode == MatchMode::WordBoundary {
            for (name, keywords) in lists {
                if patterns.contains_key(keywords) {
                    continue;
                }
                let pattern = list_pattern(keywords)
                    .map_err(|e| RiskError::KeywordPattern(name.to_string(), e.to_string()))?;
                if let Some(re) = pattern {
                    patterns.insert(keywords.to_vec(), re);
                }
            }
            tracing::debug!(patterns = patterns.len(), "Compiled word-boundary keyword patterns");
        }
        Ok(Self {
            mode,
            patterns: Arc::new(patterns),
        })
    }

    /// True iff at least one keyword occurs in at least one value.
    pub fn has_any(&self, values: &[String], keywords: &[String]) -> bool {
        let lowered: Vec<String> = values.iter().map(|v| v.to_lowercase()).collect();
        self.has_any_lowered(&lowered, keywords)
    }

    /// Same as [`has_any`](Self::has_any) for values already lower-cased.
    fn has_any_lowered(&self, lowered: &[String], keywords: &[String]) -> bool {
        if lowered.is_empty() {
            return false;
        }
        match self.mode {
            MatchMode::Substring => substring_match(lowered, keywords),
            MatchMode::WordBoundary => match self.patterns.get(keywords) {
                Some(re) => lowered.iter().any(|v| re.is_match(v)),
                None => self.uncompiled_match(lowered, keywords),
            },
        }
    }

    /// A list that was not handed to [`compile`](Self::compile). Compiles it
    /// for this call only; if that fails the match widens to substring so a
    /// rule is never suppressed by a bad pattern.
    fn uncompiled_match(&self, lowered: &[String], keywords: &[String]) -> bool {
        match list_pattern(keywords) {
            Ok(Some(re)) => lowered.iter().any(|v| re.is_match(v)),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Keyword pattern failed to compile, using substring match");
                substring_match(lowered, keywords)
            }
        }
    }
}

fn substring_match(lowered: &[String], keywords: &[String]) -> bool {
    keywords
        .iter()
        .map(|kw| kw.to_lowercase())
        // An empty keyword would match every value.
        .filter(|kw| !kw.is_empty())
        .any(|kw| lowered.iter().any(|v| v.contains(&kw)))
}

/// `(?:^|\W)(?:k1|k2|..)(?:\W|$)` over the non-empty keywords, or `None`
/// when there are none.
fn list_pattern(keywords: &[String]) -> Result<Option<Regex>, regex::Error> {
    let alternatives: Vec<String> = keywords
        .iter()
        .map(|kw| kw.to_lowercase())
        .filter(|kw| !kw.is_empty())
        .map(|kw| regex::escape(&kw))
        .collect();
    if alternatives.is_empty() {
        return Ok(None);
    }
    Regex::new(&format!(r"(?:^|\W)(?:{})(?:\W|$)", alternatives.join("|"))).map(Some)
}

/// Substring search with the default matcher.
pub fn has_any(values: &[String], keywords: &[String]) -> bool {
    TextMatcher::default().has_any(values, keywords)
}

/// A patient's searchable text, lower-cased once per evaluation.
#[derive(Debug, Clone)]
pub struct ClinicalText {
    matcher: TextMatcher,
    history: Vec<String>,
    medications: Vec<String>,
    allergies: Vec<String>,
}

impl ClinicalText {
    pub fn new(patient: &Patient, matcher: TextMatcher) -> Self {
        let lower = |items: &[String]| -> Vec<String> {
            items.iter().map(|s| s.to_lowercase()).collect()
        };
        Self {
            matcher,
            history: lower(&patient.medical_history),
            medications: lower(&patient.medications),
            allergies: lower(&patient.allergies),
        }
    }

    pub fn history_has(&self, keywords: &[String]) -> bool {
        self.matcher.has_any_lowered(&self.history, keywords)
    }

    pub fn medication_has(&self, keywords: &[String]) -> bool {
        self.matcher.has_any_lowered(&self.medications, keywords)
    }

    pub fn allergy_has(&self, keywords: &[String]) -> bool {
        self.matcher.has_any_lowered(&self.allergies, keywords)
    }
}
