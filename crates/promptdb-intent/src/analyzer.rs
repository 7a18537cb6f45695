use std::collections::HashSet;

use promptdb_core::config::IntentConfig;
use promptdb_core::types::{Domain, Intent, IntentCategory, Tone, Urgency};

use crate::tables::{is_stop_word, KeywordTable, CATEGORY_TABLE, DOMAIN_TABLE, TONE_TABLE, URGENCY_TABLE};

/// Lowercase and drop every character that is neither alphanumeric nor
/// whitespace.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Normalized whitespace-separated tokens, in order, duplicates kept.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text).split_whitespace().map(str::to_string).collect()
}

/// Pre-tokenized text that keyword tables are matched against.
///
/// A single-word keyword hits when some token starts with it ("email"
/// matches "emails"); a multi-word keyword hits when it occurs as a phrase.
#[derive(Debug, Clone)]
pub struct TextProfile {
    tokens: Vec<String>,
    /// Tokens joined by single spaces, padded with one space on each side.
    joined: String,
}

impl TextProfile {
    pub fn new(text: &str) -> Self {
        let tokens = tokenize(text);
        let joined = format!(" {} ", tokens.join(" "));
        Self { tokens, joined }
    }

    pub fn tokens(&self) -> &[String] { &self.tokens }

    pub fn is_empty(&self) -> bool { self.tokens.is_empty() }

    pub fn contains_keyword(&self, keyword: &str) -> bool {
        if keyword.contains(' ') {
            self.joined.contains(&format!(" {keyword} "))
        } else {
            self.tokens.iter().any(|t| t.starts_with(keyword))
        }
    }

    /// Number of distinct keywords from `keywords` present in the text.
    pub fn hits(&self, keywords: &[&str]) -> usize {
        keywords.iter().filter(|k| self.contains_keyword(k)).count()
    }
}

/// Row with the strictly highest non-zero hit count; earlier rows win ties.
pub fn best_match<K: Copy>(table: &KeywordTable<K>, profile: &TextProfile) -> Option<(K, usize)> {
    let mut best: Option<(K, usize)> = None;
    for &(key, words) in table {
        let hits = profile.hits(words);
        if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
            best = Some((key, hits));
        }
    }
    best
}

/// First row with any hit.
fn first_match<K: Copy>(table: &KeywordTable<K>, profile: &TextProfile) -> Option<K> {
    table.iter().find(|(_, words)| profile.hits(words) > 0).map(|&(key, _)| key)
}

/// Heuristic query interpretation. Pure and deterministic.
#[derive(Debug, Clone)]
pub struct IntentAnalyzer {
    config: IntentConfig,
}

impl IntentAnalyzer {
    pub fn new(config: &IntentConfig) -> Self { Self { config: config.clone() } }

    pub fn analyze(&self, text: &str) -> Intent {
        let profile = TextProfile::new(text);
        let (category, category_hits) = best_match(CATEGORY_TABLE, &profile).unwrap_or((IntentCategory::Other, 0));
        let (domain, domain_hits) = best_match(DOMAIN_TABLE, &profile).unwrap_or((Domain::General, 0));
        let tone = first_match(TONE_TABLE, &profile).unwrap_or(Tone::Neutral);
        let urgency = first_match(URGENCY_TABLE, &profile).unwrap_or(Urgency::Medium);
        let keywords = self.extract_keywords(&profile);
        let confidence = self.confidence(category_hits, domain_hits, keywords.len());
        tracing::debug!(%category, %domain, keywords = keywords.len(), confidence, "intent analyzed");
        Intent { category, domain, tone, urgency, keywords, confidence }
    }

    /// Unique non-stop-word tokens longer than one character, first
    /// occurrence order, capped at `max_keywords`.
    pub fn extract_keywords(&self, profile: &TextProfile) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut keywords = Vec::new();
        for token in profile.tokens() {
            if keywords.len() >= self.config.max_keywords {
                break;
            }
            if token.chars().count() <= 1 || is_stop_word(token) || !seen.insert(token.as_str()) {
                continue;
            }
            keywords.push(token.clone());
        }
        keywords
    }

    /// `(categoryHits + domainHits + keywordCount) / 10`, clamped to the
    /// configured floor and ceiling.
    pub fn confidence(&self, category_hits: usize, domain_hits: usize, keyword_count: usize) -> f32 {
        let raw = (category_hits + domain_hits + keyword_count) as f32 / 10.0;
        raw.clamp(self.config.confidence_floor, self.config.confidence_ceiling)
    }
}

impl Default for IntentAnalyzer {
    fn default() -> Self { Self::new(&IntentConfig::default()) }
}
