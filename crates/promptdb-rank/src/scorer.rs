//! Multi-factor relevance scorer (5 factors).
//!
//! Factors: exact match, keyword distribution, lexical overlap with the query,
//! intent alignment, and a metadata-completeness quality score. Each factor is
//! in `[0, 1]`; the composite is their weighted sum.

use std::collections::HashSet;

use promptdb_core::config::{ReasonThresholds, ScoreWeights, ScoringConfig};
use promptdb_core::types::{Candidate, CatalogEntry, Intent, ScoreBreakdown, ScoredResult};
use promptdb_intent::{category_keywords, domain_keywords, tokenize, TextProfile};

/// Query-side inputs shared by every candidate.
#[derive(Debug, Clone)]
pub struct QueryTerms {
    /// Trimmed, lowercased query text.
    pub literal: String,
    /// Unique query tokens longer than two characters.
    pub tokens: Vec<String>,
}

impl QueryTerms {
    pub fn new(query_text: &str) -> Self {
        let literal = query_text.trim().to_lowercase();
        let mut seen = HashSet::new();
        let tokens = tokenize(query_text)
            .into_iter()
            .filter(|t| t.chars().count() > 2)
            .filter(|t| seen.insert(t.clone()))
            .collect();
        Self { literal, tokens }
    }
}

/// Weighted presence of the literal query in name (0.4), description (0.3),
/// category (0.2) and joined tags (0.1). Zero for a blank query.
pub fn exact_match(entry: &CatalogEntry, literal: &str) -> f32 {
    if literal.is_empty() {
        return 0.0;
    }
    let fields: [(String, f32); 4] = [
        (entry.name.to_lowercase(), 0.4),
        (entry.description_text().to_lowercase(), 0.3),
        (entry.category_text().to_lowercase(), 0.2),
        (entry.tags.join(" ").to_lowercase(), 0.1),
    ];
    let score: f32 = fields.iter().filter(|(text, _)| text.contains(literal)).map(|(_, w)| w).sum();
    score.min(1.0)
}

/// Fraction of intent keywords found anywhere in the entry's text.
pub fn keyword_distribution(entry_text: &str, keywords: &[String]) -> f32 {
    if keywords.is_empty() {
        return 0.0;
    }
    let found = keywords.iter().filter(|k| entry_text.contains(k.as_str())).count();
    found as f32 / keywords.len() as f32
}

/// Fraction of query tokens present in name + description. Lexical overlap,
/// not embedding similarity.
pub fn semantic_overlap(name_and_description: &str, query_tokens: &[String]) -> f32 {
    if query_tokens.is_empty() {
        return 0.0;
    }
    let found = query_tokens.iter().filter(|t| name_and_description.contains(t.as_str())).count();
    found as f32 / query_tokens.len() as f32
}

/// +0.5 per hit from the intent's category table (capped at 1.0) plus +0.3
/// per hit from its domain table (capped at 1.0), overall capped at 1.0.
pub fn intent_alignment(entry_profile: &TextProfile, intent: &Intent) -> f32 {
    let category_hits = entry_profile.hits(category_keywords(intent.category)) as f32;
    let domain_hits = entry_profile.hits(domain_keywords(intent.domain)) as f32;
    ((category_hits * 0.5).min(1.0) + (domain_hits * 0.3).min(1.0)).min(1.0)
}

/// Metadata completeness: 0.5 base, longer descriptions and more tags add up
/// to 0.5 more.
pub fn quality(entry: &CatalogEntry) -> f32 {
    let mut score = 0.5;
    let description_len = entry.description_text().chars().count();
    if description_len > 20 {
        score += 0.2;
        if description_len > 50 {
            score += 0.1;
        }
    }
    if !entry.tags.is_empty() {
        score += 0.1;
        if entry.tags.len() > 2 {
            score += 0.1;
        }
    }
    f32::min(score, 1.0)
}

/// Map a `[0, 1]` value onto `0..=100`, clamping anything out of range.
pub fn to_percent(value: f32) -> u8 {
    let scaled = (value * 100.0).round();
    if scaled.is_nan() {
        0
    } else {
        scaled.clamp(0.0, 100.0) as u8
    }
}

pub fn composite(weights: &ScoreWeights, b: &ScoreBreakdown) -> f32 {
    weights.exact_match * b.exact_match
        + weights.keyword_distribution * b.keyword_distribution
        + weights.semantic_overlap * b.semantic_overlap
        + weights.intent_alignment * b.intent_alignment
        + weights.quality * b.quality
}

/// Short labels explaining why a result matched, strongest first.
pub fn match_reasons(b: &ScoreBreakdown, intent: &Intent, thresholds: &ReasonThresholds) -> Vec<String> {
    let mut reasons = Vec::new();
    if b.exact_match > thresholds.exact {
        reasons.push("exact match".to_string());
    } else if b.exact_match > thresholds.partial {
        reasons.push("partial match".to_string());
    }
    if b.keyword_distribution > thresholds.keyword {
        reasons.push("keyword match".to_string());
    }
    if b.semantic_overlap > thresholds.semantic {
        reasons.push("semantically related".to_string());
    }
    if b.intent_alignment > thresholds.intent {
        reasons.push(format!("{} intent match", intent.category));
    }
    if reasons.is_empty() {
        reasons.push("basic match".to_string());
    }
    reasons
}

/// First `max_chars` characters of the description, with `...` when cut.
pub fn preview(description: &str, max_chars: usize) -> String {
    let trimmed = description.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", trimmed[..cut].trim_end()),
        None => trimmed.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    config: ScoringConfig,
}

impl RelevanceScorer {
    pub fn new(config: &ScoringConfig) -> Self { Self { config: config.clone() } }

    /// Score every candidate. Never fails and never drops an input.
    pub fn score(&self, candidates: &[Candidate], query_text: &str, intent: &Intent) -> Vec<ScoredResult> {
        let terms = QueryTerms::new(query_text);
        candidates.iter().map(|c| self.score_one(c, &terms, intent)).collect()
    }

    pub fn score_one(&self, candidate: &Candidate, terms: &QueryTerms, intent: &Intent) -> ScoredResult {
        let entry = &candidate.entry;
        let name_and_description = format!("{} {}", entry.name, entry.description_text()).to_lowercase();
        let full_text = format!("{} {} {}", name_and_description, entry.category_text(), entry.tags.join(" ")).to_lowercase();

        let mut breakdown = ScoreBreakdown {
            exact_match: exact_match(entry, &terms.literal),
            keyword_distribution: keyword_distribution(&full_text, &intent.keywords),
            semantic_overlap: semantic_overlap(&name_and_description, &terms.tokens),
            intent_alignment: intent_alignment(&TextProfile::new(&full_text), intent),
            quality: quality(entry),
            composite: 0.0,
        };
        breakdown.composite = composite(&self.config.weights, &breakdown);

        ScoredResult {
            id: entry.id.clone(),
            name: entry.name.clone(),
            description: entry.description_text().to_string(),
            category: entry.category.clone(),
            tags: entry.tags.clone(),
            source: candidate.source.clone(),
            relevance_score: to_percent(breakdown.composite),
            quality_score: to_percent(breakdown.quality),
            match_reasons: match_reasons(&breakdown, intent, &self.config.reasons),
            preview: preview(entry.description_text(), self.config.preview_chars),
            breakdown,
        }
    }
}
