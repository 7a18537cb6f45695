//! Ranking configuration and its loader.
//!
//! Uses Figment to merge built-in defaults + `promptdb.toml` +
//! `promptdb.<env>.toml` + `PROMPTDB_*` env vars, then validates the result.
//! Every weight and policy threshold the pipeline uses lives here.
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    pub intent: IntentConfig,
    pub retrieval: RetrievalConfig,
    pub scoring: ScoringConfig,
    pub curation: CurationPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentConfig {
    pub max_keywords: usize,
    pub confidence_floor: f32,
    pub confidence_ceiling: f32,
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self { max_keywords: 8, confidence_floor: 0.3, confidence_ceiling: 0.9 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Upper bound on candidates handed to the scorer.
    pub candidate_cap: usize,
    /// How many extracted keywords get their own text search.
    pub keyword_fanout: usize,
    /// Below this many unique candidates the recent listing is consulted.
    pub fallback_floor: usize,
    pub fallback_page_size: usize,
    pub subquery_timeout_ms: u64,
    pub public_only: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            candidate_cap: 50,
            keyword_fanout: 3,
            fallback_floor: 10,
            fallback_page_size: 20,
            subquery_timeout_ms: 3_000,
            public_only: true,
        }
    }
}

/// Composite relevance weights. Tunable, not domain truths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub exact_match: f32,
    pub keyword_distribution: f32,
    pub semantic_overlap: f32,
    pub intent_alignment: f32,
    pub quality: f32,
}

impl ScoreWeights {
    pub fn total(&self) -> f32 {
        self.exact_match + self.keyword_distribution + self.semantic_overlap + self.intent_alignment + self.quality
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            exact_match: 0.40,
            keyword_distribution: 0.25,
            semantic_overlap: 0.20,
            intent_alignment: 0.10,
            quality: 0.05,
        }
    }
}

/// Sub-score levels above which a match reason is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasonThresholds {
    pub exact: f32,
    pub partial: f32,
    pub keyword: f32,
    pub semantic: f32,
    pub intent: f32,
}

impl Default for ReasonThresholds {
    fn default() -> Self {
        Self { exact: 0.7, partial: 0.4, keyword: 0.6, semantic: 0.5, intent: 0.4 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    pub reasons: ReasonThresholds,
    /// Maximum characters of description carried into a result preview.
    pub preview_chars: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { weights: ScoreWeights::default(), reasons: ReasonThresholds::default(), preview_chars: 100 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurationPolicy {
    pub min_relevance: u8,
    pub relevance_band: u8,
    pub quality_band: u8,
    pub max_results_cap: usize,
}

impl Default for CurationPolicy {
    fn default() -> Self {
        Self { min_relevance: 30, relevance_band: 5, quality_band: 10, max_results_cap: 50 }
    }
}

impl RankingConfig {
    /// Load from files and environment, with `RUST_ENV` picking the overlay.
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default())).merge(Toml::file("promptdb.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("promptdb.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("promptdb.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("promptdb.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("PROMPTDB_").split("__"));
        Self::from_figment(&figment)
    }

    /// Extract and validate from an arbitrary provider stack.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let w = &self.scoring.weights;
        let parts = [w.exact_match, w.keyword_distribution, w.semantic_overlap, w.intent_alignment, w.quality];
        if parts.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(Error::InvalidConfig("score weights must be finite and non-negative".into()));
        }
        if (w.total() - 1.0).abs() > 1e-3 {
            return Err(Error::InvalidConfig(format!("score weights must sum to 1.0, got {:.4}", w.total())));
        }
        let i = &self.intent;
        if !(0.0..=1.0).contains(&i.confidence_floor) || !(0.0..=1.0).contains(&i.confidence_ceiling) {
            return Err(Error::InvalidConfig("confidence bounds must lie in [0, 1]".into()));
        }
        if i.confidence_floor > i.confidence_ceiling {
            return Err(Error::InvalidConfig(format!(
                "confidence floor {} exceeds ceiling {}",
                i.confidence_floor, i.confidence_ceiling
            )));
        }
        if i.max_keywords == 0 {
            return Err(Error::InvalidConfig("intent.max_keywords must be at least 1".into()));
        }
        let r = &self.retrieval;
        if r.candidate_cap == 0 {
            return Err(Error::InvalidConfig("retrieval.candidate_cap must be at least 1".into()));
        }
        if r.subquery_timeout_ms == 0 {
            return Err(Error::InvalidConfig("retrieval.subquery_timeout_ms must be positive".into()));
        }
        let c = &self.curation;
        if c.min_relevance > 100 {
            return Err(Error::InvalidConfig(format!("curation.min_relevance {} is above 100", c.min_relevance)));
        }
        if c.max_results_cap == 0 {
            return Err(Error::InvalidConfig("curation.max_results_cap must be at least 1".into()));
        }
        Ok(())
    }
}
