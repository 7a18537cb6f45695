//! Domain types shared by the analyzer, retriever, scorer and curator.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub type EntryId = String;
pub type Meta = HashMap<String, String>;

/// Who is asking. Passed through to the catalog untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerContext {
    pub user_id: Option<String>,
}

/// A ranking request as the caller supplied it.
///
/// `max_results` is signed so that misuse (a negative count) can be
/// detected and rejected instead of wrapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    pub max_results: i64,
    pub caller: Option<CallerContext>,
}

impl Query {
    pub fn new(text: impl Into<String>, max_results: i64) -> Self {
        Self { text: text.into(), max_results, caller: None }
    }

    pub fn with_caller(mut self, caller: CallerContext) -> Self {
        self.caller = Some(caller);
        self
    }
}

/// What the user wants to do with a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentCategory {
    Create,
    Analyze,
    Optimize,
    Translate,
    Explain,
    Plan,
    Other,
}

impl IntentCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Analyze => "analyze",
            Self::Optimize => "optimize",
            Self::Translate => "translate",
            Self::Explain => "explain",
            Self::Plan => "plan",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subject area of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Business,
    Technical,
    Creative,
    Academic,
    Communication,
    Legal,
    General,
}

impl Domain {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Technical => "technical",
            Self::Creative => "creative",
            Self::Academic => "academic",
            Self::Communication => "communication",
            Self::Legal => "legal",
            Self::General => "general",
        }
    }

    /// The catalog category a domain lists from, if there is one.
    /// `General` has no category of its own.
    pub fn catalog_category(self) -> Option<&'static str> {
        match self {
            Self::General => None,
            Self::Academic => Some("education"),
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    Casual,
    Friendly,
    Persuasive,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// Structured interpretation of a free-text query.
///
/// `confidence` is a heuristic in `[0, 1]`, not a calibrated probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub category: IntentCategory,
    pub domain: Domain,
    pub tone: Tone,
    pub urgency: Urgency,
    pub keywords: Vec<String>,
    pub confidence: f32,
}

/// A prompt record as owned by the external catalog.
///
/// Optional fields stay optional; use the `*_text` accessors to read them as
/// plain strings when scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub id: Option<EntryId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub quality_hints: Meta,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            description: None,
            category: None,
            tags: Vec::new(),
            is_public: true,
            quality_hints: Meta::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn category_text(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    /// Key used to collapse the same record surfaced by several sub-queries:
    /// the identifier, or the name when the catalog gave no identifier.
    pub fn dedup_key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }
}

/// Indicates which retrieval sub-query surfaced a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RetrievalSource {
    DirectText,
    Keyword(String),
    Category(String),
    Fallback,
}

/// A catalog entry collected during retrieval, not yet scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub entry: CatalogEntry,
    pub source: RetrievalSource,
}

/// The five sub-scores, each in `[0, 1]`, and their weighted composite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub exact_match: f32,
    pub keyword_distribution: f32,
    pub semantic_overlap: f32,
    pub intent_alignment: f32,
    pub quality: f32,
    pub composite: f32,
}

/// A candidate after scoring.
///
/// `relevance_score` and `quality_score` are always within `0..=100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub id: Option<EntryId>,
    pub name: String,
    pub description: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub source: RetrievalSource,
    pub relevance_score: u8,
    pub quality_score: u8,
    pub match_reasons: Vec<String>,
    pub preview: String,
    pub breakdown: ScoreBreakdown,
}

/// What happened during candidate retrieval.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalReport {
    pub calls_issued: usize,
    pub calls_failed: usize,
    pub fallback_used: bool,
    pub unique_before_cap: usize,
}

/// Everything `rank` hands back to its caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankResponse {
    pub results: Vec<ScoredResult>,
    pub intent: Intent,
    pub candidate_count: usize,
    pub elapsed_ms: u64,
    pub retrieval: RetrievalReport,
}
