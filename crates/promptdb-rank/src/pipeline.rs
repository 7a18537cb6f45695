use std::time::Instant;

use promptdb_core::config::RankingConfig;
use promptdb_core::error::{Error, Result};
use promptdb_core::traits::Catalog;
use promptdb_core::types::{CallerContext, Query, RankResponse, RetrievalReport};
use promptdb_intent::IntentAnalyzer;
use promptdb_retrieve::CandidateRetriever;

use crate::curator::ResultCurator;
use crate::scorer::RelevanceScorer;

/// Full ranking pipeline: intent analysis → retrieval → scoring → curation.
///
/// Holds no per-request state; concurrent `rank` calls are independent.
pub struct PromptRanker<C> where C: Catalog {
    catalog: C,
    config: RankingConfig,
    analyzer: IntentAnalyzer,
    scorer: RelevanceScorer,
    curator: ResultCurator,
}

impl<C> PromptRanker<C> where C: Catalog {
    /// Build a ranker after validating `config`.
    pub fn new(catalog: C, config: RankingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            analyzer: IntentAnalyzer::new(&config.intent),
            scorer: RelevanceScorer::new(&config.scoring),
            curator: ResultCurator::new(&config.curation),
            catalog,
            config,
        })
    }

    pub fn with_defaults(catalog: C) -> Self {
        let config = RankingConfig::default();
        Self {
            analyzer: IntentAnalyzer::new(&config.intent),
            scorer: RelevanceScorer::new(&config.scoring),
            curator: ResultCurator::new(&config.curation),
            catalog,
            config,
        }
    }

    pub fn config(&self) -> &RankingConfig { &self.config }

    pub fn catalog(&self) -> &C { &self.catalog }

    /// Rank catalog entries for `query`.
    ///
    /// Only a negative `max_results` is an error, and it is reported before
    /// the catalog is touched. Catalog failures degrade the result instead of
    /// failing it.
    pub async fn rank(&self, query: &str, max_results: i64, caller: Option<&CallerContext>) -> Result<RankResponse> {
        let started = Instant::now();
        if max_results < 0 {
            return Err(Error::InvalidInput(format!("max_results must be non-negative, got {max_results}")));
        }
        let limit = usize::try_from(max_results).unwrap_or(usize::MAX).min(self.config.curation.max_results_cap);
        let intent = self.analyzer.analyze(query);

        if limit == 0 {
            return Ok(RankResponse {
                results: Vec::new(),
                intent,
                candidate_count: 0,
                elapsed_ms: elapsed_ms(started),
                retrieval: RetrievalReport::default(),
            });
        }

        let request = Query { text: query.to_string(), max_results, caller: caller.cloned() };
        let retrieval = CandidateRetriever::new(&self.catalog, &self.config.retrieval).retrieve(&request, &intent).await;
        let candidate_count = retrieval.candidates.len();
        let scored = self.scorer.score(&retrieval.candidates, query, &intent);
        let results = self.curator.curate(scored, limit);
        let elapsed_ms = elapsed_ms(started);

        tracing::info!(
            category = %intent.category,
            domain = %intent.domain,
            candidates = candidate_count,
            results = results.len(),
            failed_calls = retrieval.report.calls_failed,
            elapsed_ms,
            "ranked query"
        );
        Ok(RankResponse { results, intent, candidate_count, elapsed_ms, retrieval: retrieval.report })
    }

    pub async fn rank_query(&self, query: &Query) -> Result<RankResponse> {
        self.rank(&query.text, query.max_results, query.caller.as_ref()).await
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
