use futures::future::join_all;
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use promptdb_core::config::RetrievalConfig;
use promptdb_core::error::{Error, Result};
use promptdb_core::traits::{Catalog, ListOptions};
use promptdb_core::types::{CallerContext, Candidate, CatalogEntry, Intent, Query, RetrievalReport, RetrievalSource};

/// One call against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubQuery {
    Direct(String),
    Keyword(String),
    Category(String),
    Fallback,
}

impl SubQuery {
    pub fn source(&self) -> RetrievalSource {
        match self {
            Self::Direct(_) => RetrievalSource::DirectText,
            Self::Keyword(k) => RetrievalSource::Keyword(k.clone()),
            Self::Category(c) => RetrievalSource::Category(c.clone()),
            Self::Fallback => RetrievalSource::Fallback,
        }
    }
}

impl fmt::Display for SubQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(t) => write!(f, "search_by_text({t:?})"),
            Self::Keyword(k) => write!(f, "search_by_text(keyword {k:?})"),
            Self::Category(c) => write!(f, "list_by_category({c:?})"),
            Self::Fallback => f.write_str("list_recent"),
        }
    }
}

/// Candidates in first-seen order plus what it took to get them.
#[derive(Debug, Clone, Default)]
pub struct Retrieval {
    pub candidates: Vec<Candidate>,
    pub report: RetrievalReport,
}

/// First-seen-wins set keyed by entry id, or name when the id is missing.
#[derive(Debug, Default)]
struct CandidateSet {
    seen: HashSet<String>,
    items: Vec<Candidate>,
}

impl CandidateSet {
    fn extend(&mut self, entries: Vec<CatalogEntry>, source: &RetrievalSource) {
        for entry in entries {
            if self.seen.insert(entry.dedup_key().to_string()) {
                self.items.push(Candidate { entry, source: source.clone() });
            }
        }
    }

    fn len(&self) -> usize { self.items.len() }
}

/// Fans sub-queries out to a catalog and merges what comes back.
///
/// Each sub-query is bounded by `subquery_timeout_ms`. A failed or timed-out
/// sub-query is logged and contributes nothing; retrieval itself never fails.
pub struct CandidateRetriever<'a> {
    catalog: &'a dyn Catalog,
    config: &'a RetrievalConfig,
}

impl<'a> CandidateRetriever<'a> {
    pub fn new(catalog: &'a dyn Catalog, config: &'a RetrievalConfig) -> Self { Self { catalog, config } }

    /// The targeted sub-queries for a request, in merge order: direct text,
    /// then top keywords, then the domain's category listing.
    pub fn plan(&self, query: &Query, intent: &Intent) -> Vec<SubQuery> {
        let mut plan = Vec::new();
        let raw = query.text.trim();
        if !raw.is_empty() {
            plan.push(SubQuery::Direct(raw.to_string()));
        }
        let lowered = raw.to_lowercase();
        for keyword in intent.keywords.iter().filter(|k| **k != lowered).take(self.config.keyword_fanout) {
            plan.push(SubQuery::Keyword(keyword.clone()));
        }
        if let Some(category) = intent.domain.catalog_category() {
            plan.push(SubQuery::Category(category.to_string()));
        }
        plan
    }

    pub async fn retrieve(&self, query: &Query, intent: &Intent) -> Retrieval {
        let targeted = self.plan(query, intent);
        let caller = query.caller.as_ref();
        let mut report = RetrievalReport { calls_issued: targeted.len(), ..RetrievalReport::default() };
        let mut set = CandidateSet::default();

        // join_all keeps issue order, so merge order matches plan order
        let outcomes = join_all(targeted.iter().map(|sq| self.run(sq, caller))).await;
        for (sq, outcome) in targeted.iter().zip(outcomes) {
            self.absorb(sq, outcome, &mut set, &mut report);
        }

        if set.len() < self.config.fallback_floor {
            tracing::debug!(unique = set.len(), floor = self.config.fallback_floor, "below floor, listing recent");
            report.fallback_used = true;
            report.calls_issued += 1;
            let outcome = self.run(&SubQuery::Fallback, caller).await;
            self.absorb(&SubQuery::Fallback, outcome, &mut set, &mut report);
        }

        report.unique_before_cap = set.len();
        let mut candidates = set.items;
        candidates.truncate(self.config.candidate_cap);
        tracing::debug!(
            candidates = candidates.len(),
            issued = report.calls_issued,
            failed = report.calls_failed,
            fallback = report.fallback_used,
            "retrieval finished"
        );
        Retrieval { candidates, report }
    }

    fn absorb(
        &self,
        sq: &SubQuery,
        outcome: Result<Vec<CatalogEntry>>,
        set: &mut CandidateSet,
        report: &mut RetrievalReport,
    ) {
        match outcome {
            Ok(entries) => {
                tracing::debug!(subquery = %sq, hits = entries.len(), "sub-query returned");
                set.extend(entries, &sq.source());
            }
            Err(err) => {
                report.calls_failed += 1;
                tracing::warn!(subquery = %sq, error = %err, "sub-query failed, skipping");
            }
        }
    }

    async fn run(&self, sq: &SubQuery, caller: Option<&CallerContext>) -> Result<Vec<CatalogEntry>> {
        let after_ms = self.config.subquery_timeout_ms;
        let call = async {
            match sq {
                SubQuery::Direct(text) | SubQuery::Keyword(text) => self.catalog.search_by_text(text, caller).await,
                SubQuery::Category(category) => {
                    let options = ListOptions { public_only: self.config.public_only, page_size: self.config.candidate_cap };
                    self.catalog.list_by_category(category, options).await
                }
                SubQuery::Fallback => {
                    let options =
                        ListOptions { public_only: self.config.public_only, page_size: self.config.fallback_page_size };
                    self.catalog.list_recent(options).await
                }
            }
        };
        match tokio::time::timeout(Duration::from_millis(after_ms), call).await {
            Ok(Ok(entries)) => Ok(entries),
            Ok(Err(err)) => Err(Error::Catalog { op: sq.to_string(), message: format!("{err:#}") }),
            Err(_) => Err(Error::Timeout { op: sq.to_string(), after_ms }),
        }
    }
}
