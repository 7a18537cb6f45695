use std::sync::Arc;

use promptdb_core::config::RankingConfig;
use promptdb_core::types::{CallerContext, CatalogEntry, IntentCategory, Query, RetrievalSource};
use promptdb_core::Error;
use promptdb_fixtures::{filler_entries, sample_entries, CatalogOp, FlakyCatalog};
use promptdb_rank::PromptRanker;

fn ranker(catalog: &Arc<FlakyCatalog>) -> PromptRanker<Arc<FlakyCatalog>> {
    PromptRanker::with_defaults(Arc::clone(catalog))
}

#[tokio::test]
async fn apology_email_ranks_first() -> anyhow::Result<()> {
    promptdb_core::logging::init();
    let catalog = Arc::new(FlakyCatalog::new(sample_entries()));

    let response = ranker(&catalog).rank("write a formal apology email", 5, None).await?;

    let top = response.results.first().expect("at least one result");
    assert_eq!(top.name, "Apology Email Template");
    assert!(
        top.match_reasons.iter().any(|r| r == "exact match" || r == "keyword match"),
        "reasons were {:?}",
        top.match_reasons
    );
    assert_eq!(response.intent.category, IntentCategory::Create);
    assert!(response.candidate_count >= response.results.len());
    Ok(())
}

#[tokio::test]
async fn empty_query_degrades_gracefully() -> anyhow::Result<()> {
    let catalog = Arc::new(FlakyCatalog::new(sample_entries()));

    let response = ranker(&catalog).rank("", 10, None).await?;

    assert_eq!(response.intent.category, IntentCategory::Other);
    assert!((response.intent.confidence - 0.3).abs() < f32::EPSILON);
    assert!(response.results.iter().all(|r| r.source == RetrievalSource::Fallback));
    assert!(response.retrieval.fallback_used);
    Ok(())
}

#[tokio::test]
async fn case_variant_names_collapse_to_one_result() -> anyhow::Result<()> {
    let catalog = Arc::new(FlakyCatalog::new(vec![
        CatalogEntry::new("e1", "Email Writer")
            .with_description("Drafts a clear email writer prompt for outreach")
            .with_category("communication"),
        CatalogEntry::new("e2", "email writer").with_description("email writer template with subject line ideas"),
    ]));

    let response = ranker(&catalog).rank("email writer", 10, None).await?;

    let matching: Vec<_> = response.results.iter().filter(|r| r.name.to_lowercase() == "email writer").collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(response.candidate_count, 2, "both survive retrieval, curation collapses them");
    Ok(())
}

#[tokio::test]
async fn negative_max_results_is_rejected_before_any_catalog_call() {
    let catalog = Arc::new(FlakyCatalog::new(sample_entries()));

    let err = ranker(&catalog).rank("write a formal apology email", -1, None).await.unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert_eq!(catalog.total_calls(), 0);
}

#[tokio::test]
async fn zero_max_results_returns_intent_without_calls() -> anyhow::Result<()> {
    let catalog = Arc::new(FlakyCatalog::new(sample_entries()));

    let response = ranker(&catalog).rank("plan a product roadmap", 0, None).await?;

    assert!(response.results.is_empty());
    assert_eq!(response.intent.category, IntentCategory::Plan);
    assert_eq!(catalog.total_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn targeted_failures_fall_back_to_recent_listing() -> anyhow::Result<()> {
    let catalog = Arc::new(
        FlakyCatalog::new(sample_entries()).failing(CatalogOp::SearchByText).failing(CatalogOp::ListByCategory),
    );

    let response = ranker(&catalog).rank("write a formal apology email", 5, None).await?;

    assert!(!response.results.is_empty());
    assert!(response.results.iter().all(|r| r.source == RetrievalSource::Fallback));
    assert_eq!(response.results[0].name, "Apology Email Template");
    // direct + 3 keywords + category listing
    assert_eq!(response.retrieval.calls_failed, 5);
    assert_eq!(catalog.call_count(CatalogOp::ListRecent), 1);
    Ok(())
}

#[tokio::test]
async fn single_failed_call_still_ranks() -> anyhow::Result<()> {
    let catalog = Arc::new(FlakyCatalog::new(sample_entries()).failing(CatalogOp::ListByCategory));

    let response = ranker(&catalog).rank("write a formal apology email", 5, None).await?;

    assert_eq!(response.retrieval.calls_failed, 1);
    assert_eq!(response.results[0].name, "Apology Email Template");
    Ok(())
}

#[tokio::test]
async fn total_catalog_outage_is_an_empty_success() -> anyhow::Result<()> {
    let catalog = Arc::new(
        FlakyCatalog::new(sample_entries())
            .failing(CatalogOp::SearchByText)
            .failing(CatalogOp::ListByCategory)
            .failing(CatalogOp::ListRecent),
    );

    let response = ranker(&catalog).rank("write a formal apology email", 5, None).await?;

    assert!(response.results.is_empty());
    assert_eq!(response.candidate_count, 0);
    Ok(())
}

#[tokio::test]
async fn ranking_is_idempotent() -> anyhow::Result<()> {
    let mut entries = sample_entries();
    entries.extend(filler_entries("email", "communication", 20));
    let catalog = Arc::new(FlakyCatalog::new(entries));
    let ranker = ranker(&catalog);

    let first = ranker.rank("email filler prompt", 10, None).await?;
    let second = ranker.rank("email filler prompt", 10, None).await?;

    assert_eq!(first.results.len(), 10);
    // every filler scores the same, so the name decides
    let names: Vec<_> = first.results.iter().take(3).map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["email 0", "email 1", "email 10"]);
    assert_eq!(first.results, second.results);
    assert_eq!(first.intent, second.intent);
    assert_eq!(first.candidate_count, second.candidate_count);
    Ok(())
}

#[tokio::test]
async fn results_respect_limit_and_score_bounds() -> anyhow::Result<()> {
    let catalog = Arc::new(FlakyCatalog::new(filler_entries("email", "communication", 60)));
    let ranker = ranker(&catalog);

    let response = ranker.rank("email filler prompt", 7, None).await?;
    assert_eq!(response.results.len(), 7);
    assert_eq!(response.candidate_count, 50, "candidate set is capped before scoring");

    let response = ranker.rank("email filler prompt", 1_000, None).await?;
    assert!(response.results.len() <= 50);
    for r in &response.results {
        assert!(r.relevance_score <= 100 && r.quality_score <= 100);
        assert!(r.relevance_score >= 30);
    }
    Ok(())
}

#[tokio::test]
async fn rank_query_passes_the_caller_through() -> anyhow::Result<()> {
    let catalog = Arc::new(FlakyCatalog::new(sample_entries()));
    let ranker = ranker(&catalog);
    let query = Query::new("haiku poem", 3).with_caller(CallerContext { user_id: Some("u-1".into()) });

    let response = ranker.rank_query(&query).await?;

    assert_eq!(response.results[0].name, "Haiku Generator");
    let searches: Vec<_> = ranker.catalog().calls().into_iter().filter(|c| c.op == CatalogOp::SearchByText).collect();
    assert!(!searches.is_empty());
    for call in &searches {
        let user = call.caller.as_ref().and_then(|c| c.user_id.as_deref());
        assert_eq!(user, Some("u-1"), "search for {:?} lost the caller", call.arg);
    }
    Ok(())
}

fn with_private_apology() -> Vec<CatalogEntry> {
    let mut entries = sample_entries();
    entries.push(
        CatalogEntry::new("secret", "Internal Apology Email")
            .with_description("private apology email for executive escalations")
            .with_category("communication")
            .private(),
    );
    entries
}

#[tokio::test]
async fn anonymous_queries_never_see_private_entries() -> anyhow::Result<()> {
    let catalog = Arc::new(FlakyCatalog::new(with_private_apology()));
    let ranker = ranker(&catalog);
    assert!(ranker.config().retrieval.public_only);

    let response = ranker.rank("apology email", 5, None).await?;

    assert!(!response.results.is_empty());
    assert!(response.results.iter().all(|r| r.id.as_deref() != Some("secret")));
    Ok(())
}

#[tokio::test]
async fn known_caller_can_find_private_entries_by_text() -> anyhow::Result<()> {
    let catalog = Arc::new(FlakyCatalog::new(with_private_apology()));
    let caller = CallerContext { user_id: Some("u-1".into()) };

    let response = ranker(&catalog).rank("apology email", 5, Some(&caller)).await?;

    assert!(response.results.iter().any(|r| r.id.as_deref() == Some("secret")));
    Ok(())
}

#[test]
fn invalid_configuration_is_refused() {
    let mut config = RankingConfig::default();
    config.scoring.weights.quality = 0.5;
    let result = PromptRanker::new(FlakyCatalog::default(), config);
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}

#[tokio::test]
async fn response_serializes_to_json() -> anyhow::Result<()> {
    let catalog = Arc::new(FlakyCatalog::new(sample_entries()));
    let response = ranker(&catalog).rank("write a formal apology email", 5, None).await?;

    let json = serde_json::to_value(&response)?;

    assert_eq!(json["intent"]["category"], "create");
    assert_eq!(json["results"][0]["name"], "Apology Email Template");
    Ok(())
}
