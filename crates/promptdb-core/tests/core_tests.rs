use std::fs;
use tempfile::TempDir;

use promptdb_core::catalog::InMemoryCatalog;
use promptdb_core::traits::{Catalog, ListOptions};
use promptdb_core::types::{CallerContext, CatalogEntry, Domain, RetrievalSource};

fn entry(id: &str, name: &str, category: &str) -> CatalogEntry {
    CatalogEntry::new(id, name)
        .with_description(format!("{name} prompt for everyday work"))
        .with_category(category)
}

#[test]
fn load_dir_reads_nested_json_files_in_path_order() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::create_dir_all(dir.join("business")).unwrap();
    fs::write(
        dir.join("a.json"),
        r#"[{"id": "1", "name": "Blog Outline", "category": "creative", "tags": ["blog"], "is_public": true}]"#,
    )
    .unwrap();
    fs::write(
        dir.join("business/b.json"),
        r#"[{"name": "Sales Pitch", "description": "pitch a product", "is_public": false}]"#,
    )
    .unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let catalog = InMemoryCatalog::load_dir(dir).expect("load");

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.entries()[0].name, "Blog Outline");
    let pitch = &catalog.entries()[1];
    assert_eq!(pitch.id, None, "missing id stays missing");
    assert_eq!(pitch.dedup_key(), "Sales Pitch", "dedup falls back to name");
    assert!(!pitch.is_public);
    assert!(pitch.tags.is_empty());
}

#[test]
fn load_dir_rejects_malformed_json() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("bad.json"), "{not json").unwrap();
    assert!(InMemoryCatalog::load_dir(tmp.path()).is_err());
}

#[test]
fn load_dir_on_empty_directory_is_empty_catalog() {
    let tmp = TempDir::new().unwrap();
    let catalog = InMemoryCatalog::load_dir(tmp.path()).expect("load");
    assert!(catalog.is_empty());
}

#[tokio::test]
async fn in_memory_catalog_honours_listing_options() {
    let catalog = InMemoryCatalog::new(vec![
        entry("1", "Contract Review", "legal"),
        entry("2", "NDA Drafter", "Legal").private(),
        entry("3", "Email Polisher", "communication"),
        entry("4", "Clause Explainer", "legal"),
    ]);

    let public = catalog
        .list_by_category("legal", ListOptions { public_only: true, page_size: 10 })
        .await
        .unwrap();
    let names: Vec<_> = public.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Contract Review", "Clause Explainer"]);

    let all = catalog
        .list_by_category("LEGAL", ListOptions { public_only: false, page_size: 2 })
        .await
        .unwrap();
    assert_eq!(all.len(), 2, "page size limits the listing");

    let recent = catalog.list_recent(ListOptions { public_only: true, page_size: 2 }).await.unwrap();
    let names: Vec<_> = recent.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Clause Explainer", "Email Polisher"], "newest first");
}

#[tokio::test]
async fn text_search_is_case_insensitive_and_blank_matches_nothing() {
    let catalog = InMemoryCatalog::new(vec![
        entry("1", "Email Writer", "communication").with_tags(["outreach"]),
        entry("2", "Poem Generator", "creative"),
    ]);

    let hits = catalog.search_by_text("EMAIL", None).await.unwrap();
    assert_eq!(hits.len(), 1);
    let by_tag = catalog.search_by_text("outreach", None).await.unwrap();
    assert_eq!(by_tag[0].name, "Email Writer");
    assert!(catalog.search_by_text("   ", None).await.unwrap().is_empty());
}

#[tokio::test]
async fn json_catalog_fills_defaults_and_accepts_pushes() {
    let mut catalog = InMemoryCatalog::from_json_str(
        r#"[
            {"id": "a1", "name": "Cover Letter", "description": "tailored cover letter", "category": "career",
             "tags": ["jobs"], "is_public": true, "quality_hints": {"reviews": "12"}},
            {"name": "Bare Prompt"}
        ]"#,
    )
    .expect("parse");

    assert_eq!(catalog.len(), 2);
    let bare = &catalog.entries()[1];
    assert_eq!(bare.id, None);
    assert_eq!(bare.description, None);
    assert_eq!(bare.category_text(), "");
    assert!(bare.tags.is_empty() && bare.quality_hints.is_empty());
    assert_eq!(catalog.entries()[0].quality_hints.get("reviews").map(String::as_str), Some("12"));

    catalog.push(entry("a2", "Interview Prep", "career"));
    let career = catalog
        .list_by_category("career", ListOptions { public_only: false, page_size: 10 })
        .await
        .unwrap();
    let names: Vec<_> = career.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Cover Letter", "Interview Prep"]);

    assert!(InMemoryCatalog::from_json_str(r#"[{"id": "x"}]"#).is_err(), "name is required");
}

#[tokio::test]
async fn anonymous_text_search_skips_private_entries() {
    let catalog = InMemoryCatalog::new(vec![
        entry("1", "Email Writer", "communication"),
        entry("2", "Email Escalation", "communication").private(),
    ]);
    let caller = CallerContext { user_id: Some("u-7".into()) };

    let anonymous = catalog.search_by_text("email", None).await.unwrap();
    let known = catalog.search_by_text("email", Some(&caller)).await.unwrap();

    assert_eq!(anonymous.len(), 1);
    assert_eq!(anonymous[0].name, "Email Writer");
    assert_eq!(known.len(), 2);
}

#[test]
fn domains_map_to_catalog_categories() {
    assert_eq!(Domain::General.catalog_category(), None);
    assert_eq!(Domain::Communication.catalog_category(), Some("communication"));
    assert_eq!(Domain::Academic.catalog_category(), Some("education"));
}

#[test]
fn retrieval_source_serializes_with_tag() {
    let json = serde_json::to_string(&RetrievalSource::Keyword("email".into())).unwrap();
    assert_eq!(json, r#"{"kind":"keyword","value":"email"}"#);
}
