//! In-memory `Catalog` used for local development and tests.
//!
//! Entries are kept in insertion order; "recent" means most recently inserted.
//! A catalog can be seeded from a JSON array or from every `*.json` file under
//! a directory tree.
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::traits::{Catalog, ListOptions};
use crate::types::{CallerContext, CatalogEntry};

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    entries: Vec<CatalogEntry>,
}

impl InMemoryCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self { Self { entries } }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    /// Load every `*.json` file under `root`, in path order.
    pub fn load_dir(root: &Path) -> Result<Self> {
        let files = list_json_files(root);
        if files.is_empty() {
            tracing::warn!(root = %root.display(), "no catalog files found");
            return Ok(Self::default());
        }
        let mut entries = Vec::new();
        for file_path in &files {
            let content = fs::read_to_string(file_path)?;
            let mut batch: Vec<CatalogEntry> = serde_json::from_str(&content)?;
            tracing::debug!(file = %file_path.display(), count = batch.len(), "loaded catalog file");
            entries.append(&mut batch);
        }
        tracing::info!(files = files.len(), entries = entries.len(), "catalog loaded");
        Ok(Self::new(entries))
    }

    pub fn push(&mut self, entry: CatalogEntry) { self.entries.push(entry); }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn entries(&self) -> &[CatalogEntry] { &self.entries }
}

fn matches_text(entry: &CatalogEntry, needle: &str) -> bool {
    entry.name.to_lowercase().contains(needle)
        || entry.description_text().to_lowercase().contains(needle)
        || entry.category_text().to_lowercase().contains(needle)
        || entry.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

fn list_json_files(root: &Path) -> Vec<PathBuf> {
    let mut json_files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    json_files.sort();
    json_files
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    /// Anonymous callers only see public entries.
    async fn search_by_text(
        &self,
        text: &str,
        caller: Option<&CallerContext>,
    ) -> anyhow::Result<Vec<CatalogEntry>> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() { return Ok(Vec::new()); }
        Ok(self
            .entries
            .iter()
            .filter(|e| caller.is_some() || e.is_public)
            .filter(|e| matches_text(e, &needle))
            .cloned()
            .collect())
    }

    async fn list_by_category(
        &self,
        category: &str,
        options: ListOptions,
    ) -> anyhow::Result<Vec<CatalogEntry>> {
        let wanted = category.trim().to_lowercase();
        Ok(self
            .entries
            .iter()
            .filter(|e| !options.public_only || e.is_public)
            .filter(|e| e.category_text().to_lowercase() == wanted)
            .take(options.page_size)
            .cloned()
            .collect())
    }

    async fn list_recent(&self, options: ListOptions) -> anyhow::Result<Vec<CatalogEntry>> {
        Ok(self
            .entries
            .iter()
            .rev()
            .filter(|e| !options.public_only || e.is_public)
            .take(options.page_size)
            .cloned()
            .collect())
    }
}
