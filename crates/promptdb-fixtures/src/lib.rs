//! Catalog doubles and sample data for tests across the workspace.
//!
//! [`FlakyCatalog`] wraps an [`InMemoryCatalog`] and can be told to fail or
//! stall individual operations. Every call is recorded, including the ones
//! that fail, so tests can assert on what the pipeline asked for.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use promptdb_core::catalog::InMemoryCatalog;
use promptdb_core::traits::{Catalog, ListOptions};
use promptdb_core::types::{CallerContext, CatalogEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogOp {
    SearchByText,
    ListByCategory,
    ListRecent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub op: CatalogOp,
    /// Search text or category; empty for `ListRecent`.
    pub arg: String,
    /// Only text searches carry a caller.
    pub caller: Option<CallerContext>,
}

#[derive(Debug, Clone)]
enum Fault {
    FailOp(CatalogOp),
    FailText(String),
    DelayOp(CatalogOp, Duration),
}

#[derive(Debug, Default)]
pub struct FlakyCatalog {
    inner: InMemoryCatalog,
    faults: Vec<Fault>,
    calls: Mutex<Vec<CallRecord>>,
}

impl FlakyCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { inner: InMemoryCatalog::new(entries), ..Self::default() }
    }

    /// Every call of `op` returns an error.
    pub fn failing(mut self, op: CatalogOp) -> Self {
        self.faults.push(Fault::FailOp(op));
        self
    }

    /// `search_by_text` with exactly this text returns an error.
    pub fn failing_text(mut self, text: impl Into<String>) -> Self {
        self.faults.push(Fault::FailText(text.into()));
        self
    }

    /// Every call of `op` sleeps for `delay` before answering.
    pub fn delayed(mut self, op: CatalogOp, delay: Duration) -> Self {
        self.faults.push(Fault::DelayOp(op, delay));
        self
    }

    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self, op: CatalogOp) -> usize {
        self.calls().iter().filter(|c| c.op == op).count()
    }

    pub fn total_calls(&self) -> usize { self.calls().len() }

    async fn enter(&self, op: CatalogOp, arg: &str, caller: Option<&CallerContext>) -> anyhow::Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(CallRecord { op, arg: arg.to_string(), caller: caller.cloned() });
        }
        for fault in &self.faults {
            match fault {
                Fault::DelayOp(o, delay) if *o == op => tokio::time::sleep(*delay).await,
                Fault::FailOp(o) if *o == op => anyhow::bail!("injected {op:?} failure"),
                Fault::FailText(t) if op == CatalogOp::SearchByText && t == arg => {
                    anyhow::bail!("injected failure for {arg:?}")
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Catalog for FlakyCatalog {
    async fn search_by_text(
        &self,
        text: &str,
        caller: Option<&CallerContext>,
    ) -> anyhow::Result<Vec<CatalogEntry>> {
        self.enter(CatalogOp::SearchByText, text, caller).await?;
        self.inner.search_by_text(text, caller).await
    }

    async fn list_by_category(
        &self,
        category: &str,
        options: ListOptions,
    ) -> anyhow::Result<Vec<CatalogEntry>> {
        self.enter(CatalogOp::ListByCategory, category, None).await?;
        self.inner.list_by_category(category, options).await
    }

    async fn list_recent(&self, options: ListOptions) -> anyhow::Result<Vec<CatalogEntry>> {
        self.enter(CatalogOp::ListRecent, "", None).await?;
        self.inner.list_recent(options).await
    }
}

/// A small catalog: one apology-email prompt among unrelated ones.
pub fn sample_entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("p-apology", "Apology Email Template")
            .with_description("professional apology email for business communication")
            .with_category("communication"),
        CatalogEntry::new("p-haiku", "Haiku Generator")
            .with_description("Turns any topic into a seventeen syllable haiku poem")
            .with_category("creative")
            .with_tags(["poetry", "haiku"]),
        CatalogEntry::new("p-sql", "SQL Query Optimizer")
            .with_description("Rewrites slow SQL queries and suggests indexes for large tables")
            .with_category("technical")
            .with_tags(["sql", "database", "performance"]),
        CatalogEntry::new("p-roadmap", "Product Roadmap Planner")
            .with_description("Builds a quarterly product roadmap with milestones and owners")
            .with_category("business")
            .with_tags(["planning"]),
        CatalogEntry::new("p-essay", "Essay Critic")
            .with_description("Reviews academic essays for structure, argument and citations")
            .with_category("education")
            .with_tags(["essay", "review", "academic"]),
        CatalogEntry::new("p-nda", "NDA Clause Explainer")
            .with_description("Explains confidentiality clauses in plain language")
            .with_category("legal"),
    ]
}

/// `n` public filler entries, `{prefix} 0` .. `{prefix} n-1`, in `category`.
pub fn filler_entries(prefix: &str, category: &str, n: usize) -> Vec<CatalogEntry> {
    (0..n)
        .map(|i| {
            CatalogEntry::new(format!("{prefix}-{i}"), format!("{prefix} {i}"))
                .with_description(format!("{prefix} filler prompt number {i} for catalog padding"))
                .with_category(category)
        })
        .collect()
}
