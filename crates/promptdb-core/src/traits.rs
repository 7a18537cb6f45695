use async_trait::async_trait;

use crate::types::{CallerContext, CatalogEntry};

/// Paging and visibility knobs for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub public_only: bool,
    pub page_size: usize,
}

/// Read-only view of the persisted prompt collection.
///
/// Implementations may fail or stall; callers are expected to bound each
/// call with a timeout and treat errors as "no results from this source".
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search_by_text(
        &self,
        text: &str,
        caller: Option<&CallerContext>,
    ) -> anyhow::Result<Vec<CatalogEntry>>;

    async fn list_by_category(
        &self,
        category: &str,
        options: ListOptions,
    ) -> anyhow::Result<Vec<CatalogEntry>>;

    async fn list_recent(&self, options: ListOptions) -> anyhow::Result<Vec<CatalogEntry>>;
}

#[async_trait]
impl<C: Catalog + ?Sized> Catalog for std::sync::Arc<C> {
    async fn search_by_text(
        &self,
        text: &str,
        caller: Option<&CallerContext>,
    ) -> anyhow::Result<Vec<CatalogEntry>> {
        (**self).search_by_text(text, caller).await
    }

    async fn list_by_category(
        &self,
        category: &str,
        options: ListOptions,
    ) -> anyhow::Result<Vec<CatalogEntry>> {
        (**self).list_by_category(category, options).await
    }

    async fn list_recent(&self, options: ListOptions) -> anyhow::Result<Vec<CatalogEntry>> {
        (**self).list_recent(options).await
    }
}
