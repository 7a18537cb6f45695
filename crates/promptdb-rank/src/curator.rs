//! Filter → dedup → sort → truncate.

use std::cmp::Ordering;
use std::collections::HashSet;

use promptdb_core::config::CurationPolicy;
use promptdb_core::types::ScoredResult;

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Stable insertion sort. Leaves every adjacent pair ordered even when `cmp`
/// is not transitive, which `slice::sort_by` does not promise.
fn insertion_sort_by<T, F>(items: &mut [T], cmp: F)
where
    F: Fn(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResultCurator {
    policy: CurationPolicy,
}

impl ResultCurator {
    pub fn new(policy: &CurationPolicy) -> Self { Self { policy: policy.clone() } }

    /// The banded three-level ordering.
    ///
    /// Relevance descending unless the two scores are within
    /// `relevance_band`; then quality descending unless within
    /// `quality_band`; then case-insensitive name ascending.
    pub fn compare(&self, a: &ScoredResult, b: &ScoredResult) -> Ordering {
        if a.relevance_score.abs_diff(b.relevance_score) > self.policy.relevance_band {
            return b.relevance_score.cmp(&a.relevance_score);
        }
        if a.quality_score.abs_diff(b.quality_score) > self.policy.quality_band {
            return b.quality_score.cmp(&a.quality_score);
        }
        name_key(&a.name).cmp(&name_key(&b.name))
    }

    pub fn keep(&self, r: &ScoredResult) -> bool {
        r.relevance_score >= self.policy.min_relevance && !r.name.trim().is_empty() && !r.description.trim().is_empty()
    }

    pub fn curate(&self, results: Vec<ScoredResult>, max_results: usize) -> Vec<ScoredResult> {
        let limit = max_results.min(self.policy.max_results_cap);
        if limit == 0 {
            return Vec::new();
        }
        let received = results.len();

        let mut seen = HashSet::new();
        let mut kept: Vec<ScoredResult> =
            results.into_iter().filter(|r| self.keep(r)).filter(|r| seen.insert(name_key(&r.name))).collect();

        insertion_sort_by(&mut kept, |a, b| self.compare(a, b));
        kept.truncate(limit);
        tracing::debug!(received, returned = kept.len(), limit, "results curated");
        kept
    }
}
