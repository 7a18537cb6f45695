//! promptdb-rank
//!
//! Scoring, curation and the [`PromptRanker`] entry point that ties the
//! analyzer and retriever together.
#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod curator;
pub mod pipeline;
pub mod scorer;

pub use curator::ResultCurator;
pub use pipeline::PromptRanker;
pub use scorer::RelevanceScorer;
