//! promptdb-intent
//!
//! Keyword-table intent analysis. Turns raw query text into an
//! [`promptdb_core::types::Intent`] without any I/O. The matching helpers are
//! shared with the relevance scorer so both sides agree on what a "hit" is.
#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod analyzer;
pub mod tables;

pub use analyzer::{normalize, tokenize, IntentAnalyzer, TextProfile};
pub use tables::{category_keywords, domain_keywords, STOP_WORDS};
