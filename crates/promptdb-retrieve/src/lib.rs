//! promptdb-retrieve
//!
//! Concurrent candidate retrieval against a [`promptdb_core::traits::Catalog`].
//! See `retriever` for the fan-out plan and the partial-failure policy.
#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod retriever;

pub use retriever::{CandidateRetriever, Retrieval, SubQuery};
