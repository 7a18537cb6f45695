//! Shared types, configuration and the catalog seam for the prompt ranking
//! pipeline.
//!
//! The persisted catalog is an external collaborator reached through the
//! [`traits::Catalog`] trait; [`catalog::InMemoryCatalog`] stands in for it in
//! development and tests.
#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
