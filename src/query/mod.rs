//! The query catalog and its execution.
//!
//! `catalog` holds the fixed statements; `executor` runs them and collects
//! per-entry outcomes.

pub mod catalog;
pub mod executor;

pub use catalog::{catalog, CatalogEntry, CATALOG};
pub use executor::{EntryReport, QueryOutcome, QueryRunner, RunReport};
