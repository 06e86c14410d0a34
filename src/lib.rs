//! soccer-sql - a fixed catalog of read-only SQL queries over the European
//! soccer dataset.
//!
//! This library exposes the core modules for the binary and for integration tests.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod output;
pub mod query;
pub mod safety;
