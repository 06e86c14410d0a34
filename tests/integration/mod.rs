//! Integration tests against SQLite fixtures.

pub mod runner_test;
pub mod schema_test;
