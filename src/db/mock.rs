//! Mock dataset client for testing.
//!
//! Serves canned results keyed by SQL text so the runner can be exercised
//! without a SQLite file.

use super::{DatasetClient, QueryResult, Schema};
use crate::error::{Result, SoccerSqlError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A mock dataset client that returns predefined results.
///
/// Any SQL without a registered result fails with a query error, the same
/// way SQLite rejects a statement naming a table the file does not have.
#[derive(Default)]
pub struct MockDatasetClient {
    results: HashMap<String, QueryResult>,
    executed: AtomicUsize,
    closed: AtomicBool,
}

impl MockDatasetClient {
    /// Creates a new mock client with no registered results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the result returned for `sql`.
    pub fn with_result(mut self, sql: impl Into<String>, result: QueryResult) -> Self {
        self.results.insert(normalize(&sql.into()), result);
        self
    }

    /// Number of statements that reached the client.
    pub fn executed_count(&self) -> usize {
        self.executed.load(Ordering::SeqCst)
    }

    /// Returns true once `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Collapses whitespace so multi-line SQL matches regardless of layout.
fn normalize(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl DatasetClient for MockDatasetClient {
    async fn introspect_schema(&self) -> Result<Schema> {
        Ok(Schema::new())
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        self.executed.fetch_add(1, Ordering::SeqCst);
        self.results
            .get(&normalize(sql))
            .cloned()
            .ok_or_else(|| SoccerSqlError::query(format!("no mock result for: {}", normalize(sql))))
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
