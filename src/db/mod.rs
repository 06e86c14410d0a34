//! Dataset access layer for soccer-sql.
//!
//! Provides a trait-based interface for read-only dataset operations so the
//! runner can be driven by SQLite or by an in-memory mock.

mod mock;
mod schema;
mod sqlite;
mod types;

pub use mock::MockDatasetClient;
pub use schema::{Column, ForeignKey, Schema, Table};
pub use sqlite::SqliteClient;
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Opens the dataset at `path` read-only.
///
/// This is the central factory function for dataset connections.
pub async fn open(path: &Path) -> Result<Box<dyn DatasetClient>> {
    let client = SqliteClient::open(path).await?;
    Ok(Box::new(client))
}

/// Trait defining the interface for dataset clients.
///
/// Every operation is a read; implementations must never mutate the dataset.
#[async_trait]
pub trait DatasetClient: Send + Sync {
    /// Introspects the dataset schema, returning tables and relationships.
    async fn introspect_schema(&self) -> Result<Schema>;

    /// Executes a SQL query and returns the complete result set.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;

    /// Releases the underlying connection.
    async fn close(&self) -> Result<()>;
}
