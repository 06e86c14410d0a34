//! Error types for soccer-sql.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for soccer-sql operations.
#[derive(Error, Debug)]
pub enum SoccerSqlError {
    /// The dataset file is missing, unreadable, or not a SQLite database.
    #[error("Dataset unavailable: {0}")]
    DatasetUnavailable(String),

    /// A catalog statement failed to prepare or execute (missing table, bad column, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration errors (invalid config file, unknown catalog number, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SoccerSqlError {
    /// Creates a dataset-unavailable error with the given message.
    pub fn dataset_unavailable(msg: impl Into<String>) -> Self {
        Self::DatasetUnavailable(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a query error attributed to a catalog entry.
    pub fn query_entry(number: u8, concept: &str, msg: impl std::fmt::Display) -> Self {
        Self::Query(format!("query {number} [{concept}]: {msg}"))
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::DatasetUnavailable(_) => "Dataset Error",
            Self::Query(_) => "Query Error",
            Self::Config(_) => "Configuration Error",
        }
    }

    /// Process exit code for an error that aborts the whole run.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::DatasetUnavailable(_) | Self::Config(_) => 1,
            Self::Query(_) => 2,
        }
    }
}

/// Result type alias using SoccerSqlError.
pub type Result<T> = std::result::Result<T, SoccerSqlError>;
