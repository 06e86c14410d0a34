//! Catalog execution with a read-only guard.
//!
//! Runs catalog entries one after another against a single dataset client.
//! Each entry is isolated: a failing entry is recorded and the run moves on,
//! unless the caller asked to stop at the first failure.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::catalog::CatalogEntry;
use crate::db::{DatasetClient, QueryResult};
use crate::error::{Result, SoccerSqlError};
use crate::safety;

/// Runs catalog entries against a dataset.
pub struct QueryRunner<'a> {
    db: &'a dyn DatasetClient,
}

impl<'a> QueryRunner<'a> {
    /// Creates a new runner over an open dataset client.
    pub fn new(db: &'a dyn DatasetClient) -> Self {
        Self { db }
    }

    /// Runs a single entry.
    ///
    /// Statements the guard recognises as writes are refused before they
    /// reach the dataset.
    pub async fn run_entry(&self, entry: &CatalogEntry) -> Result<QueryOutcome> {
        match safety::inspect(entry.sql) {
            Ok(verdict) if !verdict.is_read_only() => {
                return Err(SoccerSqlError::query_entry(
                    entry.number,
                    entry.concept,
                    format!("refusing {verdict} against a read-only dataset"),
                ));
            }
            Ok(_) => {}
            // The connection is read-only regardless; let SQLite have the final say.
            Err(e) => debug!("{}: guard could not parse statement: {e}", entry.label()),
        }

        let start = Instant::now();
        let result = self
            .db
            .execute_query(entry.sql)
            .await
            .map_err(|e| SoccerSqlError::query_entry(entry.number, entry.concept, strip_category(&e)))?;
        let execution_time = start.elapsed();

        debug!(
            "{} returned {} rows in {:?}",
            entry.label(),
            result.row_count,
            execution_time
        );

        Ok(QueryOutcome {
            result,
            execution_time,
        })
    }

    /// Runs entries in the given order.
    ///
    /// With `fail_fast`, the first failing entry ends the run and the
    /// remaining entries are counted as skipped.
    pub async fn run<'e>(&self, entries: &[&'e CatalogEntry], fail_fast: bool) -> RunReport<'e> {
        let mut report = RunReport::default();

        for (position, entry) in entries.iter().copied().enumerate() {
            let outcome = self.run_entry(entry).await;
            let failed = outcome.is_err();

            if let Err(e) = &outcome {
                warn!("{e}");
            }
            report.entries.push(EntryReport { entry, outcome });

            if failed && fail_fast {
                report.skipped = entries.len() - position - 1;
                if report.skipped > 0 {
                    warn!("Stopping after first failure; {} entries skipped", report.skipped);
                }
                break;
            }
        }

        info!(
            "Run finished: {} succeeded, {} failed, {} skipped",
            report.succeeded(),
            report.failed(),
            report.skipped
        );
        report
    }
}

/// Keeps the underlying message when re-wrapping a query error.
fn strip_category(error: &SoccerSqlError) -> String {
    match error {
        SoccerSqlError::Query(msg) => msg.clone(),
        other => other.to_string(),
    }
}

/// Successful execution of one entry.
#[derive(Debug)]
pub struct QueryOutcome {
    /// The complete result set.
    pub result: QueryResult,
    /// Wall time including the guard and statement preparation.
    pub execution_time: Duration,
}

/// What happened to one entry during a run.
#[derive(Debug)]
pub struct EntryReport<'e> {
    pub entry: &'e CatalogEntry,
    pub outcome: Result<QueryOutcome>,
}

impl EntryReport<'_> {
    /// Returns true if the entry produced a result set.
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Returns the result set, if the entry succeeded.
    pub fn result(&self) -> Option<&QueryResult> {
        self.outcome.as_ref().ok().map(|o| &o.result)
    }
}

/// Outcome of a whole run, in execution order.
#[derive(Debug, Default)]
pub struct RunReport<'e> {
    pub entries: Vec<EntryReport<'e>>,
    /// Entries not run because of fail-fast.
    pub skipped: usize,
}

impl<'e> RunReport<'e> {
    /// Number of entries that produced a result set.
    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.is_success()).count()
    }

    /// Number of entries that failed.
    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }

    /// Returns true if every selected entry ran and succeeded.
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.skipped == 0
    }

    /// Finds the report for a catalog number.
    pub fn entry(&self, number: u8) -> Option<&EntryReport<'e>> {
        self.entries.iter().find(|e| e.entry.number == number)
    }
}
