//! SQLite dataset client implementation.
//!
//! Provides the `SqliteClient` struct that implements the `DatasetClient` trait
//! for a SQLite file opened read-only using sqlx.

use crate::db::{Column, ColumnInfo, DatasetClient, ForeignKey, QueryResult, Row, Schema, Table, Value};
use crate::error::{Result, SoccerSqlError};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column as SqlxColumn, Executor, Row as SqlxRow, Statement, TypeInfo, ValueRef};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How long to wait for the single pooled connection.
const ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// Read-only SQLite dataset client.
///
/// Holds exactly one connection for the lifetime of the run.
#[derive(Debug)]
pub struct SqliteClient {
    pool: SqlitePool,
    path: PathBuf,
}

impl SqliteClient {
    /// Opens the dataset at `path` in read-only mode.
    ///
    /// The file is never created. A path that is missing, is not a regular
    /// file, or does not hold a SQLite database yields `DatasetUnavailable`.
    pub async fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SoccerSqlError::dataset_unavailable(format!(
                "{} does not exist",
                path.display()
            )));
        }
        if !path.is_file() {
            return Err(SoccerSqlError::dataset_unavailable(format!(
                "{} is not a file",
                path.display()
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
            .connect_with(options)
            .await
            .map_err(|e| {
                SoccerSqlError::dataset_unavailable(format!(
                    "cannot open {}: {e}",
                    path.display()
                ))
            })?;

        // Opening is lazy about the file header; touching sqlite_master is not.
        if let Err(e) = sqlx::query("SELECT COUNT(*) FROM sqlite_master")
            .fetch_one(&pool)
            .await
        {
            pool.close().await;
            return Err(SoccerSqlError::dataset_unavailable(format!(
                "{} is not a readable SQLite database: {e}",
                path.display()
            )));
        }

        info!("Opened dataset {} (read-only)", path.display());
        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    /// Returns the path of the open dataset.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fetches all user tables in name order.
    async fn fetch_tables(&self) -> Result<Vec<Table>> {
        let table_names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT name
            FROM sqlite_master
            WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SoccerSqlError::query(format!("Failed to fetch tables: {e}")))?;

        let mut tables = Vec::with_capacity(table_names.len());

        for table_name in table_names {
            let (columns, primary_key) = self.fetch_columns(&table_name).await?;
            tables.push(Table {
                name: table_name,
                columns,
                primary_key,
            });
        }

        Ok(tables)
    }

    /// Fetches columns and primary key columns for a specific table.
    async fn fetch_columns(&self, table_name: &str) -> Result<(Vec<Column>, Vec<String>)> {
        let rows: Vec<(String, String, i64, Option<String>, i64)> = sqlx::query_as(
            r#"
            SELECT name, type, "notnull", dflt_value, pk
            FROM pragma_table_info(?)
            ORDER BY cid
            "#,
        )
        .bind(table_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            SoccerSqlError::query(format!("Failed to fetch columns for {table_name}: {e}"))
        })?;

        let mut primary_key: Vec<(i64, String)> = rows
            .iter()
            .filter(|(_, _, _, _, pk)| *pk > 0)
            .map(|(name, _, _, _, pk)| (*pk, name.clone()))
            .collect();
        primary_key.sort();

        let columns = rows
            .into_iter()
            .map(|(name, data_type, not_null, default, _)| Column {
                name,
                data_type,
                is_nullable: not_null == 0,
                default,
            })
            .collect();

        Ok((
            columns,
            primary_key.into_iter().map(|(_, name)| name).collect(),
        ))
    }

    /// Fetches foreign keys declared on `table_name`.
    async fn fetch_foreign_keys(&self, table_name: &str) -> Result<Vec<ForeignKey>> {
        let rows: Vec<(i64, String, String, Option<String>)> = sqlx::query_as(
            r#"
            SELECT id, "table", "from", "to"
            FROM pragma_foreign_key_list(?)
            ORDER BY id, seq
            "#,
        )
        .bind(table_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            SoccerSqlError::query(format!(
                "Failed to fetch foreign keys for {table_name}: {e}"
            ))
        })?;

        // One pragma row per column; consecutive rows with the same id form one key.
        let mut keys: Vec<(i64, ForeignKey)> = Vec::new();
        for (id, to_table, from_column, to_column) in rows {
            match keys.last_mut() {
                Some((last_id, fk)) if *last_id == id => {
                    fk.from_columns.push(from_column);
                    fk.to_columns.push(to_column.unwrap_or_default());
                }
                _ => keys.push((
                    id,
                    ForeignKey {
                        from_table: table_name.to_string(),
                        from_columns: vec![from_column],
                        to_table,
                        to_columns: vec![to_column.unwrap_or_default()],
                    },
                )),
            }
        }

        Ok(keys.into_iter().map(|(_, fk)| fk).collect())
    }
}

#[async_trait]
impl DatasetClient for SqliteClient {
    async fn introspect_schema(&self) -> Result<Schema> {
        let tables = self.fetch_tables().await?;

        let mut foreign_keys = Vec::new();
        for table in &tables {
            foreign_keys.extend(self.fetch_foreign_keys(&table.name).await?);
        }

        Ok(Schema {
            tables,
            foreign_keys,
        })
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        let start = Instant::now();

        // Preparing first surfaces schema errors and gives us column names
        // even when the result set turns out empty.
        let statement = (&self.pool)
            .prepare(sql)
            .await
            .map_err(|e| SoccerSqlError::query(format_query_error(e)))?;

        let columns: Vec<ColumnInfo> = statement
            .columns()
            .iter()
            .map(|col| ColumnInfo::new(col.name(), declared_type(col.type_info().name())))
            .collect();

        let result = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SoccerSqlError::query(format_query_error(e)))?;

        let rows = result.iter().map(convert_row).collect::<Result<Vec<Row>>>()?;
        let execution_time = start.elapsed();

        debug!(
            "Query returned {} rows in {:?}",
            rows.len(),
            execution_time
        );

        Ok(QueryResult::with_data(columns, rows).with_execution_time(execution_time))
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        info!("Closed dataset {}", self.path.display());
        Ok(())
    }
}

/// Computed columns carry no declared type; sqlx reports those as "NULL".
fn declared_type(name: &str) -> &str {
    if name.eq_ignore_ascii_case("NULL") {
        ""
    } else {
        name
    }
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Result<Row> {
    (0..row.columns().len())
        .map(|i| convert_value(row, i))
        .collect()
}

/// Converts a single cell to our Value type.
///
/// SQLite is dynamically typed, so the cell's runtime storage class decides
/// the variant rather than the declared column type. TEXT that is not valid
/// UTF-8 is decoded lossily rather than dropped.
fn convert_value(row: &SqliteRow, index: usize) -> Result<Value> {
    let storage_class = {
        let raw = row.try_get_raw(index).map_err(|e| decode_error(index, e))?;
        if raw.is_null() {
            return Ok(Value::Null);
        }
        raw.type_info().name().to_uppercase()
    };

    let value = match storage_class.as_str() {
        "INTEGER" => row.try_get_unchecked::<i64, _>(index).map(Value::Integer),
        "REAL" => row.try_get_unchecked::<f64, _>(index).map(Value::Real),
        "BLOB" => row.try_get_unchecked::<Vec<u8>, _>(index).map(Value::Blob),
        _ => match row.try_get_unchecked::<String, _>(index) {
            Ok(text) => Ok(Value::Text(text)),
            Err(_) => row
                .try_get_unchecked::<Vec<u8>, _>(index)
                .map(|bytes| Value::Text(String::from_utf8_lossy(&bytes).into_owned())),
        },
    };
    value.map_err(|e| decode_error(index, e))
}

fn decode_error(index: usize, error: sqlx::Error) -> SoccerSqlError {
    SoccerSqlError::query(format!("cannot decode column {index}: {error}"))
}

/// Formats a query error, preferring SQLite's own message.
fn format_query_error(error: sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db_error) => match db_error.code() {
            Some(code) => format!("{} (code {code})", db_error.message()),
            None => db_error.message().to_string(),
        },
        None => error.to_string(),
    }
}
