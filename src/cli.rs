//! Command-line argument parsing for soccer-sql.
//!
//! Uses clap to parse CLI arguments.

use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Run the fixed catalog of read-only SQL queries against the European
/// soccer SQLite dataset.
#[derive(Parser, Debug)]
#[command(name = "soccer-sql")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the SQLite dataset (opened read-only)
    #[arg(value_name = "DATASET")]
    pub dataset: Option<PathBuf>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Comma-separated catalog numbers to run (e.g., "3,8,20")
    #[arg(long, value_name = "N", value_delimiter = ',')]
    pub only: Vec<u8>,

    /// Output format: text or json
    #[arg(long, value_name = "FORMAT")]
    pub output: Option<String>,

    /// Rows shown per result set in text output (0 = all)
    #[arg(long, value_name = "N")]
    pub max_rows: Option<usize>,

    /// Print the catalog and exit without opening the dataset
    #[arg(long)]
    pub list: bool,

    /// Print the dataset's tables and columns before running
    #[arg(long)]
    pub tables: bool,

    /// Stop at the first failing query
    #[arg(long)]
    pub fail_fast: bool,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }

    /// Parses the output format from the --output argument, if given.
    pub fn parse_output_format(&self) -> std::result::Result<Option<OutputFormat>, String> {
        self.output
            .as_deref()
            .map(str::parse::<OutputFormat>)
            .transpose()
    }
}
