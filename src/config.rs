//! Configuration management for soccer-sql.
//!
//! Handles loading the optional TOML config file and merging it with the
//! command line into the settings a run uses.

use crate::error::{Result, SoccerSqlError};
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Dataset path used when neither the CLI nor the config names one.
pub const DEFAULT_DATASET: &str = "database.sqlite";

/// Main configuration structure for soccer-sql.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Dataset location.
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Dataset location.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DatasetConfig {
    /// Path to the SQLite file.
    pub path: Option<PathBuf>,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// "text" or "json".
    #[serde(default)]
    pub format: OutputFormat,

    /// Text rows shown per result set; 0 = unlimited.
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

fn default_max_rows() -> usize {
    25
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            max_rows: default_max_rows(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("soccer-sql")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            SoccerSqlError::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            SoccerSqlError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}

/// Effective settings for one run, after CLI overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub dataset: PathBuf,
    pub format: OutputFormat,
    pub max_rows: usize,
    /// Catalog numbers to run; empty runs everything.
    pub only: Vec<u8>,
    pub fail_fast: bool,
    pub list: bool,
    pub tables: bool,
}

impl Settings {
    /// Resolves settings with precedence CLI > config file > defaults.
    pub fn resolve(cli: &crate::cli::Cli, config: &Config) -> Result<Self> {
        let dataset = cli
            .dataset
            .clone()
            .or_else(|| config.dataset.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET));

        let format = match cli.parse_output_format().map_err(SoccerSqlError::config)? {
            Some(format) => format,
            None => config.output.format,
        };

        Ok(Self {
            dataset,
            format,
            max_rows: cli.max_rows.unwrap_or(config.output.max_rows),
            only: cli.only.clone(),
            fail_fast: cli.fail_fast,
            list: cli.list,
            tables: cli.tables,
        })
    }
}
