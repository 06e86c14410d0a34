//! Output formatting for run reports.
//!
//! Renders result sets as box-drawn text tables or as JSON, and formats the
//! catalog and schema listings.

use crate::db::{QueryResult, Row, Schema, Value};
use crate::query::{CatalogEntry, EntryReport, RunReport};
use serde::{Deserialize, Serialize};

/// Maximum width for any column.
const MAX_COLUMN_WIDTH: usize = 40;

/// Minimum width for any column.
const MIN_COLUMN_WIDTH: usize = 4;

/// Output format for run reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Box-drawn tables, one per entry.
    #[default]
    Text,
    /// A JSON array with one object per entry.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}. Expected: text or json")),
        }
    }
}

/// Formats run reports.
pub struct ReportRenderer {
    format: OutputFormat,
    /// Text rows shown per result set; 0 shows everything.
    max_rows: usize,
}

impl ReportRenderer {
    /// Creates a new renderer.
    pub fn new(format: OutputFormat, max_rows: usize) -> Self {
        Self { format, max_rows }
    }

    /// Formats the report according to the configured format.
    pub fn render(&self, report: &RunReport<'_>) -> String {
        match self.format {
            OutputFormat::Text => self.render_text(report),
            OutputFormat::Json => render_json(report),
        }
    }

    fn render_text(&self, report: &RunReport<'_>) -> String {
        let mut out = String::new();

        for entry_report in &report.entries {
            out.push_str(&self.render_entry_text(entry_report));
            out.push('\n');
        }

        let skipped = if report.skipped > 0 {
            format!(", {} skipped", report.skipped)
        } else {
            String::new()
        };
        out.push_str(&format!(
            "{} of {} queries succeeded, {} failed{}\n",
            report.succeeded(),
            report.entries.len() + report.skipped,
            report.failed(),
            skipped
        ));
        out
    }

    fn render_entry_text(&self, entry_report: &EntryReport<'_>) -> String {
        let entry = entry_report.entry;
        let mut out = format!("Query {} [{}] {}\n", entry.number, entry.concept, entry.title);
        if let Some(note) = entry.note {
            out.push_str(&format!("  note: {note}\n"));
        }

        match &entry_report.outcome {
            Ok(outcome) => {
                out.push_str(&render_table(&outcome.result, self.max_rows));
                out.push_str(&format!(
                    "{} row{} ({}ms)\n",
                    outcome.result.row_count,
                    if outcome.result.row_count == 1 { "" } else { "s" },
                    outcome.execution_time.as_millis()
                ));
            }
            Err(e) => out.push_str(&format!("{e}\n")),
        }
        out
    }
}

/// JSON shape of one entry.
#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    number: u8,
    concept: &'a str,
    title: &'a str,
    sql: &'a str,
    status: &'static str,
    columns: Vec<&'a str>,
    rows: Vec<serde_json::Map<String, serde_json::Value>>,
    row_count: usize,
    execution_ms: Option<u64>,
    error: Option<String>,
}

impl<'a> JsonEntry<'a> {
    fn from_report(entry_report: &'a EntryReport<'_>) -> Self {
        let entry = entry_report.entry;
        let base = JsonEntry {
            number: entry.number,
            concept: entry.concept,
            title: entry.title,
            sql: entry.sql,
            status: "error",
            columns: Vec::new(),
            rows: Vec::new(),
            row_count: 0,
            execution_ms: None,
            error: None,
        };

        match &entry_report.outcome {
            Ok(outcome) => JsonEntry {
                status: "ok",
                columns: outcome.result.column_names(),
                rows: outcome
                    .result
                    .rows
                    .iter()
                    .map(|row| row_to_json(&outcome.result, row))
                    .collect(),
                row_count: outcome.result.row_count,
                execution_ms: Some(outcome.execution_time.as_millis() as u64),
                ..base
            },
            Err(e) => JsonEntry {
                error: Some(e.to_string()),
                ..base
            },
        }
    }
}

fn row_to_json(result: &QueryResult, row: &Row) -> serde_json::Map<String, serde_json::Value> {
    result
        .columns
        .iter()
        .zip(row.iter())
        .map(|(col, value)| (col.name.clone(), value.to_json()))
        .collect()
}

/// Formats as a pretty-printed JSON array.
fn render_json(report: &RunReport<'_>) -> String {
    let entries: Vec<JsonEntry<'_>> = report
        .entries
        .iter()
        .map(|entry_report| JsonEntry::from_report(entry_report))
        .collect();

    serde_json::to_string_pretty(&entries)
        .map(|json| format!("{json}\n"))
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {}\"}}\n", e))
}

/// Renders a result set as a box-drawn table.
pub fn render_table(result: &QueryResult, max_rows: usize) -> String {
    if result.columns.is_empty() {
        return "(no columns)\n".to_string();
    }

    let shown = if max_rows == 0 {
        result.rows.len()
    } else {
        result.rows.len().min(max_rows)
    };
    let rows = &result.rows[..shown];
    let widths = column_widths(result, rows);

    let mut lines = vec![border(&widths, '┌', '┬', '┐')];
    lines.push(table_line(
        result.columns.iter().map(|c| c.name.as_str()),
        &widths,
    ));
    lines.push(border(&widths, '├', '┼', '┤'));
    for row in rows {
        let cells: Vec<String> = row.iter().map(Value::to_display_string).collect();
        lines.push(table_line(cells.iter().map(String::as_str), &widths));
    }
    lines.push(border(&widths, '└', '┴', '┘'));

    if shown < result.rows.len() {
        lines.push(format!(
            "... {} more row{} not shown",
            result.rows.len() - shown,
            if result.rows.len() - shown == 1 { "" } else { "s" }
        ));
    }

    format!("{}\n", lines.join("\n"))
}

/// Calculates the width of each column from the header and the shown rows.
fn column_widths(result: &QueryResult, rows: &[Row]) -> Vec<usize> {
    let mut widths: Vec<usize> = result
        .columns
        .iter()
        .map(|col| col.name.chars().count().max(MIN_COLUMN_WIDTH))
        .collect();

    for row in rows {
        for (width, value) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(value.to_display_string().chars().count());
        }
    }

    widths.iter().map(|&w| w.min(MAX_COLUMN_WIDTH)).collect()
}

fn border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}", segments.join(&middle.to_string()))
}

fn table_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths.iter())
        .map(|(cell, &width)| {
            let text = truncate(cell, width);
            let padding = width - text.chars().count();
            format!(" {text}{} ", " ".repeat(padding))
        })
        .collect();
    format!("│{}│", padded.join("│"))
}

/// Truncates to `max_width` characters, adding an ellipsis when cut.
fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{kept}...")
    }
}

/// Formats the catalog listing shown by `--list`.
pub fn render_catalog(entries: &[CatalogEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            let note = e
                .note
                .map(|n| format!("\n      note: {n}"))
                .unwrap_or_default();
            format!("{:>3}  {:<17} {}{}\n", e.number, e.concept, e.title, note)
        })
        .collect()
}

/// Formats the schema listing shown by `--tables`.
pub fn render_schema(schema: &Schema) -> String {
    if schema.tables.is_empty() {
        return "(no tables)\n".to_string();
    }

    let mut out = String::new();
    for table in &schema.tables {
        out.push_str(&format!("Table: {}\n", table.name));
        for column in &table.columns {
            let mut annotations = Vec::new();
            if table.primary_key.contains(&column.name) {
                annotations.push("PK".to_string());
            }
            if !column.is_nullable {
                annotations.push("NOT NULL".to_string());
            }
            for fk in schema.foreign_keys_from(&table.name) {
                if let Some(pos) = fk.from_columns.iter().position(|c| c == &column.name) {
                    let target = fk.to_columns.get(pos).map(String::as_str).unwrap_or("");
                    annotations.push(format!("FK -> {}.{}", fk.to_table, target));
                }
            }

            let data_type = if column.data_type.is_empty() {
                "ANY"
            } else {
                column.data_type.as_str()
            };
            if annotations.is_empty() {
                out.push_str(&format!("  - {}: {}\n", column.name, data_type));
            } else {
                out.push_str(&format!(
                    "  - {}: {} ({})\n",
                    column.name,
                    data_type,
                    annotations.join(", ")
                ));
            }
        }
        out.push('\n');
    }
    out
}
