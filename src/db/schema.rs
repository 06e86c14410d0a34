//! Dataset schema types for soccer-sql.
//!
//! Represents the tables of the dataset, their columns and the foreign keys
//! SQLite reports for them. The runner never defines the schema; it only
//! describes what the file contains.

/// Represents the complete schema of a dataset.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// All user tables, ordered by name.
    pub tables: Vec<Table>,

    /// Foreign key relationships between tables.
    pub foreign_keys: Vec<ForeignKey>,
}

impl Schema {
    /// Creates a new empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a table by name, case-insensitively.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Returns the table names in schema order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Returns the foreign keys declared on `table`.
    pub fn foreign_keys_from(&self, table: &str) -> Vec<&ForeignKey> {
        self.foreign_keys
            .iter()
            .filter(|fk| fk.from_table.eq_ignore_ascii_case(table))
            .collect()
    }
}

/// A table in the dataset.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub primary_key: Vec<String>,
}

impl Table {
    /// Looks up a column by name, case-insensitively.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// A column of a table.
#[derive(Debug, Clone, Default)]
pub struct Column {
    pub name: String,
    /// Declared type as written in the CREATE TABLE statement (may be empty).
    pub data_type: String,
    pub is_nullable: bool,
    pub default: Option<String>,
}

/// A foreign key relationship.
#[derive(Debug, Clone, Default)]
pub struct ForeignKey {
    pub from_table: String,
    pub from_columns: Vec<String>,
    pub to_table: String,
    pub to_columns: Vec<String>,
}
