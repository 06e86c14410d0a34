//! Read-only guard for catalog statements.
//!
//! Every statement is parsed before it reaches the dataset and anything that
//! is not a plain query is refused.

mod parser;

pub use parser::{inspect, Guard};

use std::fmt;

/// What running a statement would do to the dataset.
///
/// Variants are ordered from harmless to most invasive, so the verdict for a
/// batch is simply the maximum over its statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Access {
    /// Reads rows only.
    Read,
    /// Changes rows (INSERT, REPLACE, UPDATE, DELETE).
    Write,
    /// Changes tables, attachments or connection state.
    Schema,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Schema => "schema change",
        };
        f.write_str(label)
    }
}

/// Leading keyword of a statement, as far as the guard cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Alter,
    Drop,
    Attach,
    Pragma,
    Other,
}

impl StatementKind {
    /// Access implied by the statement keyword alone.
    pub fn access(self) -> Access {
        match self {
            Self::Select => Access::Read,
            Self::Insert | Self::Update | Self::Delete => Access::Write,
            _ => Access::Schema,
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Create => "CREATE",
            Self::Alter => "ALTER",
            Self::Drop => "DROP",
            Self::Attach => "ATTACH",
            Self::Pragma => "PRAGMA",
            Self::Other => "non-query",
        };
        f.write_str(keyword)
    }
}

/// The guard's verdict on a piece of SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// Most invasive access found anywhere in the SQL.
    pub access: Access,
    /// The statement responsible for `access`.
    pub kind: StatementKind,
    /// Number of top-level statements.
    pub statements: usize,
}

impl Verdict {
    /// Returns true if the SQL only reads.
    pub fn is_read_only(&self) -> bool {
        self.access == Access::Read
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} statement ({})", self.kind, self.access)?;
        if self.statements > 1 {
            write!(f, " in a batch of {}", self.statements)?;
        }
        Ok(())
    }
}
