//! Statement inspection with sqlparser.
//!
//! Walks the parsed AST, including CTEs, set operations and derived tables
//! in FROM clauses, looking for anything that is not a read.

use sqlparser::ast::{Query, SetExpr, Statement, TableFactor, TableWithJoins};
use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser;

use crate::error::{Result, SoccerSqlError};

use super::{Access, StatementKind, Verdict};

/// (access, responsible statement) pair threaded through the walk.
type Finding = (Access, StatementKind);

const READ: Finding = (Access::Read, StatementKind::Select);

/// Parses SQL in the SQLite dialect and judges it.
#[derive(Debug)]
pub struct Guard {
    dialect: SQLiteDialect,
}

impl Default for Guard {
    fn default() -> Self {
        Self::new()
    }
}

impl Guard {
    pub fn new() -> Self {
        Self {
            dialect: SQLiteDialect {},
        }
    }

    /// Inspects `sql`.
    ///
    /// Returns an error when the SQL is empty or cannot be parsed; whether
    /// that blocks execution is the caller's decision.
    pub fn inspect(&self, sql: &str) -> Result<Verdict> {
        let statements = Parser::parse_sql(&self.dialect, sql)
            .map_err(|e| SoccerSqlError::query(format!("SQL parse error: {e}")))?;
        if statements.is_empty() {
            return Err(SoccerSqlError::query("Empty SQL statement"));
        }

        let (access, kind) = statements.iter().map(statement_finding).fold(READ, worse);
        Ok(Verdict {
            access,
            kind,
            statements: statements.len(),
        })
    }
}

/// Inspects `sql` with a fresh guard.
pub fn inspect(sql: &str) -> Result<Verdict> {
    Guard::new().inspect(sql)
}

/// Keeps the more invasive finding; the earlier one wins ties.
fn worse(current: Finding, candidate: Finding) -> Finding {
    if candidate.0 > current.0 {
        candidate
    } else {
        current
    }
}

fn statement_finding(statement: &Statement) -> Finding {
    let kind = match statement {
        Statement::Query(query) => return query_finding(query),
        Statement::Insert { .. } => StatementKind::Insert,
        Statement::Update { .. } => StatementKind::Update,
        Statement::Delete { .. } => StatementKind::Delete,
        Statement::CreateTable { .. }
        | Statement::CreateIndex { .. }
        | Statement::CreateView { .. } => StatementKind::Create,
        Statement::AlterTable { .. } => StatementKind::Alter,
        Statement::Drop { .. } => StatementKind::Drop,
        Statement::AttachDatabase { .. } => StatementKind::Attach,
        Statement::Pragma { .. } => StatementKind::Pragma,
        _ => StatementKind::Other,
    };
    (kind.access(), kind)
}

fn query_finding(query: &Query) -> Finding {
    let ctes = query
        .with
        .iter()
        .flat_map(|with| with.cte_tables.iter())
        .map(|cte| query_finding(&cte.query));

    std::iter::once(set_expr_finding(&query.body))
        .chain(ctes)
        .fold(READ, worse)
}

fn set_expr_finding(body: &SetExpr) -> Finding {
    match body {
        SetExpr::Select(select) => select.from.iter().map(joined_finding).fold(READ, worse),
        SetExpr::Query(query) => query_finding(query),
        SetExpr::SetOperation { left, right, .. } => {
            worse(set_expr_finding(left), set_expr_finding(right))
        }
        SetExpr::Insert(statement) | SetExpr::Update(statement) => statement_finding(statement),
        _ => READ,
    }
}

fn joined_finding(from: &TableWithJoins) -> Finding {
    std::iter::once(&from.relation)
        .chain(from.joins.iter().map(|join| &join.relation))
        .map(|relation| match relation {
            TableFactor::Derived { subquery, .. } => query_finding(subquery),
            TableFactor::NestedJoin {
                table_with_joins, ..
            } => joined_finding(table_with_joins),
            _ => READ,
        })
        .fold(READ, worse)
}
