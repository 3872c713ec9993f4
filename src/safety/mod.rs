//! Query safety classification and the validator extension point.
//!
//! The pipeline executes model-generated SQL verbatim; the default
//! [`AllowAll`] validator preserves that behavior exactly. [`ReadOnly`]
//! shows how a stricter policy slots in without changing the pipeline
//! contract: it rejects anything that is not classified as a read.

use sqlparser::ast::Statement;
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;
use std::fmt;

use crate::error::{AskError, Result};

/// Safety level classification for SQL statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafetyLevel {
    /// Read-only statements (SELECT, EXPLAIN, SHOW).
    Safe,
    /// Data modification statements (INSERT, UPDATE, MERGE).
    Mutating,
    /// Potentially destructive statements (DELETE, DROP, TRUNCATE, ALTER,
    /// CREATE, GRANT, REVOKE), and anything that cannot be parsed.
    Destructive,
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe"),
            Self::Mutating => write!(f, "Mutating"),
            Self::Destructive => write!(f, "Destructive"),
        }
    }
}

/// The kind of SQL statement detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Drop,
    Truncate,
    Alter,
    Create,
    Explain,
    Show,
    /// Statement kind could not be determined.
    Unknown,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select => write!(f, "SELECT"),
            Self::Insert => write!(f, "INSERT"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
            Self::Drop => write!(f, "DROP"),
            Self::Truncate => write!(f, "TRUNCATE"),
            Self::Alter => write!(f, "ALTER"),
            Self::Create => write!(f, "CREATE"),
            Self::Explain => write!(f, "EXPLAIN"),
            Self::Show => write!(f, "SHOW"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Result of classifying a SQL string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// The determined safety level.
    pub level: SafetyLevel,
    /// The kind of statement detected (for multi-statement input, the most
    /// dangerous one).
    pub kind: StatementKind,
}

/// Classifies a SQL string by parsing it with the PostgreSQL dialect.
///
/// Unparseable input is classified as destructive/unknown: the executor
/// will still happily run it, so the classification errs on the loud side.
pub fn classify_sql(sql: &str) -> Classification {
    let statements = match Parser::parse_sql(&PostgreSqlDialect {}, sql) {
        Ok(statements) if !statements.is_empty() => statements,
        _ => {
            return Classification {
                level: SafetyLevel::Destructive,
                kind: StatementKind::Unknown,
            }
        }
    };

    let mut max = Classification {
        level: SafetyLevel::Safe,
        kind: StatementKind::Select,
    };

    for statement in &statements {
        let classification = classify_statement(statement);
        if level_priority(classification.level) > level_priority(max.level) {
            max = classification;
        }
    }

    max
}

/// Returns a priority value for safety levels (higher = more dangerous).
fn level_priority(level: SafetyLevel) -> u8 {
    match level {
        SafetyLevel::Safe => 0,
        SafetyLevel::Mutating => 1,
        SafetyLevel::Destructive => 2,
    }
}

/// Classifies a single parsed statement.
fn classify_statement(statement: &Statement) -> Classification {
    let (level, kind) = match statement {
        Statement::Query(_) => (SafetyLevel::Safe, StatementKind::Select),
        Statement::Explain { analyze, .. } => {
            if *analyze {
                // EXPLAIN ANALYZE executes the statement
                (SafetyLevel::Mutating, StatementKind::Explain)
            } else {
                (SafetyLevel::Safe, StatementKind::Explain)
            }
        }
        Statement::ShowVariable { .. }
        | Statement::ShowTables { .. }
        | Statement::ShowColumns { .. }
        | Statement::ShowCreate { .. } => (SafetyLevel::Safe, StatementKind::Show),

        Statement::Insert(_) => (SafetyLevel::Mutating, StatementKind::Insert),
        Statement::Update { .. } => (SafetyLevel::Mutating, StatementKind::Update),
        Statement::Merge { .. } => (SafetyLevel::Mutating, StatementKind::Unknown),

        Statement::Delete(_) => (SafetyLevel::Destructive, StatementKind::Delete),
        Statement::Drop { .. } => (SafetyLevel::Destructive, StatementKind::Drop),
        Statement::Truncate { .. } => (SafetyLevel::Destructive, StatementKind::Truncate),
        Statement::AlterTable { .. }
        | Statement::AlterIndex { .. }
        | Statement::AlterView { .. }
        | Statement::AlterRole { .. } => (SafetyLevel::Destructive, StatementKind::Alter),
        Statement::CreateTable { .. }
        | Statement::CreateIndex { .. }
        | Statement::CreateView { .. }
        | Statement::CreateSchema { .. }
        | Statement::CreateDatabase { .. } => (SafetyLevel::Destructive, StatementKind::Create),

        // Conservative default: treat unknown statements as destructive
        _ => (SafetyLevel::Destructive, StatementKind::Unknown),
    };

    Classification { level, kind }
}

/// Extension point between generation and execution.
///
/// `validate` runs on the generated SQL before it reaches the database.
/// Returning an error stops the pipeline with a query error; returning Ok
/// lets the text through unchanged.
pub trait QueryValidator: Send + Sync {
    /// Validates the given SQL text, rejecting it with an error if the
    /// policy does not allow it.
    fn validate(&self, sql: &str) -> Result<()>;
}

/// Pass-through validator: every statement is allowed.
///
/// This is the default, matching the pipeline's contract of executing the
/// generated text verbatim, destructive statements included.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl QueryValidator for AllowAll {
    fn validate(&self, _sql: &str) -> Result<()> {
        Ok(())
    }
}

/// Read-only validator: rejects anything not classified as safe.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOnly;

impl QueryValidator for ReadOnly {
    fn validate(&self, sql: &str) -> Result<()> {
        let classification = classify_sql(sql);
        match classification.level {
            SafetyLevel::Safe => Ok(()),
            SafetyLevel::Mutating | SafetyLevel::Destructive => Err(AskError::query(format!(
                "Rejected {} statement: read-only mode allows SELECT-style queries only",
                classification.kind
            ))),
        }
    }
}
