//! Mock database clients for testing.
//!
//! `MockDatabaseClient` returns scripted results and records every
//! statement it receives, so tests can assert exactly what text reached
//! the database. `FailingDatabaseClient` errors on every call.

use super::{ColumnInfo, DatabaseClient, QueryResult, Value};
use crate::error::{AskError, Result};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// A mock database client that returns predefined results.
#[derive(Debug, Default)]
pub struct MockDatabaseClient {
    /// Scripted response mappings (pattern -> result).
    responses: Vec<(String, QueryResult)>,
    /// Every statement passed to `execute_query`, verbatim.
    executed: Mutex<Vec<String>>,
}

impl MockDatabaseClient {
    /// Creates a new mock database client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a scripted result.
    ///
    /// When the executed SQL contains `pattern` (case-insensitive), the
    /// mock returns `result`.
    pub fn with_result(mut self, pattern: impl Into<String>, result: QueryResult) -> Self {
        self.responses.push((pattern.into(), result));
        self
    }

    /// Returns the statements executed so far, in order.
    pub fn executed_statements(&self) -> Vec<String> {
        self.executed.lock().expect("statement log poisoned").clone()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        self.executed
            .lock()
            .expect("statement log poisoned")
            .push(sql.to_string());

        let sql_lower = sql.to_lowercase();

        for (pattern, result) in &self.responses {
            if sql_lower.contains(&pattern.to_lowercase()) {
                return Ok(result.clone());
            }
        }

        if sql_lower.trim_start().starts_with("select") {
            // Unscripted SELECT: a single echo row
            let columns = vec![ColumnInfo::new("result", "text")];
            let rows = vec![vec![Value::String(format!("Mock result for: {}", sql))]];

            Ok(QueryResult::with_data(columns, rows).with_execution_time(Duration::from_millis(1)))
        } else {
            // Unscripted non-SELECT: empty result
            Ok(QueryResult::new().with_execution_time(Duration::from_millis(1)))
        }
    }
}

/// A database client that fails every call.
#[derive(Debug)]
pub struct FailingDatabaseClient {
    message: String,
}

impl FailingDatabaseClient {
    /// Creates a failing client with a default error message.
    pub fn new() -> Self {
        Self {
            message: "syntax error at or near \"nonsense\"".to_string(),
        }
    }

    /// Creates a failing client with the given error message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingDatabaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn execute_query(&self, _sql: &str) -> Result<QueryResult> {
        Err(AskError::query(self.message.clone()))
    }
}
