//! Database abstraction layer for askpg.
//!
//! Provides a trait-based interface for query execution, allowing the real
//! PostgreSQL client and test doubles to be used interchangeably.

mod mock;
mod postgres;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient};
pub use postgres::PostgresClient;
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Creates a database client for the given connection parameters.
///
/// Construction is cheap: no connection is established until a query runs.
pub fn create_client(config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>> {
    let client = PostgresClient::new(config)?;
    Ok(Box::new(client))
}

/// Trait defining the interface for database clients.
///
/// Implementations must be thread-safe (Send + Sync) to support async use.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Executes a SQL statement verbatim and returns the fetched results.
    ///
    /// Each call covers the full connection lifecycle: the statement is
    /// sent exactly as given, all rows are fetched, and any connection
    /// opened for the call is released before this returns, whether the
    /// statement succeeded or not.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;
}

// Shared handles delegate, so callers can keep a reference to a test double
// after handing it to the pipeline.
#[async_trait]
impl<T: DatabaseClient + ?Sized> DatabaseClient for std::sync::Arc<T> {
    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        (**self).execute_query(sql).await
    }
}
