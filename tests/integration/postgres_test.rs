//! Query execution tests against a live PostgreSQL server.
//!
//! These tests require a running database. Set DATABASE_URL to run them;
//! they skip silently otherwise.

use askpg::config::ConnectionConfig;
use askpg::db::{DatabaseClient, PostgresClient, Value};
use askpg::error::AskError;

/// Helper to get the test database URL from the environment.
fn get_test_database_url() -> Option<String> {
    std::env::var("DATABASE_URL").ok()
}

/// Helper to create a test client.
fn get_test_client() -> Option<PostgresClient> {
    let url = get_test_database_url()?;
    let config = ConnectionConfig::from_connection_string(&url).ok()?;
    PostgresClient::new(&config).ok()
}

#[tokio::test]
async fn test_execute_simple_select() {
    let Some(client) = get_test_client() else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let result = client
        .execute_query("SELECT 1 as num, 'hello' as greeting")
        .await
        .unwrap();

    assert_eq!(result.columns.len(), 2);
    assert_eq!(result.columns[0].name, "num");
    assert_eq!(result.columns[1].name, "greeting");
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.row_count, 1);
    assert_eq!(result.rows[0][0], Value::Int(1));
}

#[tokio::test]
async fn test_execute_invalid_sql_errors() {
    let Some(client) = get_test_client() else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let result = client
        .execute_query("SELECT * FROM nonexistent_table_xyz")
        .await;
    assert!(result.is_err());

    let error = result.unwrap_err();
    assert!(
        error.to_string().contains("nonexistent_table_xyz")
            || error.to_string().contains("does not exist")
    );
}

#[tokio::test]
async fn test_connection_reusable_after_failed_statement() {
    // Each call opens and closes its own connection, so a failed statement
    // must not poison later calls.
    let Some(client) = get_test_client() else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let _ = client.execute_query("SELECT * FROM nope_xyz").await;

    let result = client.execute_query("SELECT 2 as two").await.unwrap();
    assert_eq!(result.rows[0][0], Value::Int(2));
}

#[tokio::test]
async fn test_idempotent_select() {
    let Some(client) = get_test_client() else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let first = client.execute_query("SELECT 1 as n").await.unwrap();
    let second = client.execute_query("SELECT 1 as n").await.unwrap();

    assert_eq!(first.columns, second.columns);
    assert_eq!(first.rows, second.rows);
}

#[tokio::test]
async fn test_empty_result_set() {
    let Some(client) = get_test_client() else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let result = client
        .execute_query("SELECT 1 as n WHERE false")
        .await
        .unwrap();

    assert_eq!(result.row_count, 0);
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_connection_error_message() {
    let config = ConnectionConfig {
        host: Some("nonexistent.invalid".to_string()),
        port: 5432,
        database: Some("testdb".to_string()),
        user: Some("testuser".to_string()),
        password: Some("testpass".to_string()),
    };

    let client = PostgresClient::new(&config).unwrap();
    let result = client.execute_query("SELECT 1").await;

    assert!(result.is_err());
    assert!(matches!(result.unwrap_err(), AskError::Connection(_)));
}
