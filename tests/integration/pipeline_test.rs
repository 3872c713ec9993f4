//! End-to-end pipeline tests against mock backends.
//!
//! Covers the question-to-result flow: generation, verbatim execution,
//! the no-result sentinel on failure, and the validator extension point.

use pretty_assertions::assert_eq;
use std::sync::Arc;

use askpg::assistant::QueryAssistant;
use askpg::db::{ColumnInfo, FailingDatabaseClient, MockDatabaseClient, QueryResult, Value};
use askpg::llm::MockLlmClient;
use askpg::safety::ReadOnly;

/// Builds an assistant over the given database double with default mock LLM.
fn assistant_with_db(db: Box<dyn askpg::db::DatabaseClient>) -> QueryAssistant {
    QueryAssistant::new(Box::new(MockLlmClient::new()), db)
}

#[tokio::test]
async fn test_generation_returns_string_for_any_question() {
    let assistant = assistant_with_db(Box::new(MockDatabaseClient::new()));

    for question in ["How many employees joined yesterday?", "", "garbage ???"] {
        let sql = assistant.generate_sql(question).await.unwrap();
        assert!(!sql.is_empty(), "question {question:?} produced no string");
    }
}

#[tokio::test]
async fn test_count_question_end_to_end() {
    // Scenario: "How many employees joined yesterday?" against a seeded
    // table with 3 matching rows.
    let seeded = QueryResult::with_data(
        vec![ColumnInfo::new("count", "int8")],
        vec![vec![Value::Int(3)]],
    );
    let db = MockDatabaseClient::new().with_result("count(*)", seeded);
    let assistant = assistant_with_db(Box::new(db));

    let outcome = assistant
        .ask("How many employees joined yesterday?")
        .await
        .unwrap();

    assert!(outcome.sql.contains("SELECT COUNT(*)"));
    assert!(outcome.error.is_none());

    let result = outcome.result.unwrap();
    let column_names: Vec<_> = result.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(column_names, vec!["count"]);
    assert_eq!(result.rows, vec![vec![Value::Int(3)]]);
    assert_eq!(result.row_count, 1);
}

#[tokio::test]
async fn test_executor_returns_all_projected_rows() {
    let seeded = QueryResult::with_data(
        vec![
            ColumnInfo::new("product", "text"),
            ColumnInfo::new("quantity", "int4"),
        ],
        vec![
            vec![Value::from("widget"), Value::Int(12)],
            vec![Value::from("gadget"), Value::Int(7)],
            vec![Value::from("sprocket"), Value::Int(3)],
        ],
    );
    let db = MockDatabaseClient::new().with_result("from sales", seeded);
    let assistant = assistant_with_db(Box::new(db));

    let result = assistant
        .execute("SELECT product, quantity FROM sales")
        .await
        .unwrap();

    assert_eq!(result.row_count, 3);
    assert_eq!(result.columns.len(), 2);
    assert_eq!(result.columns[0].name, "product");
    assert_eq!(result.columns[1].name, "quantity");
}

#[tokio::test]
async fn test_invalid_sql_degrades_to_sentinel() {
    let db = FailingDatabaseClient::with_message("syntax error at or near \"garbage\"");
    let assistant = assistant_with_db(Box::new(db));

    let outcome = assistant.ask("show me all employees").await.unwrap();

    // The sentinel: no result, message only. No panic past the boundary.
    assert!(outcome.result.is_none());
    assert!(outcome.error.unwrap().contains("syntax error"));
}

#[tokio::test]
async fn test_empty_question_end_to_end() {
    // An empty question still flows through: the backend returns some
    // string and the executor either runs it or degrades to the sentinel.
    let assistant = assistant_with_db(Box::new(MockDatabaseClient::new()));

    let outcome = assistant.ask("").await.unwrap();

    assert!(!outcome.sql.is_empty());
    assert!(outcome.result.is_some() || outcome.error.is_some());
}

#[tokio::test]
async fn test_idempotent_read_query() {
    let seeded = QueryResult::with_data(
        vec![ColumnInfo::new("count", "int8")],
        vec![vec![Value::Int(3)]],
    );
    let db = MockDatabaseClient::new().with_result("count(*)", seeded);
    let assistant = assistant_with_db(Box::new(db));

    let first = assistant
        .ask("How many employees joined yesterday?")
        .await
        .unwrap();
    let second = assistant
        .ask("How many employees joined yesterday?")
        .await
        .unwrap();

    assert_eq!(first.sql, second.sql);

    let (first, second) = (first.result.unwrap(), second.result.unwrap());
    assert_eq!(first.columns, second.columns);
    assert_eq!(first.rows, second.rows);
}

#[tokio::test]
async fn test_destructive_statement_executes_verbatim() {
    // There is no guardrail by default: a DROP generated by the backend
    // reaches the database byte-for-byte.
    let db = Arc::new(MockDatabaseClient::new());
    let llm = MockLlmClient::new()
        .with_response("remove the employees table", "```sql\nDROP TABLE employees;\n```");
    let assistant = QueryAssistant::new(Box::new(llm), Box::new(Arc::clone(&db)));

    let outcome = assistant.ask("remove the employees table").await.unwrap();

    assert_eq!(outcome.sql, "DROP TABLE employees;");
    assert_eq!(db.executed_statements(), vec!["DROP TABLE employees;"]);
    assert!(outcome.error.is_none());
}

#[tokio::test]
async fn test_read_only_validator_blocks_destructive_statement() {
    // The extension point: the same DROP is rejected before it reaches the
    // database when a stricter validator is plugged in.
    let db = Arc::new(MockDatabaseClient::new());
    let llm = MockLlmClient::new()
        .with_response("remove the employees table", "```sql\nDROP TABLE employees;\n```");
    let assistant = QueryAssistant::new(Box::new(llm), Box::new(Arc::clone(&db)))
        .with_validator(Box::new(ReadOnly));

    let outcome = assistant.ask("remove the employees table").await.unwrap();

    assert!(outcome.result.is_none());
    assert!(outcome.error.unwrap().contains("read-only"));
    assert!(db.executed_statements().is_empty());
}

#[tokio::test]
async fn test_non_sql_response_still_reaches_database() {
    // The backend may answer with prose instead of SQL; nothing checks.
    // The prose is sent to the database, which rejects it, and the
    // pipeline degrades to the sentinel.
    let db = FailingDatabaseClient::with_message("syntax error at or near \"I\"");
    let llm = MockLlmClient::new();
    let assistant = QueryAssistant::new(Box::new(llm), Box::new(db));

    let outcome = assistant.ask("what is the meaning of life?").await.unwrap();

    assert!(outcome.sql.contains("don't understand"));
    assert!(outcome.result.is_none());
    assert!(outcome.error.is_some());
}
