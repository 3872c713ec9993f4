//! The question-to-result pipeline.
//!
//! Wires the three stages together: build a prompt and generate SQL, run
//! the generated text through the validator and the database, and hand the
//! outcome to the caller for rendering. Each call is single-shot and
//! strictly sequential; nothing is cached between questions.

use tracing::{debug, error, info};

use crate::config::Settings;
use crate::db::{self, DatabaseClient, QueryResult};
use crate::error::Result;
use crate::llm::{self, build_prompt, extract_sql, LlmClient};
use crate::safety::{AllowAll, QueryValidator};

/// Outcome of one full pipeline run.
///
/// `result` is `None` whenever the database stage failed, with the message
/// in `error`. A query that legitimately returned zero rows produces
/// `Some` with an empty rowset; the failure sentinel and "no rows" are
/// otherwise indistinguishable to the presenter.
#[derive(Debug)]
pub struct AskOutcome {
    /// The generated SQL, exactly as sent to the database.
    pub sql: String,
    /// The fetched result, or None if the database stage failed.
    pub result: Option<QueryResult>,
    /// The database error message, if any.
    pub error: Option<String>,
}

/// The natural-language query assistant.
///
/// Owns one generative backend, one database client, and one validator for
/// its lifetime; all three are injectable for testing.
pub struct QueryAssistant {
    llm: Box<dyn LlmClient>,
    db: Box<dyn DatabaseClient>,
    validator: Box<dyn QueryValidator>,
}

impl QueryAssistant {
    /// Creates an assistant from explicit collaborators.
    ///
    /// The default validator is [`AllowAll`]: generated SQL is executed
    /// verbatim.
    pub fn new(llm: Box<dyn LlmClient>, db: Box<dyn DatabaseClient>) -> Self {
        Self {
            llm,
            db,
            validator: Box::new(AllowAll),
        }
    }

    /// Creates an assistant from loaded settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let llm = llm::create_client(&settings.llm)?;
        let db = db::create_client(&settings.connection)?;
        Ok(Self::new(llm, db))
    }

    /// Replaces the validator.
    pub fn with_validator(mut self, validator: Box<dyn QueryValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Prompt Builder stage: turns a question into a SQL string.
    ///
    /// The question is accepted unvalidated, empty included. A backend
    /// failure propagates to the caller; there is no fallback generation.
    pub async fn generate_sql(&self, question: &str) -> Result<String> {
        let prompt = build_prompt(question);
        debug!("Requesting SQL generation ({} chars of prompt)", prompt.len());

        let response = self.llm.generate(&prompt).await?;
        let sql = extract_sql(&response);

        info!("Generated SQL: {}", sql);
        Ok(sql)
    }

    /// Query Executor stage: runs the SQL text and fetches all rows.
    ///
    /// The text goes through the validator and then to the database
    /// unchanged. With the default validator that means verbatim execution
    /// of whatever the model produced.
    pub async fn execute(&self, sql: &str) -> Result<QueryResult> {
        self.validator.validate(sql)?;
        self.db.execute_query(sql).await
    }

    /// Runs the full pipeline for one question.
    ///
    /// Database failures are caught and degraded to the no-result sentinel
    /// so the caller can render an inline notice; LLM failures propagate.
    pub async fn ask(&self, question: &str) -> Result<AskOutcome> {
        let sql = self.generate_sql(question).await?;

        match self.execute(&sql).await {
            Ok(result) => Ok(AskOutcome {
                sql,
                result: Some(result),
                error: None,
            }),
            Err(e) => {
                error!("Query execution failed: {}", e);
                Ok(AskOutcome {
                    sql,
                    result: None,
                    error: Some(e.to_string()),
                })
            }
        }
    }
}
