//! Mock LLM client for testing.
//!
//! Provides deterministic responses based on input patterns. Always returns
//! a string for any prompt, including an empty one.

use async_trait::async_trait;

use crate::error::Result;
use crate::llm::LlmClient;

/// Mock LLM client that returns canned responses based on input patterns.
///
/// Used for unit testing without making real API calls.
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    /// Custom response mappings (pattern -> response).
    custom_responses: Vec<(String, String)>,
}

impl MockLlmClient {
    /// Creates a new mock client with default responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a custom response mapping.
    ///
    /// When the prompt contains `pattern`, the mock will return `response`.
    pub fn with_response(
        mut self,
        pattern: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.custom_responses
            .push((pattern.into(), response.into()));
        self
    }

    /// Extracts the question from a filled prompt template.
    ///
    /// The template embeds worked examples whose text would otherwise match
    /// the default patterns, so matching happens against the question line
    /// alone. Prompts without a question line are matched whole.
    fn extract_question(prompt: &str) -> &str {
        prompt
            .lines()
            .find_map(|line| line.strip_prefix("Current Question:"))
            .map(str::trim)
            .unwrap_or(prompt)
    }

    /// Generates a mock response based on the prompt.
    fn mock_response(&self, prompt: &str) -> String {
        let prompt_lower = Self::extract_question(prompt).to_lowercase();

        // Check custom responses first
        for (pattern, response) in &self.custom_responses {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return response.clone();
            }
        }

        // Default pattern matching
        if prompt_lower.contains("how many employees joined yesterday") {
            return "```sql\nSELECT COUNT(*) FROM employees WHERE join_date = CURRENT_DATE - INTERVAL '1 day';\n```".to_string();
        }

        if prompt_lower.contains("departments with most employees") {
            return "```sql\nSELECT department, COUNT(*) AS employee_count\nFROM employees\nGROUP BY department\nORDER BY employee_count DESC\nLIMIT 5;\n```".to_string();
        }

        if prompt_lower.contains("count") && prompt_lower.contains("employees") {
            return "```sql\nSELECT COUNT(*) FROM employees;\n```".to_string();
        }

        if prompt_lower.contains("products") && prompt_lower.contains("sales") {
            return "```sql\nSELECT product, quantity FROM sales;\n```".to_string();
        }

        if prompt_lower.contains("all employees") || prompt_lower.contains("show employees") {
            return "```sql\nSELECT * FROM employees;\n```".to_string();
        }

        if prompt_lower.contains("delete") && prompt_lower.contains("employees") {
            return "```sql\nDELETE FROM employees WHERE id = 1;\n```".to_string();
        }

        "I don't understand that question. Could you please rephrase it?".to_string()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(self.mock_response(prompt))
    }
}
