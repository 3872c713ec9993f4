//! Prompt construction for SQL generation requests.
//!
//! The question is interpolated into a fixed instructional template with
//! worked example mappings. The question text is taken as-is: any string,
//! including an empty one, produces a prompt.

/// Instructional template for the SQL generator.
///
/// The guidelines are advisory text for the model only; nothing downstream
/// checks that the generated statement honors them.
const PROMPT_TEMPLATE: &str = r#"You are an expert SQL query generator specialized in PostgreSQL.
Your task is to convert natural language questions into precise PostgreSQL queries.

Guidelines:
- Always use parameterized queries to prevent SQL injection
- Focus on retrieving exactly what the user asked
- Generate only valid PostgreSQL SQL

Example Mappings:
1. "How many employees joined yesterday?"
   -> SELECT COUNT(*) FROM employees WHERE join_date = CURRENT_DATE - INTERVAL '1 day'

2. "Show me the departments with most employees"
   -> SELECT department, COUNT(*) AS employee_count
      FROM employees
      GROUP BY department
      ORDER BY employee_count DESC
      LIMIT 5

Current Question: {question}

Return the most appropriate PostgreSQL query, with no explanations."#;

/// Builds the generation prompt with the question injected.
pub fn build_prompt(question: &str) -> String {
    PROMPT_TEMPLATE.replace("{question}", question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_interpolates_question() {
        let prompt = build_prompt("How many employees joined yesterday?");

        assert!(prompt.contains("Current Question: How many employees joined yesterday?"));
        assert!(!prompt.contains("{question}"));
    }

    #[test]
    fn test_build_prompt_contains_guidelines_and_examples() {
        let prompt = build_prompt("anything");

        assert!(prompt.contains("Guidelines:"));
        assert!(prompt.contains("Example Mappings:"));
        assert!(prompt.contains("SELECT COUNT(*) FROM employees"));
        assert!(prompt.contains("PostgreSQL"));
    }

    #[test]
    fn test_build_prompt_accepts_empty_question() {
        let prompt = build_prompt("");

        assert!(prompt.contains("Current Question: \n"));
    }

    #[test]
    fn test_build_prompt_passes_question_unmodified() {
        // No escaping or sanitization of the question text
        let question = "show '; DROP TABLE employees; --";
        let prompt = build_prompt(question);

        assert!(prompt.contains(question));
    }
}
