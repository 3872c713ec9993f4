//! Response parsing for generative backend outputs.
//!
//! Models frequently wrap the statement in a markdown code fence even when
//! told not to. The fenced content is extracted when present; otherwise the
//! whitespace-trimmed raw response is passed through. There is no SQL
//! validation of any kind here.

/// Extracts the SQL text from a backend response.
///
/// Looks for a ```sql fence first, then a bare ``` fence; falls back to the
/// trimmed raw response. The returned string is treated as literal SQL by
/// the executor whether or not it is actually SQL.
pub fn extract_sql(response: &str) -> String {
    if let Some(sql) = extract_code_block(response, "sql") {
        return sql.trim().to_string();
    }

    if let Some(sql) = extract_code_block(response, "") {
        return sql.trim().to_string();
    }

    response.trim().to_string()
}

/// Extracts content from a markdown code block with the specified language.
///
/// Pass an empty string for `lang` to match blocks without a language
/// specifier.
fn extract_code_block(text: &str, lang: &str) -> Option<String> {
    let start_pattern = if lang.is_empty() {
        "```".to_string()
    } else {
        format!("```{}", lang)
    };

    // Find the start of the code block
    let start_idx = text.find(&start_pattern)?;

    // Find the newline after the opening fence
    let content_start = text[start_idx + start_pattern.len()..]
        .find('\n')
        .map(|i| start_idx + start_pattern.len() + i + 1)?;

    // For generic blocks, make sure it's not actually a language-specific block
    if lang.is_empty() {
        let after_fence = &text[start_idx + 3..content_start - 1];
        if !after_fence.trim().is_empty() {
            return None;
        }
    }

    // Find the closing fence
    let end_idx = text[content_start..].find("```")?;

    Some(text[content_start..content_start + end_idx].to_string())
}
