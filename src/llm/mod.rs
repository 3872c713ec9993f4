//! Generative backend integration for askpg.
//!
//! Provides the trait and implementations for turning a prompt string into
//! a text completion. The pipeline is single-shot: one prompt in, one
//! response out, no conversation state.

pub mod gemini;
pub mod mock;
pub mod ollama;
pub mod parser;
pub mod prompt;

pub use gemini::{GeminiClient, GeminiConfig};
pub use mock::MockLlmClient;
pub use ollama::{OllamaClient, OllamaConfig};
pub use parser::extract_sql;
pub use prompt::build_prompt;

use async_trait::async_trait;
use std::str::FromStr;

use crate::config::LlmSettings;
use crate::error::{AskError, Result};

/// Trait for LLM clients that can generate completions.
///
/// Implementations must be thread-safe (Send + Sync) to support async operations.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given prompt.
    ///
    /// Returns the complete response as a single string.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    /// Hosted Gemini model (requires GOOGLE_API_KEY).
    #[default]
    Gemini,
    /// Local model served by Ollama.
    Ollama,
    /// Mock client for testing (no API key required).
    Mock,
}

impl LlmProvider {
    /// Returns the provider as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Ollama => "ollama",
            Self::Mock => "mock",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "ollama" => Ok(Self::Ollama),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown LLM provider: {}", s)),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Creates an LLM client for the given settings.
///
/// API keys are resolved from the environment once, here:
/// - Gemini requires `GOOGLE_API_KEY`.
/// - Ollama reads `OLLAMA_URL` (defaults to the local instance).
pub fn create_client(settings: &LlmSettings) -> Result<Box<dyn LlmClient>> {
    let provider = settings
        .provider
        .parse::<LlmProvider>()
        .map_err(AskError::config)?;

    match provider {
        LlmProvider::Gemini => {
            let api_key = std::env::var("GOOGLE_API_KEY").map_err(|_| {
                AskError::llm("No API key configured. Set GOOGLE_API_KEY in the environment.")
            })?;
            Ok(Box::new(GeminiClient::new(GeminiConfig::new(
                api_key,
                settings.model.clone(),
            ))?))
        }
        LlmProvider::Ollama => {
            let base_url = std::env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string());
            Ok(Box::new(OllamaClient::new(
                OllamaConfig::new(settings.model.clone()).with_url(base_url),
            )?))
        }
        LlmProvider::Mock => Ok(Box::new(MockLlmClient::new())),
    }
}
