//! askpg - ask your PostgreSQL database questions in plain language.

mod cli;
mod logging;
mod tui;

use askpg::assistant::QueryAssistant;
use askpg::config::{Config, ConnectionConfig, LlmSettings, Settings};
use askpg::error::{AskError, Result};
use cli::Cli;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load .env before anything reads DB_* or GOOGLE_API_KEY
    dotenvy::dotenv().ok();

    logging::init_file_logging();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let connection = resolve_connection(&cli, &config)?;
    let llm = resolve_llm(&cli, &config);
    info!("Connection: {}", connection.display_string());
    info!("LLM provider: {} ({})", llm.provider, llm.model);

    let settings = Settings::new(connection, llm);
    let label = settings.connection.display_string();
    let assistant = QueryAssistant::from_settings(&settings)?;

    tui::run(assistant, &label).await
}

/// Resolves the final connection configuration.
///
/// Precedence: CLI arguments, then the named connection from the config
/// file, then the default connection, with DB_* environment variables
/// filling any remaining gaps.
fn resolve_connection(cli: &Cli, config: &Config) -> Result<ConnectionConfig> {
    let mut connection = cli.to_connection_config()?;

    if connection.is_none() {
        if let Some(name) = cli.connection_name() {
            connection = config.get_connection(Some(name)).cloned();
            if connection.is_none() {
                return Err(AskError::config(format!(
                    "Connection '{}' not found in config file",
                    name
                )));
            }
        }
    }

    if connection.is_none() {
        connection = config.get_connection(None).cloned();
    }

    let mut connection = connection.unwrap_or_default();
    connection.apply_env_defaults();

    if connection.database.is_none() {
        return Err(AskError::config(
            "No database configured. Pass a connection string, use --database, or set DB_NAME.",
        ));
    }

    Ok(connection)
}

/// Resolves the LLM settings from CLI arguments and the config file.
fn resolve_llm(cli: &Cli, config: &Config) -> LlmSettings {
    let mut llm = config.llm.clone();

    if let Some(provider) = &cli.llm {
        // Switching provider without naming a model gets that provider's
        // default model instead of the previous provider's
        if *provider != llm.provider && cli.model.is_none() {
            llm.model = default_model_for(provider);
        }
        llm.provider = provider.clone();
    }

    if let Some(model) = &cli.model {
        llm.model = model.clone();
    }

    llm
}

/// Returns the default model name for a provider.
fn default_model_for(provider: &str) -> String {
    match provider {
        "ollama" => "llama3.2:3b".to_string(),
        "mock" => "mock".to_string(),
        _ => "gemini-pro".to_string(),
    }
}
