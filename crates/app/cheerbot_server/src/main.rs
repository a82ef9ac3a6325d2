//! Cheerbot API server binary.
//!
//! Builds the chat service once, then serves the REST API. A missing or
//! broken model configuration does not stop the server: chat answers with a
//! "not initialized" reply while health and encouragement keep working.

use std::time::Duration;

use cheerbot_api::config::{ApiConfig, DEFAULT_HOST, DEFAULT_PORT};
use cheerbot_core::chat::{ChatService, InitError};
use cheerbot_core::llm::config as model_defaults;
use cheerbot_core::llm::{LlmError, ModelConfig};
use clap::Parser;
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "cheerbot_server", about = "Cheerbot chat relay API server")]
struct Args {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Gemini API key. Without it the chat endpoint stays disabled.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model identifier.
    #[arg(long, env = "GEMINI_MODEL", default_value = model_defaults::DEFAULT_MODEL)]
    model: String,

    /// Maximum tokens the model may generate per reply.
    #[arg(long, env = "GEMINI_MAX_OUTPUT_TOKENS", default_value_t = model_defaults::DEFAULT_MAX_OUTPUT_TOKENS)]
    max_output_tokens: u32,

    /// Gemini API root.
    #[arg(long, env = "GEMINI_BASE_URL", default_value = model_defaults::DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-attempt timeout for model calls, in seconds.
    #[arg(long, env = "GEMINI_TIMEOUT_SECS", default_value_t = model_defaults::DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Extra attempts after a retryable model failure.
    #[arg(long, env = "GEMINI_MAX_RETRIES", default_value_t = model_defaults::DEFAULT_MAX_RETRIES)]
    max_retries: u32,
}

impl Args {
    fn model_config(&self) -> Result<ModelConfig, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LlmError::NotConfigured("GEMINI_API_KEY is not set".to_string()))?;

        Ok(ModelConfig::new(api_key)
            .with_model(&self.model)
            .with_max_output_tokens(self.max_output_tokens)
            .with_base_url(&self.base_url)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_retries(self.max_retries, model_defaults::DEFAULT_RETRY_BACKOFF))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("info,cheerbot_api=debug,cheerbot_core=debug")
                }),
        )
        .init();

    let args = Args::parse();
    let config = ApiConfig::new(&args.host, args.port);

    info!(
        version = cheerbot_core::version(),
        model = %args.model,
        bind_addr = %config.bind_addr,
        "starting cheerbot_server"
    );

    let chat = ChatService::initialize(|| {
        let model_config = args.model_config().map_err(InitError::from)?;
        ChatService::gemini(model_config)
    });
    if !chat.is_ready() {
        warn!("server will start but the chatbot will not answer until restarted with a valid configuration");
    }

    let app = cheerbot_api::router(cheerbot_api::AppState::new(chat));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    info!(addr = %local_addr, "REST API listening");
    info!(url = %format!("http://{local_addr}{}", cheerbot_api::HEALTH_PATH), "health check");
    info!(url = %format!("http://{local_addr}{}", cheerbot_api::CHAT_PATH), "chat endpoint");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn flags_build_model_config() {
        let args = Args::try_parse_from([
            "cheerbot_server",
            "--api-key",
            "k",
            "--model",
            "gemini-2.5-flash",
            "--max-output-tokens",
            "64",
            "--timeout-secs",
            "5",
            "--max-retries",
            "0",
        ])
        .unwrap();
        let config = args.model_config().unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.max_output_tokens, 64);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn blank_api_key_is_not_configured() {
        let args = Args::try_parse_from(["cheerbot_server", "--api-key", "  "]).unwrap();
        assert!(matches!(args.model_config(), Err(LlmError::NotConfigured(_))));
    }
}
