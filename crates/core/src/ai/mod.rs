//! AI-assisted dork generation.
//!
//! Provider clients speak their vendor's HTTP API; [`DorkGenerator`] wraps
//! one of them with the shared prompts and output clean-up. Generated dorks
//! are never trusted: run [`detect_hallucination`] and the validator on them.

mod config;
mod detector;
mod generator;
mod llm;
mod prompt;

pub use config::{AiConfig, AiProvider};
pub use detector::{auto_fix_common_issues, detect_hallucination};
pub use generator::{DorkGenerator, LlmDorkGenerator};
pub use llm::{
    AnthropicClient, CompletionRequest, CompletionResponse, LlmClient, LlmUsage, OllamaClient,
    OpenAiCompatClient,
};
pub use prompt::{build_user_prompt, GenerationContext, SYSTEM_PROMPT};

use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("AI provider not configured")]
    NotConfigured,

    #[error("Unknown AI provider: {0}. Supported providers: openai, gemini, anthropic, groq, deepseek, grok, huggingface, ollama")]
    UnknownProvider(String),

    #[error("AI provider returned an empty response")]
    EmptyResponse,
}

/// Build the generator described by `config`.
///
/// Keyed providers without a key are still constructed; they report
/// themselves unavailable and refuse to generate.
pub fn create_generator(config: &AiConfig) -> Result<Box<dyn DorkGenerator>, AiError> {
    let provider = config.provider()?;
    let model = config
        .model
        .clone()
        .unwrap_or_else(|| provider.default_model().to_string());
    let api_base = config
        .api_base
        .clone()
        .unwrap_or_else(|| provider.default_api_base().to_string());
    let timeout = Duration::from_secs(config.timeout_secs);
    let api_key = config.resolve_api_key(provider);

    if provider.api_key_env().is_some() && api_key.is_none() {
        warn!("{} selected but no API key found. {}", provider, provider.setup_hint());
    }

    let client: Box<dyn LlmClient> = match provider {
        AiProvider::Anthropic => Box::new(
            AnthropicClient::new(api_key, &model)
                .with_api_base(api_base)
                .with_timeout(timeout),
        ),
        AiProvider::Ollama => Box::new(
            OllamaClient::new(&model)
                .with_api_base(api_base)
                .with_timeout(timeout),
        ),
        AiProvider::OpenAi
        | AiProvider::Gemini
        | AiProvider::Groq
        | AiProvider::DeepSeek
        | AiProvider::Grok
        | AiProvider::HuggingFace => Box::new(
            OpenAiCompatClient::new(provider.id(), api_key, &model, api_base)
                .with_timeout(timeout),
        ),
    };

    info!("AI generator ready: {} ({})", provider, model);
    Ok(Box::new(
        LlmDorkGenerator::new(client)
            .with_max_tokens(config.max_tokens)
            .with_temperature(config.temperature),
    ))
}
