//! AI provider configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::AiError;

/// Supported AI backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AiProvider {
    OpenAi,
    Anthropic,
    Gemini,
    Groq,
    DeepSeek,
    Grok,
    HuggingFace,
    Ollama,
}

impl AiProvider {
    pub const ALL: [AiProvider; 8] = [
        AiProvider::OpenAi,
        AiProvider::Gemini,
        AiProvider::Anthropic,
        AiProvider::Groq,
        AiProvider::DeepSeek,
        AiProvider::Grok,
        AiProvider::HuggingFace,
        AiProvider::Ollama,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            AiProvider::OpenAi => "openai",
            AiProvider::Anthropic => "anthropic",
            AiProvider::Gemini => "gemini",
            AiProvider::Groq => "groq",
            AiProvider::DeepSeek => "deepseek",
            AiProvider::Grok => "grok",
            AiProvider::HuggingFace => "huggingface",
            AiProvider::Ollama => "ollama",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            AiProvider::OpenAi => "gpt-4o-mini",
            AiProvider::Anthropic => "claude-3-haiku-20240307",
            AiProvider::Gemini => "gemini-2.0-flash",
            AiProvider::Groq => "llama-3.1-70b-versatile",
            AiProvider::DeepSeek => "deepseek-chat",
            AiProvider::Grok => "grok-beta",
            AiProvider::HuggingFace => "meta-llama/Meta-Llama-3-8B-Instruct",
            AiProvider::Ollama => "llama3.2",
        }
    }

    pub fn default_api_base(&self) -> &'static str {
        match self {
            AiProvider::OpenAi => "https://api.openai.com/v1",
            AiProvider::Anthropic => "https://api.anthropic.com",
            AiProvider::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
            AiProvider::Groq => "https://api.groq.com/openai/v1",
            AiProvider::DeepSeek => "https://api.deepseek.com/v1",
            AiProvider::Grok => "https://api.x.ai/v1",
            AiProvider::HuggingFace => "https://router.huggingface.co/v1",
            AiProvider::Ollama => "http://localhost:11434",
        }
    }

    /// Environment variable holding the API key. `None` for keyless providers.
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            AiProvider::OpenAi => Some("OPENAI_API_KEY"),
            AiProvider::Anthropic => Some("ANTHROPIC_API_KEY"),
            AiProvider::Gemini => Some("GOOGLE_API_KEY"),
            AiProvider::Groq => Some("GROQ_API_KEY"),
            AiProvider::DeepSeek => Some("DEEPSEEK_API_KEY"),
            AiProvider::Grok => Some("XAI_API_KEY"),
            AiProvider::HuggingFace => Some("HUGGINGFACE_API_KEY"),
            AiProvider::Ollama => None,
        }
    }

    /// Hint shown when the provider cannot be used.
    pub fn setup_hint(&self) -> String {
        match self.api_key_env() {
            Some(var) => format!("Please set {} environment variable.", var),
            None => "Please start Ollama with 'ollama serve'.".to_string(),
        }
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AiProvider {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(AiProvider::OpenAi),
            "anthropic" | "claude" => Ok(AiProvider::Anthropic),
            "gemini" | "google" => Ok(AiProvider::Gemini),
            "groq" => Ok(AiProvider::Groq),
            "deepseek" => Ok(AiProvider::DeepSeek),
            "grok" | "xai" => Ok(AiProvider::Grok),
            "huggingface" | "hf" => Ok(AiProvider::HuggingFace),
            "ollama" => Ok(AiProvider::Ollama),
            _ => Err(AiError::UnknownProvider(s.to_string())),
        }
    }
}

/// `[ai]` configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Provider id or alias (`openai`, `claude`, `hf`, ...).
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Model name. Defaults per provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// API key. Falls back to the provider's environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom API base URL (for proxies or self-hosted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_tokens() -> u32 {
    150
}

fn default_temperature() -> f32 {
    0.3
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            api_key: None,
            api_base: None,
            timeout_secs: default_timeout(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl AiConfig {
    pub fn provider(&self) -> Result<AiProvider, AiError> {
        self.provider.parse()
    }

    /// Configured key, else the provider's environment variable.
    pub fn resolve_api_key(&self, provider: AiProvider) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| {
                provider
                    .api_key_env()
                    .and_then(|var| std::env::var(var).ok())
                    .filter(|k| !k.is_empty())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("openai", AiProvider::OpenAi)]
    #[test_case("Claude", AiProvider::Anthropic)]
    #[test_case("google", AiProvider::Gemini)]
    #[test_case("xai", AiProvider::Grok)]
    #[test_case(" hf ", AiProvider::HuggingFace)]
    #[test_case("ollama", AiProvider::Ollama)]
    fn test_provider_aliases(id: &str, expected: AiProvider) {
        assert_eq!(id.parse::<AiProvider>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_provider() {
        assert!(matches!(
            "skynet".parse::<AiProvider>(),
            Err(AiError::UnknownProvider(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.provider().unwrap(), AiProvider::OpenAi);
        assert_eq!(config.max_tokens, 150);
        assert_eq!(config.temperature, 0.3);
        assert_eq!(AiProvider::Ollama.default_model(), "llama3.2");
        assert!(AiProvider::Ollama.api_key_env().is_none());
    }

    #[test]
    fn test_explicit_key_wins() {
        let config = AiConfig {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_api_key(AiProvider::OpenAi),
            Some("sk-test".to_string())
        );
        assert_eq!(config.resolve_api_key(AiProvider::Ollama), Some("sk-test".to_string()));
    }
}
