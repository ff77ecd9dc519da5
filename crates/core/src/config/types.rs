use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::ai::AiConfig;
use crate::optimizer::OptimizerConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub ai: Option<AiConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Where category TOML files live
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TemplatesConfig {
    #[serde(default = "default_templates_dir")]
    pub dir: PathBuf,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: default_templates_dir(),
        }
    }
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

/// Defaults applied to generation requests
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// Engine id used when a request names none
    #[serde(default = "default_engine")]
    pub default_engine: String,
    /// Drop rendered dorks that fail validation
    #[serde(default = "default_validate")]
    pub validate: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_engine: default_engine(),
            validate: default_validate(),
        }
    }
}

fn default_engine() -> String {
    "google".to_string()
}

fn default_validate() -> bool {
    true
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub templates: TemplatesConfig,
    pub optimizer: OptimizerConfig,
    pub generation: GenerationConfig,
    pub ai: Option<SanitizedAiConfig>,
}

/// Sanitized AI config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAiConfig {
    pub provider: String,
    pub model: Option<String>,
    pub api_base: Option<String>,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
    pub api_key_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            templates: config.templates.clone(),
            optimizer: config.optimizer,
            generation: config.generation.clone(),
            ai: config.ai.as_ref().map(|ai| SanitizedAiConfig {
                provider: ai.provider.clone(),
                model: ai.model.clone(),
                api_base: ai.api_base.clone(),
                timeout_secs: ai.timeout_secs,
                max_tokens: ai.max_tokens,
                temperature: ai.temperature,
                api_key_configured: ai
                    .provider()
                    .ok()
                    .and_then(|p| ai.resolve_api_key(p))
                    .is_some(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.templates.dir, PathBuf::from("templates"));
        assert_eq!(config.optimizer, OptimizerConfig::default());
        assert!(config.generation.validate);
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9090

[templates]
dir = "/srv/dorks"

[generation]
default_engine = "bing"
validate = false

[ai]
provider = "anthropic"
model = "claude-3-haiku-20240307"
api_key = "sk-test"
temperature = 0.7
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.templates.dir, PathBuf::from("/srv/dorks"));
        assert_eq!(config.generation.default_engine, "bing");
        assert!(!config.generation.validate);

        let ai = config.ai.unwrap();
        assert_eq!(ai.provider, "anthropic");
        assert_eq!(ai.timeout_secs, 30);
        assert!((ai.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_sanitized_config_hides_key() {
        let toml = r#"
[ai]
provider = "openai"
api_key = "sk-secret-key"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let sanitized = SanitizedConfig::from(&config);

        let ai = sanitized.ai.as_ref().unwrap();
        assert!(ai.api_key_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("sk-secret-key"));
        assert!(json.contains("\"api_key_configured\":true"));
    }

    #[test]
    fn test_sanitized_config_without_ai() {
        let sanitized = SanitizedConfig::from(&Config::default());
        assert!(sanitized.ai.is_none());
    }
}
