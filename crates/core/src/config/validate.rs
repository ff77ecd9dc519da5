use super::{types::Config, ConfigError};
use crate::translator::Engine;

/// Validate configuration
///
/// Rejects port 0, zero optimizer budgets, an unknown default engine, an
/// unknown AI provider and a temperature outside `0.0..=2.0`.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.optimizer.max_terms == 0 || config.optimizer.max_chars == 0 {
        return Err(ConfigError::ValidationError(
            "optimizer budgets must be greater than 0".to_string(),
        ));
    }

    if config.generation.default_engine.parse::<Engine>().is_err() {
        return Err(ConfigError::ValidationError(format!(
            "generation.default_engine '{}' is not a supported engine",
            config.generation.default_engine
        )));
    }

    if let Some(ai) = &config.ai {
        ai.provider()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if !(0.0..=2.0).contains(&ai.temperature) {
            return Err(ConfigError::ValidationError(format!(
                "ai.temperature must be between 0.0 and 2.0, got {}",
                ai.temperature
            )));
        }
    }

    Ok(())
}
