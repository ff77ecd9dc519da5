use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment prefix for overrides, e.g. `DORKFORGE_SERVER_PORT`.
const ENV_PREFIX: &str = "DORKFORGE_";

/// Top-level sections; the first `_` after one of these separates it from the key.
const SECTIONS: &[&str] = &["server", "templates", "optimizer", "generation", "ai"];

/// Map an unprefixed env key onto its config path.
///
/// Only the section boundary becomes a `.`, so keys that contain `_` survive:
/// `generation_default_engine` is `generation.default_engine`. Keys outside
/// a known section (like `config`, which names the file) map to `None`.
fn env_key_path(key: &str) -> Option<String> {
    let key = key.to_ascii_lowercase();
    let (section, rest) = key.split_once('_')?;
    if !SECTIONS.contains(&section) || rest.is_empty() {
        return None;
    }
    Some(format!("{}.{}", section, rest))
}

fn env_overrides() -> Env {
    Env::prefixed(ENV_PREFIX)
        .filter(|key| env_key_path(key.as_str()).is_some())
        .map(|key| {
            env_key_path(key.as_str())
                .unwrap_or_else(|| key.as_str().to_string())
                .into()
        })
}

/// Load `path` and apply `DORKFORGE_*` overrides on top.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    Figment::new()
        .merge(Toml::file(path))
        .merge(env_overrides())
        .extract()
        .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))
}

/// Parse a config from TOML text without consulting the environment.
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
