//! Cross-engine operator translation.
//!
//! Queries are written in the canonical (Google) dialect. Translation renames
//! operator names through a static table and leaves values, colons and every
//! other character untouched.

mod dialects;

pub use dialects::DialectEntry;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::grammar::TRANSLATABLE_OPERATOR;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("Unknown search engine: {0}")]
    UnknownEngine(String),
}

/// Supported search engines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Google,
    Bing,
    DuckDuckGo,
    Yahoo,
    Yandex,
    Baidu,
}

impl Engine {
    pub const ALL: [Engine; 6] = [
        Engine::Google,
        Engine::Bing,
        Engine::DuckDuckGo,
        Engine::Yahoo,
        Engine::Yandex,
        Engine::Baidu,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Engine::Google => "google",
            Engine::Bing => "bing",
            Engine::DuckDuckGo => "duckduckgo",
            Engine::Yahoo => "yahoo",
            Engine::Yandex => "yandex",
            Engine::Baidu => "baidu",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Engine::Google => "Google",
            Engine::Bing => "Bing",
            Engine::DuckDuckGo => "DuckDuckGo",
            Engine::Yahoo => "Yahoo",
            Engine::Yandex => "Yandex",
            Engine::Baidu => "Baidu",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Engine {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        Engine::ALL
            .into_iter()
            .find(|engine| engine.id() == id)
            .ok_or_else(|| TranslateError::UnknownEngine(s.to_string()))
    }
}

/// Engine id and display name, as listed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineInfo {
    pub id: &'static str,
    pub name: &'static str,
}

pub fn supported_engines() -> Vec<EngineInfo> {
    Engine::ALL
        .iter()
        .map(|engine| EngineInfo {
            id: engine.id(),
            name: engine.display_name(),
        })
        .collect()
}

/// Translate `query` into the dialect of the engine named `engine_id`.
///
/// The id is matched case-insensitively. Unknown ids and `google` return the
/// query unchanged.
pub fn translate(query: &str, engine_id: &str) -> String {
    match engine_id.parse::<Engine>() {
        Ok(engine) => translate_for(query, engine),
        Err(_) => {
            debug!("Unknown engine {:?}, leaving query untouched", engine_id);
            query.to_string()
        }
    }
}

/// Translate `query` into `engine`'s dialect.
pub fn translate_for(query: &str, engine: Engine) -> String {
    if query.is_empty() || engine == Engine::Google {
        return query.to_string();
    }

    TRANSLATABLE_OPERATOR
        .replace_all(query, |caps: &regex_lite::Captures<'_>| {
            let boundary = &caps[1];
            let name = caps[2].to_lowercase();
            match dialects::lookup(&name, engine) {
                Some(DialectEntry::Rename(target)) => format!("{}{}:", boundary, target),
                Some(DialectEntry::Keep) => format!("{}{}:", boundary, name),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
