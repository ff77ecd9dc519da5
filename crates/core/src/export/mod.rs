//! Export of generated dorks as text, JSON, Markdown or CSV.

mod csv_file;
mod json;
mod markdown;
mod text;

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

use crate::dork::Dork;
use crate::optimizer::DorkOptimizer;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unknown export format: {0}. Supported formats: txt, json, md, csv")]
    UnknownFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Text,
    Json,
    Markdown,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn export(&self, dorks: &[Dork], metadata: &ExportMetadata) -> Result<String, ExportError> {
        self.export_with(dorks, metadata, &DorkOptimizer::default())
    }

    /// Like [`ExportFormat::export`], combining Markdown queries with `optimizer`.
    pub fn export_with(
        &self,
        dorks: &[Dork],
        metadata: &ExportMetadata,
        optimizer: &DorkOptimizer,
    ) -> Result<String, ExportError> {
        match self {
            ExportFormat::Text => Ok(text::render(dorks, metadata)),
            ExportFormat::Json => json::render(dorks, metadata),
            ExportFormat::Markdown => Ok(markdown::render(dorks, metadata, optimizer)),
            ExportFormat::Csv => csv_file::render(dorks, metadata),
        }
    }

    pub fn export_to_file(
        &self,
        dorks: &[Dork],
        metadata: &ExportMetadata,
        path: &Path,
    ) -> Result<(), ExportError> {
        let output = self.export(dorks, metadata)?;
        std::fs::write(path, output)?;
        info!("Exported {} dorks to {}", dorks.len(), path.display());
        Ok(())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Context written alongside the dorks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportMetadata {
    /// Defaults to the current local time.
    pub generated_at: Option<String>,
    pub domain: Option<String>,
    pub keyword: Option<String>,
    pub categories: Vec<String>,
    /// Precomputed combined query per category.
    pub concat_dorks: BTreeMap<String, String>,
}

impl ExportMetadata {
    pub(crate) fn timestamp(&self) -> String {
        self.generated_at
            .clone()
            .unwrap_or_else(|| Local::now().format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

/// Dorks grouped by category in first-seen order.
pub(crate) fn group_by_category(dorks: &[Dork]) -> Vec<(&str, Vec<&Dork>)> {
    let mut groups: Vec<(&str, Vec<&Dork>)> = Vec::new();
    for dork in dorks {
        match groups.iter_mut().find(|(name, _)| *name == dork.category) {
            Some((_, members)) => members.push(dork),
            None => groups.push((dork.category.as_str(), vec![dork])),
        }
    }
    groups
}

/// `sensitive_files` -> `Sensitive Files`.
pub(crate) fn display_name(category: &str) -> String {
    category
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn dorks() -> Vec<Dork> {
        vec![
            Dork::new("site:a.com ext:env", "sensitive_files", "Env files").unwrap(),
            Dork::new("site:a.com inurl:wp-login.php", "login_pages", "WordPress login").unwrap(),
            Dork::new("site:a.com ext:sql", "sensitive_files", "SQL dumps").unwrap(),
        ]
    }

    pub fn metadata() -> ExportMetadata {
        ExportMetadata {
            generated_at: Some("2026-01-01 00:00:00".to_string()),
            domain: Some("a.com".to_string()),
            ..Default::default()
        }
    }
}
