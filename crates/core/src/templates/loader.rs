use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{CategoryFilter, Template, TemplateCategory, TemplateError};

/// On-disk layout of a category file.
#[derive(Debug, Deserialize)]
struct CategoryFile {
    category: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    filters: Vec<CategoryFilter>,
    #[serde(default)]
    templates: Vec<TemplateEntry>,
}

#[derive(Debug, Deserialize)]
struct TemplateEntry {
    pattern: String,
    description: String,
    #[serde(default)]
    params: Vec<String>,
    #[serde(default)]
    examples: Vec<String>,
}

/// Reads `<dir>/<category>.toml` files.
#[derive(Debug, Clone)]
pub struct TemplateLoader {
    dir: PathBuf,
}

impl TemplateLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, TemplateError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(TemplateError::Configuration(format!(
                "Template directory not found: {}",
                dir.display()
            )));
        }
        info!("Template loader using {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn load_category(&self, name: &str) -> Result<TemplateCategory, TemplateError> {
        if !is_category_name(name) {
            return Err(TemplateError::NotFound(name.to_string()));
        }

        let path = self.dir.join(format!("{}.toml", name));
        if !path.is_file() {
            return Err(TemplateError::NotFound(name.to_string()));
        }

        let content = std::fs::read_to_string(&path)?;
        let file: CategoryFile = toml::from_str(&content).map_err(|e| {
            TemplateError::Configuration(format!("Invalid template file {}: {}", name, e))
        })?;

        let category_name = file.category.unwrap_or_else(|| name.to_string());
        let templates = file
            .templates
            .into_iter()
            .map(|entry| {
                let mut template =
                    Template::new(entry.pattern, entry.description, &category_name, entry.params)?;
                template.examples = entry.examples;
                Ok(template)
            })
            .collect::<Result<Vec<_>, TemplateError>>()?;

        info!("Loaded {} templates for category '{}'", templates.len(), name);
        Ok(TemplateCategory {
            name: category_name,
            description: file.description,
            templates,
            filters: file.filters,
        })
    }

    /// Category names (file stems), sorted.
    pub fn list_available_categories(&self) -> Result<Vec<String>, TemplateError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if is_category_name(stem) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        debug!("Found {} template categories", names.len());
        Ok(names)
    }
}

/// Plain identifiers only, so a name can never escape the template directory.
fn is_category_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
