//! Dork templates: TOML category files on disk, a cached repository over
//! them, and placeholder rendering.

mod loader;
mod repository;
mod types;

pub use loader::TemplateLoader;
pub use repository::TemplateRepository;
pub use types::{CategoryFilter, Template, TemplateCategory};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Category not found: {0}")]
    NotFound(String),

    #[error("Template configuration error: {0}")]
    Configuration(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
