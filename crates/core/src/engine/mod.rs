//! Template-driven dork generation.
//!
//! Renders a category's templates, translates them for the target engine,
//! optionally validates them and narrows the result with a [`DorkFilter`].

mod filter;
mod generator;

pub use filter::DorkFilter;
pub use generator::{
    combine, target_params, CategoryInfo, DorkEngine, GenerateRequest, TemplateSummary,
};

use thiserror::Error;

use crate::templates::TemplateError;
use crate::validator::ValidationError;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unknown filter '{filter}' for category '{category}'")]
    UnknownFilter { category: String, filter: String },
}
