//! The dork value type and its invariants.

mod types;

pub use types::{Dork, DorkSource};

use thiserror::Error;

/// Violations of a dork's structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DorkError {
    #[error("Dork query cannot be empty")]
    EmptyQuery,

    #[error("Dork category cannot be empty")]
    EmptyCategory,

    #[error("Invalid source: {0}")]
    InvalidSource(String),
}
