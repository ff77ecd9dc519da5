//! Dork syntax validation, diagnostics and explanation.
//!
//! Validation never panics on untrusted query text. Rejections come back as
//! [`ValidationError`] values whose `Display` is the human-readable reason.

mod explain;
mod syntax;

pub use explain::explain;
pub use syntax::{
    check_operator_compatibility, detect_common_errors, validate_dork, validate_syntax,
    EXCLUSIVE_PAIRS,
};

use thiserror::Error;

use crate::dork::DorkError;

/// Operators with a known meaning. Advisory only: unknown operators are
/// reported but never fail validation.
pub const VALID_OPERATORS: &[&str] = &[
    "site",
    "filetype",
    "ext",
    "intext",
    "allintext",
    "inurl",
    "allinurl",
    "intitle",
    "allintitle",
    "link",
    "cache",
    "related",
    "info",
];

/// Whether `name` (already lowercased) is in [`VALID_OPERATORS`].
pub fn is_known_operator(name: &str) -> bool {
    VALID_OPERATORS.contains(&name)
}

/// Reasons a dork was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0}")]
    InvalidDork(#[from] DorkError),

    #[error("Invalid operator syntax: {0}")]
    Syntax(String),

    #[error("{0}")]
    Incompatible(String),

    #[error("All generated dorks failed validation: {0}")]
    AllFailed(String),
}
