//! Core dork data types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::DorkError;
use crate::parser::{parse_operators, OperatorMap};
use crate::validator;

/// Where a dork came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DorkSource {
    /// Rendered from a category template.
    #[default]
    Template,
    /// Produced by an AI provider.
    Ai,
}

impl DorkSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DorkSource::Template => "template",
            DorkSource::Ai => "ai",
        }
    }
}

impl fmt::Display for DorkSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DorkSource {
    type Err = DorkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "template" => Ok(DorkSource::Template),
            "ai" => Ok(DorkSource::Ai),
            other => Err(DorkError::InvalidSource(other.to_string())),
        }
    }
}

/// A single search query plus the metadata it was generated with.
///
/// Fields are public so dorks can travel through JSON, which means a value
/// built by hand may violate the invariants that [`Dork::new`] enforces.
/// [`Dork::check`] re-verifies them and the validator calls it first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dork {
    /// The query string, e.g. `site:example.com filetype:pdf`.
    pub query: String,
    /// Category this dork belongs to, e.g. `sensitive_files`.
    pub category: String,
    /// What the dork is meant to find.
    #[serde(default)]
    pub description: String,
    /// Parameters used during template substitution.
    #[serde(default)]
    pub parameters: HashMap<String, String>,
    #[serde(default)]
    pub source: DorkSource,
}

impl Dork {
    /// Create a template-sourced dork, enforcing non-empty query and category.
    pub fn new(
        query: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, DorkError> {
        let dork = Self {
            query: query.into(),
            category: category.into(),
            description: description.into(),
            parameters: HashMap::new(),
            source: DorkSource::Template,
        };
        dork.check()?;
        Ok(dork)
    }

    pub fn with_parameters(mut self, parameters: HashMap<String, String>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_source(mut self, source: DorkSource) -> Self {
        self.source = source;
        self
    }

    /// Copy of this dork carrying a different query.
    ///
    /// Used by translation and filtering, which never mutate a dork in place.
    pub fn with_query(&self, query: impl Into<String>) -> Result<Self, DorkError> {
        let dork = Self {
            query: query.into(),
            ..self.clone()
        };
        dork.check()?;
        Ok(dork)
    }

    /// Verify the structural invariants.
    pub fn check(&self) -> Result<(), DorkError> {
        if self.query.is_empty() {
            return Err(DorkError::EmptyQuery);
        }
        if self.category.is_empty() {
            return Err(DorkError::EmptyCategory);
        }
        Ok(())
    }

    /// Operators present in the query.
    pub fn operators(&self) -> OperatorMap {
        parse_operators(&self.query)
    }

    /// Multi-line explanation including the dork's own metadata.
    pub fn explain(&self) -> String {
        format!(
            "Category: {}\nDescription: {}\n\nQuery: {}\n\n{}",
            self.category,
            self.description,
            self.query,
            validator::explain(&self.query)
        )
    }
}

impl fmt::Display for Dork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query)
    }
}
