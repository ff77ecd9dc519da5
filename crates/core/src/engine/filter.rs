use serde::{Deserialize, Serialize};

use crate::dork::Dork;
use crate::templates::{CategoryFilter, Template};

const HTTPS_ONLY_SUFFIX: &str = "-inurl:http";

/// Optional narrowing and decoration applied to generated dorks.
///
/// Empty lists and `None` mean "no constraint". All matching is
/// case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DorkFilter {
    /// Keep dorks using at least one of these operators.
    pub include_operators: Vec<String>,
    /// Drop dorks whose query contains any of these.
    pub exclude_patterns: Vec<String>,
    /// Appended to every query as quoted phrases.
    pub custom_keywords: Vec<String>,
    pub https_only: bool,
    /// Keep dorks whose query contains at least one of these.
    pub query_contains: Vec<String>,
    /// Keep templates whose description contains at least one of these.
    pub description_contains: Vec<String>,
    /// Drop templates whose description contains any of these.
    pub exclude_keywords: Vec<String>,
    /// Truncate to this many dorks. Zero keeps all.
    pub max_dorks: usize,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl DorkFilter {
    /// Fold a category preset into this filter.
    pub fn with_preset(mut self, preset: &CategoryFilter) -> Self {
        if let Some(text) = &preset.description_contains {
            self.description_contains.push(text.clone());
        }
        if let Some(text) = &preset.query_contains {
            self.query_contains.push(text.clone());
        }
        self
    }

    /// Whether a template's description passes the description rules.
    pub fn accepts_template(&self, template: &Template) -> bool {
        let description = &template.description;
        if !self.description_contains.is_empty()
            && !self
                .description_contains
                .iter()
                .any(|k| contains_ci(description, k))
        {
            return false;
        }
        !self
            .exclude_keywords
            .iter()
            .any(|k| contains_ci(description, k))
    }

    /// Apply the query rules to rendered dorks. Never mutates the input.
    pub fn apply(&self, dorks: Vec<Dork>) -> Vec<Dork> {
        let mut dorks: Vec<Dork> = dorks
            .into_iter()
            .filter(|d| {
                let query = d.query.to_lowercase();
                self.include_operators.is_empty()
                    || self
                        .include_operators
                        .iter()
                        .any(|op| query.contains(&format!("{}:", op.to_lowercase())))
            })
            .filter(|d| !self.exclude_patterns.iter().any(|p| contains_ci(&d.query, p)))
            .collect();

        if !self.custom_keywords.is_empty() {
            let suffix = self
                .custom_keywords
                .iter()
                .map(|kw| format!("\"{}\"", kw))
                .collect::<Vec<_>>()
                .join(" ");
            dorks = dorks
                .into_iter()
                .map(|d| Dork {
                    query: format!("{} {}", d.query, suffix),
                    ..d
                })
                .collect();
        }

        if self.https_only {
            dorks = dorks
                .into_iter()
                .map(|d| {
                    if d.query.to_lowercase().contains(HTTPS_ONLY_SUFFIX) {
                        d
                    } else {
                        Dork {
                            query: format!("{} {}", d.query, HTTPS_ONLY_SUFFIX),
                            ..d
                        }
                    }
                })
                .collect();
        }

        if !self.query_contains.is_empty() {
            dorks.retain(|d| self.query_contains.iter().any(|v| contains_ci(&d.query, v)));
        }

        if self.max_dorks > 0 {
            dorks.truncate(self.max_dorks);
        }

        dorks
    }
}
