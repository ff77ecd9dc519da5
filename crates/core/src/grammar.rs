//! Shared token grammar for dork queries.
//!
//! Every component that needs to recognise an `operator:value` token goes
//! through the patterns in this module, so parsing, validation, translation
//! and expansion always agree on what a token is. Patterns are compiled once
//! on first use and never mutated.

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// `name:value` where value is a double-quoted run or a run of non-whitespace.
pub static OPERATOR_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\w+):(".*?"|\S+)"#).unwrap());

/// Any operator name followed by its colon.
pub static OPERATOR_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+):").unwrap());

/// Operator immediately followed by whitespace (`site: example.com`).
pub static OPERATOR_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+):\s+").unwrap());

/// Operator with nothing usable after it.
pub static EMPTY_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+):\s*(?:\s|$|OR|AND)").unwrap());

/// Operator name eligible for dialect rewriting. Group 1 is the boundary
/// (start, whitespace or `(`), group 2 the name.
pub static TRANSLATABLE_OPERATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|[(\s])([a-zA-Z]+):").unwrap());

/// First `site:` domain in a query, including a leading `*.` wildcard.
pub static SITE_DOMAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"site:([a-zA-Z0-9*.-]+)").unwrap());

/// Path-scoped tokens. Group 1 is the operator, group 2 the path value.
pub static PATH_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[\s(\-])(inurl|intitle):([a-zA-Z0-9._/-]+)").unwrap()
});

/// File extension tokens. Group 1 is the operator, group 2 the extension.
pub static EXTENSION_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[\s(\-])(ext|filetype):([a-zA-Z0-9._-]+)").unwrap()
});

/// Keyword-bearing tokens. Group 1 is the operator, group 2 the keyword.
pub static KEYWORD_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[\s(\-])(inurl|intitle|intext):([a-zA-Z0-9._/-]+)").unwrap()
});

/// Runs of whitespace, for collapsing.
pub static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Lowercased operator names in order of appearance, duplicates kept.
pub fn operator_names(query: &str) -> Vec<String> {
    OPERATOR_NAME
        .captures_iter(query)
        .map(|caps| caps[1].to_lowercase())
        .collect()
}

/// Whitespace-separated term count.
pub fn count_terms(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}
