//! Syntax and operator-compatibility rules.

use tracing::{debug, warn};

use super::{is_known_operator, ValidationError};
use crate::dork::Dork;
use crate::grammar::{operator_names, EMPTY_VALUE, OPERATOR_SPACING};
use crate::parser::{parse_operators, OperatorMap};

/// `allin*` operators and the singular form each one excludes.
pub const EXCLUSIVE_PAIRS: &[(&str, &str)] = &[
    ("allintext", "intext"),
    ("allintitle", "intitle"),
    ("allinurl", "inurl"),
];

/// First syntax problem in `query`, if any.
fn syntax_failure(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        return Some("query is empty".to_string());
    }

    if query.matches('"').count() % 2 != 0 {
        return Some("unmatched quotes".to_string());
    }

    if let Some(caps) = OPERATOR_SPACING.captures(query) {
        return Some(format!("space after operator \"{}\"", &caps[1]));
    }

    None
}

/// Check the query's syntax.
///
/// Fails on an empty query, an odd number of `"` characters, or an operator
/// followed by whitespace. Unknown operators are logged and accepted.
pub fn validate_syntax(query: &str) -> bool {
    if let Some(reason) = syntax_failure(query) {
        warn!("Invalid query ({}): {:?}", reason, query);
        return false;
    }

    let unknown: Vec<String> = operator_names(query)
        .into_iter()
        .filter(|op| !is_known_operator(op))
        .collect();
    if !unknown.is_empty() {
        warn!("Unknown operators in query: {:?}", unknown);
    }

    true
}

/// Check that no mutually exclusive operators are combined.
///
/// Returns the reason for the first conflict found.
pub fn check_operator_compatibility(operators: &OperatorMap) -> Option<String> {
    for (all, single) in EXCLUSIVE_PAIRS {
        if operators.contains(all) && operators.contains(single) {
            return Some(format!("Cannot combine '{}' and '{}'", all, single));
        }
    }

    let allin: Vec<&str> = operators
        .names()
        .filter(|name| name.starts_with("allin"))
        .collect();
    if allin.len() > 1 {
        return Some(format!(
            "Multiple 'allin' operators found: {}. Use only one.",
            allin.join(", ")
        ));
    }

    None
}

/// Validate a dork: invariants, then syntax, then operator compatibility.
pub fn validate_dork(dork: &Dork) -> Result<(), ValidationError> {
    dork.check()?;

    if let Some(reason) = syntax_failure(&dork.query) {
        return Err(ValidationError::Syntax(reason));
    }
    // Emits the unknown-operator warning.
    validate_syntax(&dork.query);

    if let Some(reason) = check_operator_compatibility(&parse_operators(&dork.query)) {
        return Err(ValidationError::Incompatible(reason));
    }

    debug!("Dork validation passed: {}", dork.query);
    Ok(())
}

/// Human-readable list of common mistakes in `query`. Empty when clean.
pub fn detect_common_errors(query: &str) -> Vec<String> {
    let mut errors = Vec::new();

    for caps in OPERATOR_SPACING.captures_iter(query) {
        errors.push(format!("Invalid spacing after operator \"{}\"", &caps[1]));
    }

    if query.matches('"').count() % 2 != 0 {
        errors.push("Unmatched quotes".to_string());
    }

    for caps in EMPTY_VALUE.captures_iter(query) {
        errors.push(format!("Empty value for operator \"{}\"", &caps[1]));
    }

    let allin = operator_names(query)
        .into_iter()
        .filter(|op| op.starts_with("allin"))
        .count();
    if allin > 1 {
        errors.push("Multiple 'allin' operators found (use only one)".to_string());
    }

    errors
}
