//! Clean-up and sanity checks for model output.

use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::grammar::{operator_names, EMPTY_VALUE, OPERATOR_SPACING};
use crate::validator::{is_known_operator, EXCLUSIVE_PAIRS};

const CHATTY_PREFIXES: &[&str] = &["Google Dork:", "Dork:", "Query:", "Search:"];

/// Strip markdown, chatty prefixes and spaces after operators.
pub fn auto_fix_common_issues(raw: &str) -> String {
    let mut dork = raw.replace("```", "").replace('`', "").trim().to_string();

    for prefix in CHATTY_PREFIXES {
        if let Some(rest) = dork.strip_prefix(prefix) {
            dork = rest.trim().to_string();
        }
    }

    let fixed = OPERATOR_SPACING.replace_all(&dork, "$1:").trim().to_string();
    debug!("Auto-fixed dork: {}", fixed);
    fixed
}

/// Check generated output for signs the model invented syntax.
///
/// Returns `(true, [])` when nothing suspicious was found.
pub fn detect_hallucination(dork: &str) -> (bool, Vec<String>) {
    let mut issues = Vec::new();

    if OPERATOR_SPACING.is_match(dork) {
        issues.push(
            "Invalid spacing after operator (should be operator:value not operator: value)"
                .to_string(),
        );
    }

    if dork.matches('"').count() % 2 != 0 {
        issues.push("Unmatched quotes in query".to_string());
    }

    let operators = operator_names(dork);
    for op in &operators {
        if !is_known_operator(op) {
            issues.push(format!("Unknown operator: {}", op));
        }
    }

    for caps in EMPTY_VALUE.captures_iter(dork) {
        issues.push(format!("Empty value for operator: {}", &caps[1]));
    }

    let present: BTreeSet<&str> = operators.iter().map(String::as_str).collect();
    for (all, single) in EXCLUSIVE_PAIRS {
        if present.contains(all) && present.contains(single) {
            issues.push(format!("Cannot combine '{}' and '{}'", all, single));
        }
    }

    let allin: Vec<&str> = present
        .iter()
        .copied()
        .filter(|op| op.starts_with("allin"))
        .collect();
    if allin.len() > 1 {
        issues.push(format!(
            "Multiple 'allin' operators found: {}. Use only one.",
            allin.join(", ")
        ));
    }

    if !issues.is_empty() {
        warn!("Suspicious generated dork {:?}: {:?}", dork, issues);
    }
    (issues.is_empty(), issues)
}
