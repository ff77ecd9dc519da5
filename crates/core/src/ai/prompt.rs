//! Prompts shared by every provider.

use serde::{Deserialize, Serialize};

pub const SYSTEM_PROMPT: &str = "\
You are an expert in search-engine dork construction.
Turn the user's intent into a single precise dork query.

Rules:
1. Return ONLY the raw dork string. No preamble, no explanation, no markdown.
2. Never put a space after an operator's colon (site:example.com, not site: example.com).
3. Group alternatives with parentheses and OR or pipes, e.g. ext:(doc|pdf).
4. If a target domain is provided it MUST appear as site:<domain>.
5. site:domain.com already covers subdomains; only use site:*.domain.com when asked.
6. Use only standard operators: site, filetype, ext, intext, allintext, inurl, allinurl, intitle, allintitle, link, cache, related, info.

Example output:
site:example.com ext:(sql|db|backup) intext:\"password\"";

/// Optional target details passed alongside a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl GenerationContext {
    pub fn new(domain: Option<String>, keyword: Option<String>) -> Self {
        let clean = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Self {
            domain: clean(domain),
            keyword: clean(keyword),
        }
    }
}

pub fn build_user_prompt(prompt: &str, context: &GenerationContext) -> String {
    let mut lines = vec![
        "### TASK ###".to_string(),
        "Objective: Generate a high-precision dork for the following input.".to_string(),
        format!("User Intent: {}", prompt.trim()),
        String::new(),
        "### PARAMETERS ###".to_string(),
    ];
    if let Some(domain) = &context.domain {
        lines.push(format!("Target Domain (MANDATORY): {}", domain));
    }
    if let Some(keyword) = &context.keyword {
        lines.push(format!("Primary Keyword: {}", keyword));
    }
    lines.push(String::new());
    lines.push("Strict Result: Return ONLY the dork string.".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_with_context() {
        let context = GenerationContext::new(Some(" a.com ".to_string()), Some("backup".to_string()));
        let prompt = build_user_prompt("find sql dumps", &context);
        assert!(prompt.contains("User Intent: find sql dumps"));
        assert!(prompt.contains("Target Domain (MANDATORY): a.com"));
        assert!(prompt.contains("Primary Keyword: backup"));
        assert!(prompt.ends_with("Strict Result: Return ONLY the dork string."));
    }

    #[test]
    fn test_prompt_without_context() {
        let prompt = build_user_prompt("find logs", &GenerationContext::new(Some("  ".to_string()), None));
        assert!(!prompt.contains("Target Domain"));
        assert!(!prompt.contains("Primary Keyword"));
    }
}
