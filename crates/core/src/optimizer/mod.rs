//! Combines many dorks into a few length-bounded OR queries.
//!
//! Operators shared by every input dork are hoisted into a prefix; what is
//! left of each dork is parenthesised and greedily packed into chunks that
//! stay within the term and character budgets.

use regex_lite::{escape, Regex};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dork::Dork;
use crate::grammar::{collapse_whitespace, count_terms};
use crate::parser::OperatorMap;

fn default_max_terms() -> usize {
    32
}

fn default_max_chars() -> usize {
    2048
}

/// Budgets for a single combined query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    #[serde(default = "default_max_terms")]
    pub max_terms: usize,
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_terms: default_max_terms(),
            max_chars: default_max_chars(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DorkOptimizer {
    config: OptimizerConfig,
}

impl DorkOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Combine `dorks` into as few queries as the budgets allow.
    ///
    /// Input order is preserved and nothing is deduplicated.
    pub fn optimize(&self, dorks: &[Dork]) -> Vec<String> {
        if dorks.is_empty() {
            return Vec::new();
        }

        let common = common_operators(dorks);
        let prefix = render_prefix(&common);
        let residues: Vec<String> = dorks
            .iter()
            .map(|dork| strip_common(&dork.query, &common))
            .collect();

        let chunks = self.chunk(&prefix, &residues);
        debug!(
            "Optimized {} dorks into {} queries (prefix {:?})",
            dorks.len(),
            chunks.len(),
            prefix
        );
        chunks
    }

    fn chunk(&self, prefix: &str, residues: &[String]) -> Vec<String> {
        let prefix_terms = count_terms(prefix);
        let prefix_chars = prefix.chars().count();

        let mut chunks = Vec::new();
        let mut current: Vec<String> = Vec::new();
        let mut terms = prefix_terms;
        let mut chars = prefix_chars;

        for residue in residues.iter().filter(|r| !r.is_empty()) {
            let part = format!("({})", residue);
            let part_terms = count_terms(&part) + 1;
            let part_chars = part.chars().count() + 4;

            if terms + part_terms > self.config.max_terms
                || chars + part_chars > self.config.max_chars
            {
                if !current.is_empty() {
                    chunks.push(build_query(prefix, &current));
                }
                if prefix_terms + part_terms > self.config.max_terms
                    || prefix_chars + part_chars > self.config.max_chars
                {
                    warn!("Query part exceeds optimizer budget on its own: {}", part);
                }
                current = vec![part];
                terms = prefix_terms + part_terms;
                chars = prefix_chars + part_chars;
            } else {
                current.push(part);
                terms += part_terms;
                chars += part_chars;
            }
        }

        if !current.is_empty() {
            chunks.push(build_query(prefix, &current));
        }

        if chunks.is_empty() && !prefix.is_empty() {
            chunks.push(prefix.to_string());
        }

        chunks
    }
}

/// Combine `dorks` with the default budgets.
pub fn optimize(dorks: &[Dork]) -> Vec<String> {
    DorkOptimizer::default().optimize(dorks)
}

/// Operators whose value is identical in every dork, in the first dork's order.
fn common_operators(dorks: &[Dork]) -> OperatorMap {
    let parsed: Vec<OperatorMap> = dorks.iter().map(Dork::operators).collect();
    let mut common = OperatorMap::new();

    let Some((first, rest)) = parsed.split_first() else {
        return common;
    };
    for (name, value) in first.iter() {
        if rest.iter().all(|ops| ops.get(name) == Some(value)) {
            common.insert(name, value);
        }
    }
    common
}

fn render_prefix(common: &OperatorMap) -> String {
    common
        .iter()
        .map(|(name, value)| {
            if value.chars().any(char::is_whitespace) {
                format!("{}:\"{}\"", name, value)
            } else {
                format!("{}:{}", name, value)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_common(query: &str, common: &OperatorMap) -> String {
    let mut residue = query.to_string();
    for (name, value) in common.iter() {
        // Group 1 keeps `ext:` from matching inside `intext:`.
        let pattern = format!(
            "(^|[\\s(\\-])(?i:{}):[\"']?{}[\"']?",
            escape(name),
            escape(value)
        );
        match Regex::new(&pattern) {
            Ok(re) => residue = re.replace_all(&residue, "${1}").trim().to_string(),
            Err(e) => warn!("Could not build strip pattern for {}: {}", name, e),
        }
    }
    collapse_whitespace(&residue)
}

fn build_query(prefix: &str, parts: &[String]) -> String {
    let combined = parts.join(" OR ");
    match (prefix.is_empty(), combined.is_empty()) {
        (false, false) => format!("{} ({})", prefix, combined),
        (false, true) => prefix.to_string(),
        (true, _) => combined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dork(query: &str) -> Dork {
        Dork::new(query, "test", "").unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert!(optimize(&[]).is_empty());
    }

    #[test]
    fn test_common_prefix_extracted() {
        let dorks = vec![
            dork("site:example.com ext:pdf"),
            dork("site:example.com ext:doc"),
        ];
        assert_eq!(
            optimize(&dorks),
            vec!["site:example.com ((ext:pdf) OR (ext:doc))".to_string()]
        );
    }

    #[test]
    fn test_no_common_operators() {
        let dorks = vec![dork("inurl:admin"), dork("intitle:login")];
        assert_eq!(optimize(&dorks), vec!["(inurl:admin) OR (intitle:login)".to_string()]);
    }

    #[test]
    fn test_identical_dorks_collapse_to_prefix() {
        let dorks = vec![dork("site:a.com ext:pdf"), dork("site:a.com ext:pdf")];
        assert_eq!(optimize(&dorks), vec!["site:a.com ext:pdf".to_string()]);
    }

    #[test]
    fn test_common_value_must_match_everywhere() {
        let dorks = vec![
            dork("site:a.com ext:pdf"),
            dork("site:b.com ext:pdf"),
            dork("site:a.com ext:pdf intext:x"),
        ];
        let out = optimize(&dorks);
        assert_eq!(out.len(), 1);
        assert!(out[0].starts_with("ext:pdf ("));
        assert!(out[0].contains("(site:b.com)"));
    }

    #[test]
    fn test_strip_tolerates_quotes_and_case() {
        let dorks = vec![
            dork(r#"INTEXT:"db password" ext:sql"#),
            dork(r#"intext:"db password" ext:env"#),
        ];
        assert_eq!(
            optimize(&dorks),
            vec![r#"intext:"db password" ((ext:sql) OR (ext:env))"#.to_string()]
        );
    }

    #[test]
    fn test_strip_leaves_longer_operator_names_intact() {
        let dorks = vec![dork("ext:pdf intext:pdf"), dork("ext:pdf intext:doc")];
        assert_eq!(
            optimize(&dorks),
            vec!["ext:pdf ((intext:pdf) OR (intext:doc))".to_string()]
        );

        let dorks = vec![dork("inurl:admin allinurl:admin"), dork("inurl:admin intitle:x")];
        assert_eq!(
            optimize(&dorks),
            vec!["inurl:admin ((allinurl:admin) OR (intitle:x))".to_string()]
        );
    }

    #[test]
    fn test_chunks_respect_budgets() {
        let dorks: Vec<Dork> = (0..100)
            .map(|i| dork(&format!("site:example.com inurl:page{} intext:word{}", i, i)))
            .collect();
        let out = optimize(&dorks);
        assert!(out.len() > 1);
        for chunk in &out {
            assert!(count_terms(chunk) <= 32, "{}", chunk);
            assert!(chunk.chars().count() <= 2048);
            assert!(chunk.starts_with("site:example.com ("));
        }
    }

    #[test]
    fn test_char_budget() {
        let optimizer = DorkOptimizer::new(OptimizerConfig {
            max_terms: 1000,
            max_chars: 40,
        });
        let dorks: Vec<Dork> = (0..6).map(|i| dork(&format!("inurl:segment{}", i))).collect();
        let out = optimizer.optimize(&dorks);
        assert!(out.len() > 1);
        for chunk in &out {
            assert!(chunk.chars().count() <= 40, "{}", chunk);
        }
    }

    #[test]
    fn test_order_preserved_without_dedup() {
        let dorks = vec![dork("inurl:b"), dork("inurl:a"), dork("inurl:b")];
        assert_eq!(
            optimize(&dorks),
            vec!["(inurl:b) OR (inurl:a) OR (inurl:b)".to_string()]
        );
    }

    #[test]
    fn test_oversized_part_emitted_alone() {
        let optimizer = DorkOptimizer::new(OptimizerConfig {
            max_terms: 3,
            max_chars: 2048,
        });
        let dorks = vec![dork("inurl:a"), dork("one two three four five"), dork("inurl:c")];
        let out = optimizer.optimize(&dorks);
        assert_eq!(
            out,
            vec![
                "(inurl:a)".to_string(),
                "(one two three four five)".to_string(),
                "(inurl:c)".to_string(),
            ]
        );
    }
}
