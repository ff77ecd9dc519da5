use super::{display_name, group_by_category, ExportMetadata};
use crate::dork::Dork;
use crate::optimizer::DorkOptimizer;

pub(super) fn render(dorks: &[Dork], metadata: &ExportMetadata, optimizer: &DorkOptimizer) -> String {
    let groups = group_by_category(dorks);

    let mut lines = vec![
        "# DorkForge Report".to_string(),
        String::new(),
        format!("**Generated:** {}", metadata.timestamp()),
    ];
    if let Some(domain) = &metadata.domain {
        lines.push(format!("**Domain:** {}", domain));
    }
    lines.push(format!("**Categories:** {}", groups.len()));
    lines.push(format!("**Total Dorks:** {}", dorks.len()));
    lines.push(String::new());

    if groups.len() > 1 {
        lines.push("## Table of Contents".to_string());
        lines.push(String::new());
        for (category, members) in &groups {
            lines.push(format!(
                "- [{}](#{}) ({} dorks)",
                display_name(category),
                category.to_lowercase().replace('_', "-"),
                members.len()
            ));
        }
        lines.push(String::new());
    }

    lines.push("---".to_string());
    lines.push(String::new());

    for (category, members) in &groups {
        lines.push(format!("## {} ({} dorks)", display_name(category), members.len()));
        lines.push(String::new());
        lines.push("| # | Description | Dork Query |".to_string());
        lines.push("|---|-------------|------------|".to_string());
        for (idx, dork) in members.iter().enumerate() {
            let description = if dork.description.is_empty() {
                "N/A"
            } else {
                dork.description.as_str()
            };
            lines.push(format!(
                "| {} | {} | `{}` |",
                idx + 1,
                description.replace('|', "\\|"),
                dork.query.replace('|', "\\|")
            ));
        }
        lines.push(String::new());

        if members.len() > 1 {
            let chunks = match metadata.concat_dorks.get(*category) {
                Some(combined) => vec![combined.clone()],
                None => {
                    let owned: Vec<Dork> = members.iter().map(|d| (*d).clone()).collect();
                    optimizer.optimize(&owned)
                }
            };

            if !chunks.is_empty() {
                lines.push("### Combined Query".to_string());
                lines.push(String::new());
                if chunks.len() > 1 {
                    lines.push("> [!NOTE]".to_string());
                    lines.push(format!(
                        "> Split into {} parts to stay within search engine query limits.",
                        chunks.len()
                    ));
                    lines.push(String::new());
                }
                for (i, chunk) in chunks.iter().enumerate() {
                    if chunks.len() > 1 {
                        lines.push(format!("**Part {}**", i + 1));
                    }
                    lines.push("```".to_string());
                    lines.push(chunk.clone());
                    lines.push("```".to_string());
                    lines.push(String::new());
                }
            }
        }

        lines.push("---".to_string());
        lines.push(String::new());
    }

    lines.push("*Generated by DorkForge*".to_string());
    lines.push(String::new());
    lines.push("**Disclaimer:** These dorks are for authorized security testing only.".to_string());
    lines.push(String::new());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;

    #[test]
    fn test_markdown_tables_and_toc() {
        let out = render(&fixtures::dorks(), &fixtures::metadata(), &DorkOptimizer::default());
        assert!(out.contains("**Categories:** 2"));
        assert!(out.contains("- [Sensitive Files](#sensitive-files) (2 dorks)"));
        assert!(out.contains("| 1 | Env files | `site:a.com ext:env` |"));
        assert!(out.contains("```\nsite:a.com ((ext:env) OR (ext:sql))\n```"));
    }

    #[test]
    fn test_markdown_escapes_pipes_and_uses_given_concat() {
        let dorks = vec![
            Dork::new("ext:(php|asp)", "scripts", "").unwrap(),
            Dork::new("ext:jsp", "scripts", "").unwrap(),
        ];
        let mut metadata = fixtures::metadata();
        metadata
            .concat_dorks
            .insert("scripts".to_string(), "CUSTOM".to_string());
        let out = render(&dorks, &metadata, &DorkOptimizer::default());
        assert!(out.contains("| 1 | N/A | `ext:(php\\|asp)` |"));
        assert!(out.contains("```\nCUSTOM\n```"));
        assert!(!out.contains("Table of Contents"));
    }

    #[test]
    fn test_markdown_splits_combined_query() {
        use crate::optimizer::OptimizerConfig;

        let dorks = vec![
            Dork::new("inurl:admin", "panels", "").unwrap(),
            Dork::new("inurl:login", "panels", "").unwrap(),
        ];
        let optimizer = DorkOptimizer::new(OptimizerConfig {
            max_terms: 3,
            max_chars: 2048,
        });
        let out = render(&dorks, &fixtures::metadata(), &optimizer);
        assert!(out.contains("Split into 2 parts"));
        assert!(out.contains("**Part 1**\n```\n(inurl:admin)\n```"));
        assert!(out.contains("**Part 2**\n```\n(inurl:login)\n```"));
    }
}
