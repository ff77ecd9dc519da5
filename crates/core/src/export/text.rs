use super::{display_name, group_by_category, ExportMetadata};
use crate::dork::Dork;

pub(super) fn render(dorks: &[Dork], metadata: &ExportMetadata) -> String {
    let mut lines = vec![
        "# DorkForge Export".to_string(),
        format!("# Generated: {}", metadata.timestamp()),
    ];
    if let Some(domain) = &metadata.domain {
        lines.push(format!("# Domain: {}", domain));
    }
    if !metadata.categories.is_empty() {
        lines.push(format!("# Categories: {}", metadata.categories.join(", ")));
    }
    lines.push(format!("# Total: {} dorks", dorks.len()));
    lines.push(String::new());

    for (category, members) in group_by_category(dorks) {
        lines.push(format!(
            "# === {} ({} dorks) ===",
            display_name(category).to_uppercase(),
            members.len()
        ));
        lines.push(String::new());
        for dork in members {
            if !dork.description.is_empty() {
                lines.push(format!("# {}", dork.description));
            }
            lines.push(dork.query.clone());
            lines.push(String::new());
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
