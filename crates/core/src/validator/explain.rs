use crate::parser::parse_operators;

fn describe(operator: &str) -> Option<&'static str> {
    let label = match operator {
        "site" => "Pages on domain",
        "filetype" | "ext" => "Files of type",
        "intext" => "Containing text",
        "allintext" => "Containing all text",
        "intitle" => "With title containing",
        "allintitle" => "With all title words",
        "inurl" => "With URL containing",
        "allinurl" => "With all URL words",
        "link" => "Pages linking to",
        "cache" => "Cached version of",
        "related" => "Sites related to",
        "info" => "Information about",
        _ => return None,
    };
    Some(label)
}

/// Plain-language description of what a query searches for.
///
/// One line per recognised operator, in the order the operators first appear.
pub fn explain(query: &str) -> String {
    let operators = parse_operators(query);
    if operators.is_empty() {
        return "No operators found in query".to_string();
    }

    let mut lines = vec!["This dork searches for:".to_string()];
    for (name, value) in operators.iter() {
        if let Some(label) = describe(name) {
            lines.push(format!("- {}: {}", label, value));
        }
    }
    lines.join("\n")
}
