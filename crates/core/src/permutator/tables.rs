//! Expansion groups. Order matters: membership lookups return the first
//! group containing the term.

pub type ExpansionTable = &'static [(&'static str, &'static [&'static str])];

pub const EXTENSION_GROUPS: ExpansionTable = &[
    ("php", &["php", "php5", "phtml", "php7"]),
    ("asp", &["asp", "aspx", "asa"]),
    ("jsp", &["jsp", "jspx", "do", "action"]),
    ("js", &["js", "json", "map"]),
    ("sql", &["sql", "dump", "bak", "db"]),
    ("log", &["log", "txt", "out", "err"]),
    ("config", &["conf", "config", "cfg", "ini", "env", "xml", "yml", "yaml"]),
    ("doc", &["doc", "docx", "rtf", "odt"]),
    ("xls", &["xls", "xlsx", "csv"]),
    ("ppt", &["ppt", "pptx"]),
    ("bak", &["bak", "old", "backup", "swp", "tmp"]),
    ("zip", &["zip", "rar", "7z", "tar", "gz", "tgz"]),
];

pub const KEYWORD_GROUPS: ExpansionTable = &[
    ("login", &["login", "admin", "signin", "auth", "portal", "cpanel"]),
    ("password", &["password", "passwd", "pwd", "credentials", "secret"]),
    ("admin", &["admin", "root", "administrator", "manager", "dashboard"]),
    ("config", &["config", "configuration", "settings", "setup"]),
    ("backup", &["backup", "dump", "export", "archive"]),
    ("index", &["index", "index of", "listing", "directory"]),
    ("api", &["api", "graphql", "rest", "swagger", "v1", "v2"]),
    ("v1", &["v1", "v2", "v3", "api", "mobile"]),
];

/// Related terms for `term`: the group keyed by it, else the first group
/// listing it, else just the term itself.
pub fn find_related(term: &str, table: ExpansionTable) -> Vec<String> {
    let group = table
        .iter()
        .find(|(key, _)| *key == term)
        .or_else(|| table.iter().find(|(_, members)| members.contains(&term)));

    match group {
        Some((_, members)) => members.iter().map(|m| m.to_string()).collect(),
        None => vec![term.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_lookup_wins_over_membership() {
        // "admin" is a member of the login group but also a key.
        assert_eq!(find_related("admin", KEYWORD_GROUPS)[1], "root");
        assert_eq!(find_related("v1", KEYWORD_GROUPS)[4], "mobile");
    }

    #[test]
    fn test_membership_in_table_order() {
        // "bak" is a key, "dump" belongs to sql before backup.
        assert_eq!(find_related("dump", EXTENSION_GROUPS)[0], "sql");
        assert_eq!(find_related("phtml", EXTENSION_GROUPS).len(), 4);
    }

    #[test]
    fn test_unknown_term_is_singleton() {
        assert_eq!(find_related("exe", EXTENSION_GROUPS), vec!["exe"]);
    }
}
