//! Per-engine operator dialects.

use super::Engine;

/// How an engine spells a canonical operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectEntry {
    /// The engine uses a different name.
    Rename(&'static str),
    /// The engine understands the operator as written.
    Keep,
}

use DialectEntry::{Keep, Rename};

/// Canonical operator -> entries for bing, duckduckgo, yahoo, yandex, baidu.
const DIALECT_TABLE: &[(&str, [DialectEntry; 5])] = &[
    ("filetype", [Keep, Keep, Keep, Rename("mime"), Keep]),
    ("ext", [Rename("filetype"), Keep, Rename("filetype"), Rename("mime"), Rename("filetype")]),
    ("inurl", [Rename("instreamset:url"), Keep, Keep, Keep, Keep]),
    (
        "allinurl",
        [Rename("instreamset:url"), Rename("inurl"), Rename("inurl"), Rename("inurl"), Rename("inurl")],
    ),
    ("intitle", [Keep, Keep, Keep, Rename("title"), Keep]),
    (
        "allintitle",
        [Rename("intitle"), Rename("intitle"), Rename("intitle"), Rename("title"), Rename("intitle")],
    ),
    ("intext", [Rename("inbody"), Keep, Keep, Keep, Rename("inbody")]),
    ("site", [Keep, Keep, Keep, Keep, Keep]),
];

fn column(engine: Engine) -> Option<usize> {
    match engine {
        Engine::Google => None,
        Engine::Bing => Some(0),
        Engine::DuckDuckGo => Some(1),
        Engine::Yahoo => Some(2),
        Engine::Yandex => Some(3),
        Engine::Baidu => Some(4),
    }
}

/// Dialect entry for `operator` (lowercase) on `engine`.
///
/// `None` when the engine is the canonical one or the operator has no entry.
pub fn lookup(operator: &str, engine: Engine) -> Option<DialectEntry> {
    let column = column(engine)?;
    DIALECT_TABLE
        .iter()
        .find(|(name, _)| *name == operator)
        .map(|(_, entries)| entries[column])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_has_no_entries() {
        for (name, _) in DIALECT_TABLE {
            assert_eq!(lookup(name, Engine::Google), None);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("intext", Engine::Bing), Some(Rename("inbody")));
        assert_eq!(lookup("filetype", Engine::Yandex), Some(Rename("mime")));
        assert_eq!(lookup("site", Engine::Baidu), Some(Keep));
        assert_eq!(lookup("link", Engine::Bing), None);
    }
}
