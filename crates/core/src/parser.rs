//! Operator extraction.
//!
//! Pulls `operator:value` pairs out of a query. Boolean structure is treated
//! as opaque text: `(a:1 OR b:2)` yields `a -> 1` and `b -> 2` with the
//! grouping discarded.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::grammar::OPERATOR_TOKEN;

/// Ordered operator name -> value map.
///
/// Names are stored lowercased. Inserting an existing name overwrites its
/// value but keeps its original position, so iteration follows the order in
/// which operators were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorMap {
    entries: Vec<(String, String)>,
}

impl OperatorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl Serialize for OperatorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Extract every `operator:value` token from `query`.
///
/// Quoted values lose their quotes. Bare values lose trailing `)` characters
/// that close a group opened before the token, while balanced parentheses
/// such as `ext:(php|asp)` are kept.
pub fn parse_operators(query: &str) -> OperatorMap {
    let mut operators = OperatorMap::new();

    for caps in OPERATOR_TOKEN.captures_iter(query) {
        let name = caps[1].to_lowercase();
        let raw = &caps[2];
        let value = if raw.starts_with('"') && raw.len() > 1 && raw.ends_with('"') {
            raw.trim_matches('"')
        } else {
            trim_unbalanced_close(raw).trim_matches('"')
        };
        operators.insert(name, value);
    }

    operators
}

fn trim_unbalanced_close(value: &str) -> &str {
    let mut value = value;
    while value.ends_with(')') {
        let opens = value.matches('(').count();
        let closes = value.matches(')').count();
        if closes <= opens {
            break;
        }
        value = &value[..value.len() - 1];
    }
    value
}
