use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::{group_by_category, ExportError, ExportMetadata};
use crate::dork::{Dork, DorkSource};

#[derive(Serialize)]
struct JsonExport<'a> {
    metadata: JsonMetadata<'a>,
    dorks: Vec<JsonDork<'a>>,
    by_category: BTreeMap<&'a str, Vec<CategoryEntry<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    concat_dorks: Option<&'a BTreeMap<String, String>>,
}

#[derive(Serialize)]
struct JsonMetadata<'a> {
    generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<&'a str>,
    categories: Vec<&'a str>,
    total_count: usize,
}

#[derive(Serialize)]
struct JsonDork<'a> {
    query: &'a str,
    description: &'a str,
    category: &'a str,
    source: DorkSource,
    parameters: &'a HashMap<String, String>,
}

#[derive(Serialize)]
struct CategoryEntry<'a> {
    query: &'a str,
    description: &'a str,
}

pub(super) fn render(dorks: &[Dork], metadata: &ExportMetadata) -> Result<String, ExportError> {
    let groups = group_by_category(dorks);

    let categories = if metadata.categories.is_empty() {
        groups.iter().map(|(name, _)| *name).collect()
    } else {
        metadata.categories.iter().map(String::as_str).collect()
    };

    let export = JsonExport {
        metadata: JsonMetadata {
            generated_at: metadata.timestamp(),
            domain: metadata.domain.as_deref(),
            categories,
            total_count: dorks.len(),
        },
        dorks: dorks
            .iter()
            .map(|d| JsonDork {
                query: &d.query,
                description: &d.description,
                category: &d.category,
                source: d.source,
                parameters: &d.parameters,
            })
            .collect(),
        by_category: groups
            .iter()
            .map(|(name, members)| {
                let entries = members
                    .iter()
                    .map(|d| CategoryEntry {
                        query: &d.query,
                        description: &d.description,
                    })
                    .collect();
                (*name, entries)
            })
            .collect(),
        concat_dorks: Some(&metadata.concat_dorks).filter(|c| !c.is_empty()),
    };

    serde_json::to_string_pretty(&export).map_err(|e| ExportError::Serialization(e.to_string()))
}
