use super::{ExportError, ExportMetadata};
use crate::dork::Dork;

const HEADER: [&str; 7] = [
    "Category",
    "Dork",
    "Description",
    "Generated_At",
    "Domain",
    "Keyword",
    "Source",
];

/// Neutralise cells a spreadsheet would evaluate as a formula.
fn sanitize(value: &str) -> String {
    if value.starts_with(['=', '+', '-', '@']) {
        format!("'{}", value)
    } else {
        value.to_string()
    }
}

pub(super) fn render(dorks: &[Dork], metadata: &ExportMetadata) -> Result<String, ExportError> {
    let timestamp = metadata.timestamp();
    let domain = metadata.domain.as_deref().unwrap_or("N/A");
    let keyword = metadata.keyword.as_deref().unwrap_or("N/A");

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(HEADER)
        .map_err(|e| ExportError::Serialization(e.to_string()))?;

    for dork in dorks {
        let category = if dork.category.is_empty() {
            "N/A"
        } else {
            dork.category.as_str()
        };
        let row = [
            category,
            dork.query.as_str(),
            dork.description.as_str(),
            timestamp.as_str(),
            domain,
            keyword,
            dork.source.as_str(),
        ];
        writer
            .write_record(row.iter().map(|cell| sanitize(cell)))
            .map_err(|e| ExportError::Serialization(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Serialization(e.to_string()))
}
