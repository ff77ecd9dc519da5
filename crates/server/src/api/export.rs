//! Export handler.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;
use dorkforge_core::{Dork, ExportError, ExportFormat, ExportMetadata};

use super::handlers::{api_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportBody {
    pub format: String,
    pub dorks: Vec<Dork>,
    #[serde(default)]
    pub metadata: ExportMetadata,
}

fn content_type(format: ExportFormat) -> &'static str {
    match format {
        ExportFormat::Text => "text/plain; charset=utf-8",
        ExportFormat::Json => "application/json",
        ExportFormat::Markdown => "text/markdown; charset=utf-8",
        ExportFormat::Csv => "text/csv; charset=utf-8",
    }
}

/// POST /api/v1/export
///
/// Responds with the rendered document and a download filename. Markdown
/// combined queries follow the configured optimizer budgets.
pub async fn export(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExportBody>,
) -> Result<impl IntoResponse, ApiError> {
    let format: ExportFormat = body
        .format
        .parse()
        .map_err(|e: ExportError| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    if body.dorks.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "No dorks to export"));
    }
    if let Some(err) = body.dorks.iter().find_map(|d| d.check().err()) {
        return Err(api_error(StatusCode::BAD_REQUEST, err.to_string()));
    }

    let output = format
        .export_with(&body.dorks, &body.metadata, state.optimizer())
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    info!("Exported {} dorks as {}", body.dorks.len(), format);

    let filename = format!(
        "dorkforge_{}.{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    );
    Ok((
        [
            (header::CONTENT_TYPE, content_type(format).to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        output,
    ))
}
