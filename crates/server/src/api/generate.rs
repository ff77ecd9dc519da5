//! Category and generation handlers.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use dorkforge_core::{
    engine::{combine, target_params},
    CategoryInfo, Dork, DorkFilter, Engine, GenerateError, GenerateRequest, TemplateError,
    TranslateError,
};

use super::handlers::{api_error, ApiError};
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    pub category: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    /// Extra template parameters. Override `domain` and `keyword`.
    #[serde(default)]
    pub params: HashMap<String, String>,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub filter: DorkFilter,
    #[serde(default)]
    pub preset: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub category: String,
    pub engine: Engine,
    pub count: usize,
    pub dorks: Vec<Dork>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchBody {
    pub categories: Vec<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub params: HashMap<String, String>,
    #[serde(default)]
    pub engine: Option<String>,
    /// Per-category filters keyed by category name.
    #[serde(default)]
    pub filters: HashMap<String, DorkFilter>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub engine: Engine,
    pub total: usize,
    pub results: BTreeMap<String, Vec<Dork>>,
}

#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub description: String,
    pub template_count: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub total: usize,
    pub categories: Vec<CategorySummary>,
}

// ============================================================================
// Helpers
// ============================================================================

/// Resolve an optional engine id against the configured default.
pub(crate) fn resolve_engine(state: &AppState, engine: Option<&str>) -> Result<Engine, ApiError> {
    match engine {
        None => Ok(state.default_engine()),
        Some(id) => id
            .parse()
            .map_err(|e: TranslateError| api_error(StatusCode::BAD_REQUEST, e.to_string())),
    }
}

fn merged_params(
    domain: Option<&str>,
    keyword: Option<&str>,
    extra: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = target_params(domain, keyword);
    params.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    params
}

fn generate_error(err: GenerateError) -> ApiError {
    let status = match &err {
        GenerateError::Template(TemplateError::NotFound(_)) => StatusCode::NOT_FOUND,
        GenerateError::UnknownFilter { .. }
        | GenerateError::Validation(_)
        | GenerateError::Template(TemplateError::MissingParameter(_)) => StatusCode::BAD_REQUEST,
        GenerateError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    api_error(status, err.to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let names = state.engine().list_categories().map_err(generate_error)?;

    let mut categories = Vec::with_capacity(names.len());
    for name in names {
        match state.engine().category_info(&name) {
            Ok(info) => categories.push(CategorySummary {
                name: info.name,
                description: info.description,
                template_count: info.template_count,
            }),
            Err(e) => warn!("Skipping unreadable category '{}': {}", name, e),
        }
    }

    Ok(Json(CategoriesResponse {
        total: categories.len(),
        categories,
    }))
}

/// GET /api/v1/categories/{name}
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<CategoryInfo>, ApiError> {
    state
        .engine()
        .category_info(&name)
        .map(Json)
        .map_err(generate_error)
}

/// POST /api/v1/generate
///
/// Render one category for a target.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let engine = resolve_engine(&state, body.engine.as_deref())?;
    let params = merged_params(body.domain.as_deref(), body.keyword.as_deref(), &body.params);

    let mut request = GenerateRequest::new(body.category.clone(), params)
        .with_engine(engine)
        .with_filter(body.filter);
    if let Some(preset) = body.preset {
        request = request.with_preset(preset);
    }

    let dorks = state.engine().generate(&request).map_err(generate_error)?;
    info!(
        "Generated {} dorks for '{}' ({})",
        dorks.len(),
        body.category,
        engine
    );

    Ok(Json(GenerateResponse {
        category: body.category,
        engine,
        count: dorks.len(),
        combined: combine(&dorks),
        dorks,
    }))
}

/// POST /api/v1/generate/batch
///
/// Unknown or failing categories are left out of `results`.
pub async fn generate_batch(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BatchBody>,
) -> Result<Json<BatchResponse>, ApiError> {
    if body.categories.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "At least one category is required",
        ));
    }

    let engine = resolve_engine(&state, body.engine.as_deref())?;
    let params = merged_params(body.domain.as_deref(), body.keyword.as_deref(), &body.params);

    let results = state
        .engine()
        .generate_batch(&body.categories, &params, engine, &body.filters);

    Ok(Json(BatchResponse {
        engine,
        total: results.values().map(Vec::len).sum(),
        results,
    }))
}
