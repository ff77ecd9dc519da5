//! Stateless query tools: validation, translation, permutation and optimization.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use dorkforge_core::{
    check_operator_compatibility, detect_common_errors, explain, get_variations, parse_operators,
    translate_for, validate_syntax, Dork, DorkOptimizer, Engine, OperatorMap, OptimizerConfig,
};

use super::generate::resolve_engine;
use super::handlers::{api_error, ApiError};
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct QueryBody {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub query: String,
    pub valid: bool,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict: Option<String>,
    pub operators: OperatorMap,
    pub explanation: String,
}

#[derive(Debug, Deserialize)]
pub struct TranslateBody {
    pub query: String,
    #[serde(default)]
    pub engine: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub query: String,
    pub engine: Engine,
    pub translated: String,
}

#[derive(Debug, Serialize)]
pub struct PermuteResponse {
    pub query: String,
    pub count: usize,
    pub variations: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct OptimizeBody {
    pub queries: Vec<String>,
    #[serde(default)]
    pub max_terms: Option<usize>,
    #[serde(default)]
    pub max_chars: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub input_count: usize,
    pub count: usize,
    pub queries: Vec<String>,
}

fn require_query(query: &str) -> Result<(), ApiError> {
    if query.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Query cannot be empty"));
    }
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/validate
///
/// Always 200: an invalid query is reported in the body, not as an error.
pub async fn validate(Json(body): Json<QueryBody>) -> Json<ValidateResponse> {
    let operators = parse_operators(&body.query);
    let syntax_ok = validate_syntax(&body.query);
    let conflict = check_operator_compatibility(&operators);

    Json(ValidateResponse {
        valid: syntax_ok && conflict.is_none(),
        errors: detect_common_errors(&body.query),
        conflict,
        explanation: explain(&body.query),
        operators,
        query: body.query,
    })
}

/// POST /api/v1/translate
pub async fn translate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TranslateBody>,
) -> Result<Json<TranslateResponse>, ApiError> {
    require_query(&body.query)?;
    let engine = resolve_engine(&state, body.engine.as_deref())?;

    Ok(Json(TranslateResponse {
        translated: translate_for(&body.query, engine),
        query: body.query,
        engine,
    }))
}

/// POST /api/v1/permute
pub async fn permute(Json(body): Json<QueryBody>) -> Result<Json<PermuteResponse>, ApiError> {
    require_query(&body.query)?;
    let variations = get_variations(&body.query);

    Ok(Json(PermuteResponse {
        query: body.query,
        count: variations.len(),
        variations,
    }))
}

/// POST /api/v1/optimize
///
/// Blank queries are ignored. Budgets default to the configured ones.
pub async fn optimize(
    State(state): State<Arc<AppState>>,
    Json(body): Json<OptimizeBody>,
) -> Result<Json<OptimizeResponse>, ApiError> {
    let dorks: Vec<Dork> = body
        .queries
        .iter()
        .map(|q| q.trim())
        .filter(|q| !q.is_empty())
        .filter_map(|q| Dork::new(q, "optimize", "").ok())
        .collect();

    if dorks.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "At least one non-empty query is required",
        ));
    }

    let defaults = *state.optimizer().config();
    let config = OptimizerConfig {
        max_terms: body.max_terms.unwrap_or(defaults.max_terms),
        max_chars: body.max_chars.unwrap_or(defaults.max_chars),
    };
    if config.max_terms == 0 || config.max_chars == 0 {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Optimizer budgets must be greater than 0",
        ));
    }

    let queries = DorkOptimizer::new(config).optimize(&dorks);
    Ok(Json(OptimizeResponse {
        input_count: dorks.len(),
        count: queries.len(),
        queries,
    }))
}
