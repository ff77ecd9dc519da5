//! AI-assisted generation handler.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;
use dorkforge_core::{
    detect_hallucination, translate_for, AiError, Dork, DorkSource, Engine, GenerationContext,
};

use super::generate::resolve_engine;
use super::handlers::{api_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AiGenerateBody {
    /// What to look for, in natural language.
    pub prompt: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AiGenerateResponse {
    pub provider: String,
    pub engine: Engine,
    pub dork: Dork,
    /// False when the generated query looks hallucinated.
    pub valid: bool,
    pub issues: Vec<String>,
}

fn ai_error(err: AiError) -> ApiError {
    let status = match &err {
        AiError::NotConfigured | AiError::UnknownProvider(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_GATEWAY,
    };
    api_error(status, err.to_string())
}

/// POST /api/v1/ai/generate
///
/// The dork is returned even when it looks wrong; `valid` and `issues` say why.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AiGenerateBody>,
) -> Result<Json<AiGenerateResponse>, ApiError> {
    let generator = state.ai().ok_or_else(|| {
        api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "AI provider not configured. Add an [ai] section to the config file.",
        )
    })?;

    if body.prompt.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Prompt cannot be empty"));
    }
    let engine = resolve_engine(&state, body.engine.as_deref())?;

    let context = GenerationContext::new(body.domain, body.keyword);
    let raw = generator
        .generate_dork(&body.prompt, &context)
        .await
        .map_err(ai_error)?;

    let (hallucinated, issues) = detect_hallucination(&raw);
    if hallucinated {
        warn!("Generated dork has issues: {:?}", issues);
    }

    let category = body
        .category
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| "ai_generated".to_string());
    let dork = Dork::new(translate_for(&raw, engine), category, body.prompt.trim())
        .map_err(|e| api_error(StatusCode::BAD_GATEWAY, e.to_string()))?
        .with_source(DorkSource::Ai);

    Ok(Json(AiGenerateResponse {
        provider: generator.name(),
        engine,
        dork,
        valid: !hallucinated,
        issues,
    }))
}
