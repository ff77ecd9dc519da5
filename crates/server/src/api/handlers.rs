use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;
use dorkforge_core::{supported_engines, EngineInfo, SanitizedConfig};

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

#[derive(Serialize)]
pub struct EnginesResponse {
    pub engines: Vec<EngineInfo>,
    pub default: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<SanitizedConfig> {
    Json(state.sanitized_config())
}

/// GET /api/v1/engines
pub async fn list_engines(State(state): State<Arc<AppState>>) -> Json<EnginesResponse> {
    Json(EnginesResponse {
        engines: supported_engines(),
        default: state.default_engine().id(),
    })
}
