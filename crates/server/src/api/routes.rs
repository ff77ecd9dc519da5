use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::{ai, export, generate, handlers, query};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/engines", get(handlers::list_engines))
        // Template categories and generation
        .route("/categories", get(generate::list_categories))
        .route("/categories/{name}", get(generate::get_category))
        .route("/generate", post(generate::generate))
        .route("/generate/batch", post(generate::generate_batch))
        // Query tools
        .route("/validate", post(query::validate))
        .route("/translate", post(query::translate))
        .route("/permute", post(query::permute))
        .route("/optimize", post(query::optimize))
        // Export
        .route("/export", post(export::export))
        // AI
        .route("/ai/generate", post(ai::generate))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
