pub mod error;
pub mod models;
pub mod prompt;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use config::{DocSchemas, PromptTemplate};
use inference::ChatProvider;
use tower_http::cors::CorsLayer;

use crate::routes::{doc_schemas, export_docx, generate, generate_stream};

/// Shared per-request state: the upstream provider plus the resources
/// loaded at startup.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ChatProvider>,
    pub template: Arc<PromptTemplate>,
    pub schemas: Arc<DocSchemas>,
    pub model: String,
    pub temperature: f32,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate-stream", post(generate_stream))
        .route("/api/generate", post(generate))
        .route("/api/export-docx", post(export_docx))
        .route("/api/doc-schemas", get(doc_schemas))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
