//! Document-type schema listing for UI selection controls.

use axum::extract::{Json, State};

use crate::models::DocSchemasResponse;
use crate::AppState;

/// `GET /api/doc-schemas`
pub async fn doc_schemas(State(state): State<AppState>) -> Json<DocSchemasResponse> {
    Json(DocSchemasResponse {
        doc_types: state.schemas.doc_types.clone(),
        schemas: state.schemas.schemas.clone(),
    })
}
