//! Generation endpoints: streaming NDJSON and buffered JSON.

use std::convert::Infallible;

use axum::body::Body;
use axum::extract::{Json, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use inference::{CompletionError, EventStream};

use crate::error::ApiError;
use crate::models::{GenerateRequest, GenerateResponse};
use crate::prompt::PromptEnvelope;
use crate::AppState;

const MISSING_INPUT: &str = "input 字段必填且必须为字符串";

/// `POST /api/generate-stream`
///
/// Bridges the upstream byte stream through the re-framer and writes one
/// NDJSON event per line. Pre-stream failures are reported as plain-text
/// error responses carrying the upstream body when there is one; once
/// streaming has started, an upstream error simply ends the stream.
pub async fn generate_stream(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    if request.input.is_empty() {
        return (StatusCode::BAD_REQUEST, MISSING_INPUT).into_response();
    }

    let envelope = PromptEnvelope::build(
        &state.template,
        &request.input,
        &request.mode,
        &request.doc_type,
    );
    let params = envelope.into_params(&state.model, state.temperature);

    tracing::info!(
        mode = %request.mode,
        doc_type = %request.doc_type,
        input_chars = request.input.chars().count(),
        "Opening upstream generation stream"
    );

    let bytes = match state.provider.chat_completion_stream(params).await {
        Ok(stream) => stream,
        Err(error) => {
            tracing::error!(error = %error, "Upstream streaming request failed");
            let body = match error {
                CompletionError::Http {
                    status_code,
                    message,
                } => {
                    if message.is_empty() {
                        format!("调用 deepseek 接口失败，状态码 {}", status_code)
                    } else {
                        message
                    }
                }
                other => other.to_string(),
            };
            return (StatusCode::BAD_GATEWAY, body).into_response();
        }
    };

    let lines = EventStream::new(bytes).filter_map(|item| async move {
        match item {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(json) => Some(Ok::<String, Infallible>(format!("{}\n", json))),
                Err(error) => {
                    tracing::error!(error = %error, "Failed to serialize stream event");
                    None
                }
            },
            Err(error) => {
                // Streaming already started; nothing left but to end the body.
                tracing::warn!(error = %error, "Upstream stream aborted mid-flight");
                None
            }
        }
    });

    (
        [(header::CONTENT_TYPE, "application/x-ndjson; charset=utf-8")],
        Body::from_stream(lines),
    )
        .into_response()
}

/// `POST /api/generate` — buffered variant, returns the final text only.
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    if request.input.is_empty() {
        return Err(ApiError::Validation(MISSING_INPUT.to_string()));
    }

    let envelope = PromptEnvelope::build(
        &state.template,
        &request.input,
        &request.mode,
        &request.doc_type,
    );
    let params = envelope.into_params(&state.model, state.temperature);

    let response = state.provider.chat_completion(params).await.map_err(|e| {
        tracing::error!(error = %e, "Upstream completion request failed");
        match e {
            CompletionError::Http {
                status_code,
                message,
            } => {
                let detail: String = message.chars().take(2000).collect();
                ApiError::Upstream(format!(
                    "调用 deepseek 接口失败，状态码 {}：{}",
                    status_code, detail
                ))
            }
            _ => ApiError::Upstream("调用 deepseek 接口失败".to_string()),
        }
    })?;

    let content = response.content().unwrap_or_default().to_string();
    tracing::info!(content_chars = content.chars().count(), "Generation complete");
    Ok(Json(GenerateResponse { content }))
}
