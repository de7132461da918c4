//! Word-document export endpoint.

use axum::extract::Json;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use document::{derive_base_name, transcode};

use crate::error::ApiError;
use crate::models::ExportRequest;

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// `POST /api/export-docx`
///
/// Transcodes the finished plain text into a styled `.docx` and returns it
/// as an attachment. The file name comes from the request, or from a title
/// tag found in the content, or a fixed default.
pub async fn export_docx(Json(request): Json<ExportRequest>) -> Result<Response, ApiError> {
    if request.content.is_empty() {
        return Err(ApiError::Validation(
            "content 字段必填且必须为字符串".to_string(),
        ));
    }

    let base_name = derive_base_name(&request.content, request.filename.as_deref());

    let bytes = transcode(&request.content).map_err(|e| {
        tracing::error!(error = %e, "Document transcoding failed");
        ApiError::Export("生成 Word 文件失败".to_string())
    })?;

    tracing::info!(file = %base_name, size = bytes.len(), "Exported document");

    let disposition = format!(
        "attachment; filename=\"{}.docx\"",
        urlencoding::encode(&base_name)
    );
    Ok((
        [
            (header::CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
