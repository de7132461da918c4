//! Request and response types for the HTTP API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_auto() -> String {
    "auto".to_string()
}

/// Body of `POST /api/generate` and `POST /api/generate-stream`.
///
/// `input` defaults to empty so an absent field reaches the handler's
/// validation check instead of failing body extraction.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub input: String,
    #[serde(default = "default_auto")]
    pub mode: String,
    #[serde(rename = "docType", default = "default_auto")]
    pub doc_type: String,
}

/// Response of the non-streaming `POST /api/generate`.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub content: String,
}

/// Body of `POST /api/export-docx`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Response of `GET /api/doc-schemas`.
#[derive(Debug, Serialize)]
pub struct DocSchemasResponse {
    #[serde(rename = "docTypes")]
    pub doc_types: Vec<String>,
    pub schemas: Value,
}

/// Generic JSON error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_defaults() {
        let req: GenerateRequest = serde_json::from_str(r#"{"input": "写一份通知"}"#).unwrap();
        assert_eq!(req.input, "写一份通知");
        assert_eq!(req.mode, "auto");
        assert_eq!(req.doc_type, "auto");
    }

    #[test]
    fn test_generate_request_doc_type_camel_case() {
        let req: GenerateRequest =
            serde_json::from_str(r#"{"input": "x", "mode": "docMode", "docType": "请示"}"#)
                .unwrap();
        assert_eq!(req.mode, "docMode");
        assert_eq!(req.doc_type, "请示");
    }

    #[test]
    fn test_generate_request_missing_input_defaults_to_empty() {
        let req: GenerateRequest = serde_json::from_str(r#"{"mode": "auto"}"#).unwrap();
        assert!(req.input.is_empty());
    }

    #[test]
    fn test_export_request_filename_optional() {
        let req: ExportRequest = serde_json::from_str(r#"{"content": "正文"}"#).unwrap();
        assert!(req.filename.is_none());
    }
}
