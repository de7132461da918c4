//! Route-level tests against a mocked upstream provider.

use std::sync::Arc;

use api::{build_router, AppState};
use axum_test::TestServer;
use config::{DocSchemas, PromptTemplate};
use inference::{ChatProvider, MockProvider, StreamConsumer};
use serde_json::{json, Value};

const TEMPLATE: &str = "你是公文写作助手。\n用户输入：{{ user_input }}\n请输出公文。";

fn schemas() -> DocSchemas {
    DocSchemas::from_value(json!({
        "通知": { "fields": ["标题", "主送机关", "正文", "落款"] },
        "请示": { "fields": ["标题", "主送机关", "请示事项", "落款"] }
    }))
    .unwrap()
}

fn server_with(provider: MockProvider) -> TestServer {
    let state = AppState {
        provider: Arc::new(provider) as Arc<dyn ChatProvider>,
        template: Arc::new(PromptTemplate::new(TEMPLATE).unwrap()),
        schemas: Arc::new(schemas()),
        model: "deepseek-chat".to_string(),
        temperature: 0.2,
    };
    TestServer::new(build_router(state)).unwrap()
}

fn sse_frame(json: Value) -> Vec<u8> {
    format!("data: {}\n", json).into_bytes()
}

#[tokio::test]
async fn test_generate_stream_reframes_to_ndjson() {
    let provider = MockProvider::streaming(vec![
        sse_frame(json!({
            "choices": [{ "delta": { "reasoning_content": "先梳理结构。" } }]
        })),
        sse_frame(json!({
            "choices": [{ "delta": { "content": "【标题】" } }]
        })),
        sse_frame(json!({
            "choices": [{ "delta": { "content": "放假通知" } }]
        })),
        b"data: [DONE]\n".to_vec(),
    ]);
    let server = server_with(provider);

    let response = server
        .post("/api/generate-stream")
        .json(&json!({ "input": "写一份放假通知" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("application/x-ndjson"));

    let mut consumer = StreamConsumer::new();
    consumer.push_chunk(response.as_bytes());
    consumer.finish();
    assert_eq!(consumer.reasoning(), "先梳理结构。");
    assert_eq!(consumer.content(), "【标题】放假通知");
}

#[tokio::test]
async fn test_generate_stream_fallback_on_non_sse_body() {
    // Upstream that ignores the stream flag and returns a plain body.
    let provider = MockProvider::streaming(vec!["你好".as_bytes().to_vec()]);
    let server = server_with(provider);

    let response = server
        .post("/api/generate-stream")
        .json(&json!({ "input": "你好" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let mut consumer = StreamConsumer::new();
    consumer.push_chunk(response.as_bytes());
    consumer.finish();
    assert_eq!(consumer.content(), "你好");
    assert_eq!(consumer.reasoning(), "");
}

#[tokio::test]
async fn test_generate_stream_rejects_empty_input_without_upstream_call() {
    let provider = MockProvider::streaming(vec![]);
    let calls = provider.call_counter();
    let server = server_with(provider);

    let response = server
        .post("/api/generate-stream")
        .json(&json!({ "input": "" }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.text(), "input 字段必填且必须为字符串");
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_generate_stream_rejects_missing_input() {
    let server = server_with(MockProvider::streaming(vec![]));

    let response = server
        .post("/api/generate-stream")
        .json(&json!({ "mode": "qaMode" }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_generate_stream_surfaces_upstream_error_body() {
    let provider = MockProvider::failing(401, r#"{"error":"invalid api key"}"#);
    let server = server_with(provider);

    let response = server
        .post("/api/generate-stream")
        .json(&json!({ "input": "写通知" }))
        .await;

    assert_eq!(response.status_code(), 502);
    assert_eq!(response.text(), r#"{"error":"invalid api key"}"#);
}

#[tokio::test]
async fn test_generate_stream_upstream_error_without_body_gets_generic_message() {
    let provider = MockProvider::failing(503, "");
    let server = server_with(provider);

    let response = server
        .post("/api/generate-stream")
        .json(&json!({ "input": "写通知" }))
        .await;

    assert_eq!(response.status_code(), 502);
    assert!(response.text().contains("503"));
}

#[tokio::test]
async fn test_generate_returns_final_content() {
    let provider = MockProvider::non_streaming(
        r#"{
            "choices": [{ "message": { "role": "assistant", "content": "【标题】放假通知\n正文。" } }]
        }"#,
    );
    let server = server_with(provider);

    let response = server
        .post("/api/generate")
        .json(&json!({ "input": "写一份放假通知", "docType": "通知" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["content"], "【标题】放假通知\n正文。");
}

#[tokio::test]
async fn test_generate_rejects_empty_input_with_json_error() {
    let server = server_with(MockProvider::non_streaming("{}"));

    let response = server
        .post("/api/generate")
        .json(&json!({ "input": "" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "input 字段必填且必须为字符串");
}

#[tokio::test]
async fn test_generate_maps_upstream_failure_to_502() {
    let provider = MockProvider::failing(500, "internal");
    let server = server_with(provider);

    let response = server
        .post("/api/generate")
        .json(&json!({ "input": "写通知" }))
        .await;

    assert_eq!(response.status_code(), 502);
    let body: Value = response.json();
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("调用 deepseek 接口失败"));
    assert!(error.contains("500"));
    assert!(error.contains("internal"));
}

#[tokio::test]
async fn test_export_docx_returns_attachment_with_derived_name() {
    let server = server_with(MockProvider::streaming(vec![]));

    let response = server
        .post("/api/export-docx")
        .json(&json!({ "content": "【标题】年度计划\n一、总体要求\n正文内容。" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let headers = response.headers();
    assert_eq!(
        headers.get("content-type").unwrap().to_str().unwrap(),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    let disposition = headers
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(
        disposition,
        format!(
            "attachment; filename=\"{}.docx\"",
            urlencoding::encode("年度计划")
        )
    );
    // .docx files are ZIP containers.
    assert_eq!(&response.as_bytes()[..2], b"PK");
}

#[tokio::test]
async fn test_export_docx_explicit_filename_wins_and_is_sanitized() {
    let server = server_with(MockProvider::streaming(vec![]));

    let response = server
        .post("/api/export-docx")
        .json(&json!({ "content": "正文。", "filename": "报告/终稿" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let disposition = response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains(&urlencoding::encode("报告_终稿").into_owned()));
}

#[tokio::test]
async fn test_export_docx_rejects_empty_content() {
    let server = server_with(MockProvider::streaming(vec![]));

    let response = server
        .post("/api/export-docx")
        .json(&json!({ "content": "" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "content 字段必填且必须为字符串");
}

#[tokio::test]
async fn test_doc_schemas_lists_types_in_declaration_order() {
    let server = server_with(MockProvider::streaming(vec![]));

    let response = server.get("/api/doc-schemas").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["docTypes"], json!(["通知", "请示"]));
    assert!(body["schemas"]["通知"]["fields"].is_array());
}
