use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Parameters for chat completion requests (OpenAI-compatible subset)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionParams {
    pub model: String,

    pub messages: Vec<ChatMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Whether to stream back partial progress
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

/// Delta message in streaming chat completions
/// All fields are optional as they may not be present in every chunk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<MessageRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Reasoning content for models that expose chain-of-thought
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
    /// Alternative reasoning field name used by some providers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
}

impl ChatDelta {
    /// Non-empty reasoning delta, preferring `reasoning_content` over
    /// `thinking`.
    pub fn reasoning(&self) -> Option<&str> {
        non_empty(self.reasoning_content.as_deref()).or_else(|| non_empty(self.thinking.as_deref()))
    }

    /// Non-empty content delta.
    pub fn content(&self) -> Option<&str> {
        non_empty(self.content.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChunkChoice {
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(default)]
    pub delta: Option<ChatDelta>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// One parsed frame of the vendor's streaming protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub choices: Vec<ChatChunkChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub reasoning_content: Option<String>,
    #[serde(default)]
    pub thinking: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionChoice {
    #[serde(default)]
    pub message: Option<ChatResponseMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Complete (non-streaming) chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatCompletionChoice>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if any.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
    }
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("upstream request failed: {0}")]
    Transport(String),

    #[error("upstream returned HTTP {status_code}: {message}")]
    Http { status_code: u16, message: String },

    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_serialization_skips_unset_fields() {
        let params = ChatCompletionParams {
            model: "deepseek-chat".to_string(),
            messages: vec![ChatMessage::system("系统提示"), ChatMessage::user("正文")],
            temperature: Some(0.2),
            stream: None,
        };

        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"model\":\"deepseek-chat\""));
        assert!(json.contains("\"role\":\"system\""));
        assert!(json.contains("\"temperature\":0.2"));
        assert!(!json.contains("stream"));
    }

    #[test]
    fn test_delta_prefers_reasoning_content_over_thinking() {
        let delta = ChatDelta {
            reasoning_content: Some("推理A".to_string()),
            thinking: Some("推理B".to_string()),
            ..Default::default()
        };
        assert_eq!(delta.reasoning(), Some("推理A"));

        let delta = ChatDelta {
            reasoning_content: Some(String::new()),
            thinking: Some("推理B".to_string()),
            ..Default::default()
        };
        assert_eq!(delta.reasoning(), Some("推理B"));
    }

    #[test]
    fn test_chunk_parses_with_unknown_fields() {
        let json = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion.chunk",
            "model": "deepseek-chat",
            "choices": [{"index": 0, "delta": {"content": "你好"}, "finish_reason": null}]
        }"#;
        let chunk: ChatCompletionChunk = serde_json::from_str(json).unwrap();
        let delta = chunk.choices[0].delta.as_ref().unwrap();
        assert_eq!(delta.content(), Some("你好"));
        assert_eq!(delta.reasoning(), None);
    }

    #[test]
    fn test_response_content_helper() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": "正文"}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.content(), Some("正文"));

        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(empty.content(), None);
    }
}
