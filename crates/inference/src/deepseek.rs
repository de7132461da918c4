use async_trait::async_trait;
use futures_util::TryStreamExt;
use reqwest::{header::HeaderValue, Client};

use crate::models::{ChatCompletionParams, ChatCompletionResponse, CompletionError};
use crate::{ByteStream, ChatProvider};

/// Configuration for the DeepSeek provider
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
}

impl ProviderConfig {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self { base_url, api_key }
    }
}

/// DeepSeek provider implementation
///
/// Talks to DeepSeek's OpenAI-compatible chat-completion endpoint. Streaming
/// requests return the raw upstream byte stream; the re-framer interprets
/// the vendor framing. No per-request timeout is enforced beyond the
/// transport's connect timeout (long generations run as slowly as the model
/// does).
pub struct DeepSeekProvider {
    config: ProviderConfig,
    client: Client,
}

impl DeepSeekProvider {
    /// Create a new provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(30))
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn build_headers(&self) -> Result<reqwest::header::HeaderMap, CompletionError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let auth_value = format!("Bearer {}", self.config.api_key);
        let header_value = HeaderValue::from_str(&auth_value)
            .map_err(|e| CompletionError::Transport(format!("Invalid API key format: {e}")))?;
        headers.insert("Authorization", header_value);

        Ok(headers)
    }

    async fn send(
        &self,
        params: &ChatCompletionParams,
    ) -> Result<reqwest::Response, CompletionError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let headers = self.build_headers()?;

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(params)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response body: {e}"));
            return Err(CompletionError::Http {
                status_code,
                message,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatProvider for DeepSeekProvider {
    async fn chat_completion_stream(
        &self,
        params: ChatCompletionParams,
    ) -> Result<ByteStream, CompletionError> {
        let mut streaming_params = params;
        streaming_params.stream = Some(true);

        tracing::debug!(model = %streaming_params.model, "opening upstream completion stream");
        let response = self.send(&streaming_params).await?;

        let stream = response
            .bytes_stream()
            .map_err(|e| CompletionError::Transport(e.to_string()));
        Ok(Box::pin(stream))
    }

    async fn chat_completion(
        &self,
        params: ChatCompletionParams,
    ) -> Result<ChatCompletionResponse, CompletionError> {
        let mut non_streaming_params = params;
        non_streaming_params.stream = None;

        tracing::debug!(model = %non_streaming_params.model, "sending upstream completion request");
        let response = self.send(&non_streaming_params).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        serde_json::from_slice(&body)
            .map_err(|e| CompletionError::InvalidResponse(format!("Failed to parse response: {e}")))
    }
}
