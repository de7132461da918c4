//! Scripted provider for tests: replays canned upstream bytes or errors
//! and counts how often it was called.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::models::{ChatCompletionParams, ChatCompletionResponse, CompletionError};
use crate::{ByteStream, ChatProvider};

pub struct MockProvider {
    stream_body: Vec<Vec<u8>>,
    completion_body: String,
    fail_with: Option<(u16, String)>,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Replays the given byte chunks as the upstream stream body. The same
    /// bytes back the non-streaming path when it is exercised.
    pub fn streaming(chunks: Vec<Vec<u8>>) -> Self {
        let completion_body = String::from_utf8_lossy(&chunks.concat()).into_owned();
        Self {
            stream_body: chunks,
            completion_body,
            fail_with: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replays one complete response body (non-streaming JSON).
    pub fn non_streaming(body: &str) -> Self {
        Self {
            stream_body: vec![body.as_bytes().to_vec()],
            completion_body: body.to_string(),
            fail_with: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fails every call with the given upstream status and body.
    pub fn failing(status_code: u16, message: &str) -> Self {
        Self {
            stream_body: Vec::new(),
            completion_body: String::new(),
            fail_with: Some((status_code, message.to_string())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of upstream calls made so far (streaming and non-streaming).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Shared counter handle, for asserting after the provider moved into
    /// an `Arc<dyn ChatProvider>`.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    fn record_call(&self) -> Result<(), CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some((status_code, message)) = &self.fail_with {
            return Err(CompletionError::Http {
                status_code: *status_code,
                message: message.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn chat_completion_stream(
        &self,
        _params: ChatCompletionParams,
    ) -> Result<ByteStream, CompletionError> {
        self.record_call()?;
        let chunks: Vec<Result<Bytes, CompletionError>> = self
            .stream_body
            .iter()
            .cloned()
            .map(|chunk| Ok(Bytes::from(chunk)))
            .collect();
        Ok(Box::pin(futures_util::stream::iter(chunks)))
    }

    async fn chat_completion(
        &self,
        _params: ChatCompletionParams,
    ) -> Result<ChatCompletionResponse, CompletionError> {
        self.record_call()?;
        serde_json::from_str(&self.completion_body)
            .map_err(|e| CompletionError::InvalidResponse(format!("Failed to parse response: {e}")))
    }
}
