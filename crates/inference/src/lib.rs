//! Upstream chat-completion adapter and stream re-framing
//!
//! This crate covers the upstream side of the generation pipeline:
//!
//! - a [`ChatProvider`] trait over an OpenAI-compatible chat-completion API,
//!   with a DeepSeek implementation and a scripted mock for tests
//! - the re-framer, which turns the vendor's event-stream framing into
//!   normalized `{type, delta}` events suitable for an NDJSON response
//! - the client-side consumer, which rebuilds the reasoning and content
//!   buffers from such an NDJSON stream
//!
//! The re-framer and the consumer share the same [`reframer::StreamEvent`]
//! type and the same byte-level [`lines::LineBuffer`], so the wire shape is
//! defined exactly once for both directions.

pub mod consumer;
pub mod deepseek;
pub mod lines;
pub mod mock;
pub mod models;
pub mod reframer;

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures_core::Stream;

// Re-export commonly used types for convenience
pub use consumer::StreamConsumer;
pub use deepseek::{DeepSeekProvider, ProviderConfig};
pub use mock::MockProvider;
pub use models::{
    ChatCompletionParams, ChatCompletionResponse, ChatDelta, ChatMessage, CompletionError,
    MessageRole,
};
pub use reframer::{EventKind, EventStream, Reframer, StreamEvent};

/// Raw upstream byte stream. Vendor framing is not interpreted at this
/// level; that is the re-framer's job.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, CompletionError>> + Send>>;

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Opens a streaming chat completion request.
    ///
    /// Returns the raw upstream byte stream on success. A non-2xx upstream
    /// status or a connection failure surfaces as a single error before any
    /// bytes are delivered; there are no retries.
    async fn chat_completion_stream(
        &self,
        params: ChatCompletionParams,
    ) -> Result<ByteStream, CompletionError>;

    /// Performs a non-streaming chat completion request and parses the
    /// complete response body.
    async fn chat_completion(
        &self,
        params: ChatCompletionParams,
    ) -> Result<ChatCompletionResponse, CompletionError>;
}
