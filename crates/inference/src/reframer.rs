//! Frame re-framer: vendor event-stream framing in, normalized
//! `{type, delta}` events out.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use serde::{Deserialize, Serialize};

use crate::lines::LineBuffer;
use crate::models::{ChatCompletionChunk, CompletionError};
use crate::ByteStream;

/// End-of-stream sentinel payload sent by the upstream protocol.
const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Reasoning,
    Content,
}

/// One normalized event of the NDJSON stream. Wire shape:
/// `{"type":"reasoning"|"content","delta":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub delta: String,
}

impl StreamEvent {
    pub fn reasoning(delta: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Reasoning,
            delta: delta.into(),
        }
    }

    pub fn content(delta: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Content,
            delta: delta.into(),
        }
    }
}

/// Incremental re-framing state machine.
///
/// Feed it raw upstream chunks; it yields normalized events per complete
/// vendor line, regardless of how the byte stream is fragmented. Call
/// [`Reframer::finish`] once the upstream stream ends to apply the
/// non-streaming fallback.
#[derive(Debug, Default)]
pub struct Reframer {
    lines: LineBuffer,
    raw: Vec<u8>,
    emitted_any: bool,
    finished: bool,
}

impl Reframer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the end-of-stream sentinel was seen; no further input is
    /// consumed after that.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Processes one upstream chunk and returns the events it completed,
    /// in arrival order. Reasoning precedes content within a single frame.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        if self.finished {
            return events;
        }
        self.raw.extend_from_slice(chunk);

        for line in self.lines.push(chunk) {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let Some(payload) = trimmed.strip_prefix("data:") else {
                continue;
            };
            let payload = payload.trim();
            if payload.is_empty() {
                continue;
            }
            if payload == DONE_MARKER {
                // Lines already split before the sentinel were processed
                // above; anything after it is discarded.
                self.finished = true;
                break;
            }

            let frame: ChatCompletionChunk = match serde_json::from_str(payload) {
                Ok(frame) => frame,
                Err(error) => {
                    tracing::debug!(%error, "skipping unparsable stream frame");
                    continue;
                }
            };
            let Some(delta) = frame.choices.first().and_then(|c| c.delta.as_ref()) else {
                continue;
            };

            if let Some(reasoning) = delta.reasoning() {
                events.push(StreamEvent::reasoning(reasoning));
            }
            if let Some(content) = delta.content() {
                events.push(StreamEvent::content(content));
            }
        }

        if !events.is_empty() {
            self.emitted_any = true;
        }
        events
    }

    /// Fallback pass once the upstream stream is exhausted: when no frame
    /// ever yielded an event, reinterpret the accumulated raw payload as a
    /// single non-streaming completion response, or failing that, emit it
    /// verbatim. Data is never dropped silently.
    pub fn finish(&mut self) -> Vec<StreamEvent> {
        let raw = std::mem::take(&mut self.raw);
        if self.emitted_any || raw.is_empty() {
            return Vec::new();
        }
        fallback_events(&String::from_utf8_lossy(&raw))
    }
}

/// Interprets a complete raw payload that never produced incremental
/// events. Shared with the client consumer, which mirrors this fallback.
pub(crate) fn fallback_events(raw: &str) -> Vec<StreamEvent> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => {
            let message = value
                .get("choices")
                .and_then(|choices| choices.get(0))
                .and_then(|choice| choice.get("message"));
            let mut events = Vec::new();
            if let Some(message) = message {
                let reasoning = string_field(message, "reasoning_content")
                    .or_else(|| string_field(message, "thinking"));
                if let Some(reasoning) = reasoning {
                    events.push(StreamEvent::reasoning(reasoning));
                }
                if let Some(content) = string_field(message, "content") {
                    events.push(StreamEvent::content(content));
                }
            }
            events
        }
        Err(_) => vec![StreamEvent::content(raw)],
    }
}

fn string_field<'a>(message: &'a serde_json::Value, field: &str) -> Option<&'a str> {
    message
        .get(field)
        .and_then(|value| value.as_str())
        .filter(|s| !s.is_empty())
}

/// Async adapter over an upstream [`ByteStream`].
///
/// Events are queued so none is lost when a single chunk completes several
/// frames. A transport error is reported once and terminates the stream;
/// events already yielded stand.
pub struct EventStream {
    inner: ByteStream,
    reframer: Reframer,
    pending: VecDeque<StreamEvent>,
    done: bool,
}

impl EventStream {
    pub fn new(inner: ByteStream) -> Self {
        Self {
            inner,
            reframer: Reframer::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }
}

impl Stream for EventStream {
    type Item = Result<StreamEvent, CompletionError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if let Some(event) = this.pending.pop_front() {
                return Poll::Ready(Some(Ok(event)));
            }
            if this.done {
                return Poll::Ready(None);
            }
            if this.reframer.is_finished() {
                // Sentinel seen: stop reading upstream. The fallback still
                // runs in case the sentinel arrived without any frame.
                this.pending.extend(this.reframer.finish());
                this.done = true;
                continue;
            }

            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    this.pending.extend(this.reframer.push_chunk(&bytes));
                }
                Poll::Ready(Some(Err(error))) => {
                    this.done = true;
                    return Poll::Ready(Some(Err(error)));
                }
                Poll::Ready(None) => {
                    this.pending.extend(this.reframer.finish());
                    this.done = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
