//! Client-side consumer of the normalized NDJSON event stream.
//!
//! Mirrors the re-framer's wire shape: the same [`StreamEvent`] type and
//! the same byte-level line buffering, so the two sides cannot drift.

use crate::lines::LineBuffer;
use crate::reframer::{fallback_events, EventKind, StreamEvent};

/// Incrementally rebuilds the reasoning and content buffers from an NDJSON
/// event stream. Each event is applied as it arrives; rendering never waits
/// for stream completion. `content` is the canonical final answer text;
/// `reasoning` is retained for optional display.
#[derive(Debug, Default)]
pub struct StreamConsumer {
    lines: LineBuffer,
    raw: Vec<u8>,
    reasoning: String,
    content: String,
    saw_content: bool,
}

impl StreamConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one received chunk. Malformed lines are ignored; the stream
    /// keeps going.
    pub fn push_chunk(&mut self, chunk: &[u8]) {
        self.raw.extend_from_slice(chunk);
        for line in self.lines.push(chunk) {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let event: StreamEvent = match serde_json::from_str(trimmed) {
                Ok(event) => event,
                Err(_) => continue,
            };
            self.apply(event);
        }
    }

    /// Call once the stream has ended. When no content event was ever
    /// received, the accumulated raw payload is reinterpreted the same way
    /// the server-side re-framer does, so a non-streaming upstream reply
    /// passed through verbatim still yields text.
    pub fn finish(&mut self) {
        if self.saw_content || self.raw.is_empty() {
            return;
        }
        let raw = String::from_utf8_lossy(&std::mem::take(&mut self.raw)).into_owned();
        for event in fallback_events(&raw) {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: StreamEvent) {
        if event.delta.is_empty() {
            return;
        }
        match event.kind {
            EventKind::Reasoning => self.reasoning.push_str(&event.delta),
            EventKind::Content => {
                self.saw_content = true;
                self.content.push_str(&event.delta);
            }
        }
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
