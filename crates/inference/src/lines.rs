//! Byte-level line buffering shared by the SSE re-framer and the NDJSON
//! consumer.

/// Accumulates arbitrarily fragmented byte chunks and yields complete
/// newline-terminated lines. The trailing incomplete segment stays buffered
/// until the next chunk, so a line (or a multi-byte UTF-8 sequence inside
/// one) split across chunk boundaries is never parsed partially.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk and returns every complete line it unlocked, in
    /// order. Returned lines include their trailing newline (and carriage
    /// return, when present); callers trim.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Whatever is buffered after the last newline.
    pub fn remainder(&self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_lines_in_one_chunk() {
        let mut buffer = LineBuffer::new();
        let lines = buffer.push(b"data: a\ndata: b\n");
        assert_eq!(lines, vec!["data: a\n", "data: b\n"]);
        assert_eq!(buffer.remainder(), "");
    }

    #[test]
    fn test_incomplete_tail_is_retained() {
        let mut buffer = LineBuffer::new();
        let lines = buffer.push(b"data: a\ndata: b");
        assert_eq!(lines, vec!["data: a\n"]);
        assert_eq!(buffer.remainder(), "data: b");

        let lines = buffer.push(b"c\n");
        assert_eq!(lines, vec!["data: bc\n"]);
        assert_eq!(buffer.remainder(), "");
    }

    #[test]
    fn test_crlf_is_preserved_for_caller_trim() {
        let mut buffer = LineBuffer::new();
        let lines = buffer.push(b"data: a\r\n");
        assert_eq!(lines, vec!["data: a\r\n"]);
    }

    #[test]
    fn test_multibyte_utf8_split_across_chunks() {
        let mut buffer = LineBuffer::new();
        let text = "data: 你好\n".as_bytes();

        // Split in the middle of 好 (3-byte sequence)
        let lines = buffer.push(&text[..9]);
        assert!(lines.is_empty());
        let lines = buffer.push(&text[9..]);
        assert_eq!(lines, vec!["data: 你好\n"]);
    }

    #[test]
    fn test_chunking_invariance_byte_by_byte() {
        let input = "data: {\"a\":1}\n\ndata: 第二行\n".as_bytes();

        let mut all_at_once = LineBuffer::new();
        let expected = all_at_once.push(input);

        let mut byte_wise = LineBuffer::new();
        let mut collected = Vec::new();
        for byte in input {
            collected.extend(byte_wise.push(std::slice::from_ref(byte)));
        }
        assert_eq!(collected, expected);
    }
}
