//! Line classification for the transcoder.

use std::collections::HashSet;

use regex::Regex;

/// Role a non-blank line plays in the exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Heading1,
    Heading2,
    Salutation,
    Body,
    Signature,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub kind: LineKind,
    pub text: String,
}

impl ClassifiedLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Deterministic line classifier.
///
/// Tag lines (【标签】 or [标签]) win over everything; then first- and
/// second-level heading patterns; the rest is body unless the signature
/// scan marked the line. The 文种 tag is metadata and yields no paragraph.
pub struct Classifier {
    tag: Regex,
    heading1: Regex,
    heading2: Regex,
    attachment: Regex,
    sentence_punct: Regex,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            tag: Regex::new(r"^[【\[]([^】\]]+)[】\]](.*)$").expect("invalid tag pattern"),
            heading1: Regex::new(r"^[一二三四五六七八九十]+、").expect("invalid heading1 pattern"),
            heading2: Regex::new(r"^（[一二三四五六七八九十]+）").expect("invalid heading2 pattern"),
            attachment: Regex::new(r"^附件[:：]").expect("invalid attachment pattern"),
            sentence_punct: Regex::new(r"[。！？?：:；;，,]").expect("invalid punctuation pattern"),
        }
    }

    /// Classifies a full document in one pass. Blank lines yield nothing.
    pub fn classify(&self, content: &str) -> Vec<ClassifiedLine> {
        let lines: Vec<&str> = content.lines().collect();
        let trimmed: Vec<&str> = lines.iter().map(|line| line.trim()).collect();
        let signature = self.signature_indices(&trimmed);

        let mut out = Vec::new();
        for (idx, raw) in lines.iter().enumerate() {
            let line = raw.trim_end();
            if line.trim().is_empty() {
                continue;
            }

            if let Some(caps) = self.tag.captures(line) {
                let tag = caps[1].trim().to_string();
                let rest = caps[2].trim().to_string();
                let text = if rest.is_empty() {
                    line.to_string()
                } else {
                    rest
                };

                match tag.as_str() {
                    // Document-type tag is metadata only, never a paragraph.
                    "文种" => continue,
                    "标题" => out.push(ClassifiedLine::new(LineKind::Title, text)),
                    "主送机关" | "主送对象" | "主送单位" => {
                        out.push(ClassifiedLine::new(LineKind::Salutation, text))
                    }
                    _ => {
                        let kind = if signature.contains(&idx) {
                            LineKind::Signature
                        } else {
                            LineKind::Body
                        };
                        out.push(ClassifiedLine::new(kind, text));
                    }
                }
                continue;
            }

            let t = line.trim();
            if self.heading1.is_match(t) {
                out.push(ClassifiedLine::new(LineKind::Heading1, t));
            } else if self.heading2.is_match(t) {
                out.push(ClassifiedLine::new(LineKind::Heading2, t));
            } else {
                let kind = if signature.contains(&idx) {
                    LineKind::Signature
                } else {
                    LineKind::Body
                };
                out.push(ClassifiedLine::new(kind, line));
            }
        }

        tracing::debug!(paragraphs = out.len(), "classified document lines");
        out
    }

    /// Marks the trailing issuer and date lines so they render
    /// right-aligned. Best-effort: scans upward from the end for the first
    /// line containing 年, 月 and 日 (skipping blanks and attachment
    /// lines), then checks the line above it for an issuer name — a line
    /// with sentence punctuation is an ordinary sentence and stops the
    /// scan unmarked.
    fn signature_indices(&self, trimmed: &[&str]) -> HashSet<usize> {
        let mut marked = HashSet::new();

        let mut date_index = None;
        for i in (0..trimmed.len()).rev() {
            let t = trimmed[i];
            if t.is_empty() {
                continue;
            }
            if self.attachment.is_match(t) {
                continue;
            }
            if t.contains('年') && t.contains('月') && t.contains('日') {
                date_index = Some(i);
                break;
            }
        }

        if let Some(date_index) = date_index {
            marked.insert(date_index);
            for j in (0..date_index).rev() {
                let t = trimmed[j];
                if t.is_empty() {
                    continue;
                }
                if self.attachment.is_match(t) {
                    break;
                }
                if self.sentence_punct.is_match(t) {
                    break;
                }
                marked.insert(j);
                break;
            }
        }

        marked
    }
}
