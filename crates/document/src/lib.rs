//! Plain-text to styled Word document transcoding
//!
//! Converts a finished plain-text draft into a `.docx` laid out per the
//! official-document conventions the rest of the system targets: a centered
//! title, bold first-level headings, justified body text with a first-line
//! indent, and a right-aligned signature block, all at fixed line spacing
//! and fixed page margins.
//!
//! Classification is a deterministic single pass over the input lines:
//! identical input always yields an identical paragraph sequence.
//!
//! Two behaviors are deliberate and documented here:
//!
//! - Blank lines are skipped outright; no empty spacer paragraph is
//!   emitted. Paragraph spacing comes from the fixed before/after values.
//! - Signature detection (finding the issuer and date lines near the end
//!   of the text) is best-effort pattern matching on free text. A line
//!   that merely contains 年/月/日 can be misread as a date line; callers
//!   should treat the right-aligned signature block as a heuristic, not a
//!   guarantee.

pub mod classify;
pub mod filename;
pub mod render;
pub mod style;

pub use classify::{Classifier, ClassifiedLine, LineKind};
pub use filename::{derive_base_name, DEFAULT_BASE_NAME};
pub use render::{transcode, ExportError};
pub use style::ParagraphStyle;
