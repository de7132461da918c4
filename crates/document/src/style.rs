//! Fixed styling table for the exported document.
//!
//! These values are compatibility requirements, not preferences: consumers
//! of the exported files expect exactly this layout. All measurements are
//! in twips (1/20 pt; 1 mm ≈ 56.7 twips).

use docx_rs::AlignmentType;

use crate::classify::LineKind;

/// Exact line spacing for every paragraph: 28 pt.
pub const LINE_SPACING: i32 = 560;
/// Spacing before and after each paragraph: about half a line.
pub const PARAGRAPH_SPACING: u32 = 120;
/// Body first-line indent: 11 mm, about two CJK character widths.
pub const FIRST_LINE_INDENT: i32 = 624;

// Page margins: top 37 mm, bottom 35 mm, left 28 mm, right 26 mm.
pub const MARGIN_TOP: i32 = 2098;
pub const MARGIN_BOTTOM: i32 = 1985;
pub const MARGIN_LEFT: i32 = 1588;
pub const MARGIN_RIGHT: i32 = 1474;

pub const FONT_TITLE: &str = "方正小标宋简体";
pub const FONT_HEADING1: &str = "黑体";
pub const FONT_HEADING2: &str = "楷体";
pub const FONT_BODY: &str = "仿宋_GB2312";

/// 二号, about 22 pt (half-points).
pub const SIZE_TITLE: usize = 44;
/// 三号, about 16 pt (half-points).
pub const SIZE_BODY: usize = 32;

/// Styling derived from a line's role. Pure function of [`LineKind`].
#[derive(Debug, Clone)]
pub struct ParagraphStyle {
    pub alignment: AlignmentType,
    pub font: &'static str,
    pub size: usize,
    pub bold: bool,
    pub first_line_indent: Option<i32>,
}

impl ParagraphStyle {
    pub fn for_kind(kind: LineKind) -> Self {
        match kind {
            LineKind::Title => Self {
                alignment: AlignmentType::Center,
                font: FONT_TITLE,
                size: SIZE_TITLE,
                bold: false,
                first_line_indent: None,
            },
            LineKind::Heading1 => Self {
                alignment: AlignmentType::Both,
                font: FONT_HEADING1,
                size: SIZE_BODY,
                bold: true,
                first_line_indent: None,
            },
            // Second-level headings keep the body's first-line indent.
            LineKind::Heading2 => Self {
                alignment: AlignmentType::Both,
                font: FONT_HEADING2,
                size: SIZE_BODY,
                bold: false,
                first_line_indent: Some(FIRST_LINE_INDENT),
            },
            // Salutation sits flush with the margin, body font.
            LineKind::Salutation => Self {
                alignment: AlignmentType::Both,
                font: FONT_BODY,
                size: SIZE_BODY,
                bold: false,
                first_line_indent: None,
            },
            LineKind::Body => Self {
                alignment: AlignmentType::Both,
                font: FONT_BODY,
                size: SIZE_BODY,
                bold: false,
                first_line_indent: Some(FIRST_LINE_INDENT),
            },
            LineKind::Signature => Self {
                alignment: AlignmentType::Right,
                font: FONT_BODY,
                size: SIZE_BODY,
                bold: false,
                first_line_indent: None,
            },
        }
    }
}
