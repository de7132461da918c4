//! Renders classified lines into a `.docx` byte buffer.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, Docx, Footer, LineSpacing, LineSpacingType, PageMargin, PageNum, Paragraph,
    Run, RunFonts, SpecialIndentType,
};
use thiserror::Error;

use crate::classify::{ClassifiedLine, Classifier};
use crate::style::{
    ParagraphStyle, LINE_SPACING, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP,
    PARAGRAPH_SPACING,
};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to pack document: {0}")]
    Pack(String),
}

/// Converts plain generated text into a styled Word document.
///
/// Classification and styling are applied per line; the result is the
/// complete file content, ready to be written or sent as a download.
pub fn transcode(content: &str) -> Result<Vec<u8>, ExportError> {
    let classifier = Classifier::new();
    let lines = classifier.classify(content);
    render(&lines)
}

fn render(lines: &[ClassifiedLine]) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .page_margin(
            PageMargin::new()
                .top(MARGIN_TOP)
                .bottom(MARGIN_BOTTOM)
                .left(MARGIN_LEFT)
                .right(MARGIN_RIGHT),
        )
        .footer(Footer::new().add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_page_num(PageNum::new()),
        ));

    for line in lines {
        docx = docx.add_paragraph(styled_paragraph(line));
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| ExportError::Pack(e.to_string()))?;

    let bytes = cursor.into_inner();
    tracing::debug!(paragraphs = lines.len(), size = bytes.len(), "Packed document");
    Ok(bytes)
}

fn styled_paragraph(line: &ClassifiedLine) -> Paragraph {
    let style = ParagraphStyle::for_kind(line.kind);

    let mut run = Run::new()
        .add_text(line.text.as_str())
        .fonts(RunFonts::new().ascii(style.font).east_asia(style.font))
        .size(style.size);
    if style.bold {
        run = run.bold();
    }

    let mut paragraph = Paragraph::new()
        .add_run(run)
        .align(style.alignment)
        .line_spacing(
            LineSpacing::new()
                .line_rule(LineSpacingType::Exact)
                .line(LINE_SPACING)
                .before(PARAGRAPH_SPACING)
                .after(PARAGRAPH_SPACING),
        );

    if let Some(indent) = style.first_line_indent {
        paragraph = paragraph.indent(None, Some(SpecialIndentType::FirstLine(indent)), None, None);
    }

    paragraph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcode_produces_zip_container() {
        let content = "【标题】关于开展安全检查的通知\n各科室：\n一、检查范围\n（一）重点区域\n具体内容如下。\n城市管理局\n2024年5月1日";
        let bytes = transcode(content).unwrap();
        // A .docx file is a ZIP archive; check the local file header magic.
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_transcode_empty_content() {
        let bytes = transcode("").unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_transcode_body_only() {
        let bytes = transcode("这是一段正文。\n这是第二段。").unwrap();
        assert!(bytes.len() > 100);
    }
}
