//! Download file-name derivation.

use regex::Regex;

/// Used when neither the caller nor the content supplies a usable title.
pub const DEFAULT_BASE_NAME: &str = "公文";

const FORBIDDEN: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Derives the base name (without extension) for an exported document.
///
/// An explicit non-blank name from the caller wins. Otherwise the content is
/// scanned for a `【标题】` tag line and its payload is used. Characters that
/// are invalid in file names on common platforms are replaced with `_`.
pub fn derive_base_name(content: &str, explicit: Option<&str>) -> String {
    if let Some(name) = explicit {
        let name = name.trim();
        if !name.is_empty() {
            return sanitize(name);
        }
    }

    let title_re =
        Regex::new(r"(?m)^[【\[]\s*标题\s*[】\]]\s*([^\r\n]+)").expect("Invalid title regex");
    if let Some(caps) = title_re.captures(content) {
        let title = caps[1].trim();
        if !title.is_empty() {
            return sanitize(title);
        }
    }

    DEFAULT_BASE_NAME.to_string()
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_name_wins() {
        let name = derive_base_name("【标题】关于某事的通知\n正文。", Some("我的文件"));
        assert_eq!(name, "我的文件");
    }

    #[test]
    fn test_blank_explicit_name_falls_through_to_title() {
        let name = derive_base_name("【标题】关于某事的通知\n正文。", Some("  "));
        assert_eq!(name, "关于某事的通知");
    }

    #[test]
    fn test_title_extracted_from_content() {
        let name = derive_base_name("前言\n【标题】季度工作报告\n正文。", None);
        assert_eq!(name, "季度工作报告");
    }

    #[test]
    fn test_half_width_brackets() {
        let name = derive_base_name("[标题] 会议纪要\n正文。", None);
        assert_eq!(name, "会议纪要");
    }

    #[test]
    fn test_default_when_no_title() {
        assert_eq!(derive_base_name("只有正文。", None), DEFAULT_BASE_NAME);
    }

    #[test]
    fn test_forbidden_characters_replaced() {
        let name = derive_base_name("", Some("报告/2024:第*1?期"));
        assert_eq!(name, "报告_2024_第_1_期");
    }

    #[test]
    fn test_empty_content_and_no_explicit() {
        assert_eq!(derive_base_name("", None), DEFAULT_BASE_NAME);
    }
}
