use regex::Regex;
use std::sync::OnceLock;

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

/// Removes markup tags from catalog text and trims the result.
///
/// Absent or empty input yields an empty string.
pub fn strip_html_tags(text: Option<&str>) -> String {
    match text {
        Some(text) if !text.is_empty() => tag_re().replace_all(text, "").trim().to_string(),
        _ => String::new(),
    }
}
