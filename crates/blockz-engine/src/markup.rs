use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Whitespace that counts as blank around markup. Non-breaking spaces and
/// entities such as `&nbsp;` are content.
const BLANK_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Remove every tag (and HTML comment) from `html`, keeping the text between them.
pub fn strip_tags(html: &str) -> Cow<'_, str> {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    let tags =
        TAG_REGEX.get_or_init(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("Invalid tag regex"));
    tags.replace_all(html, "")
}

pub fn is_blank(text: &str) -> bool {
    text.trim_matches(BLANK_CHARS).is_empty()
}
