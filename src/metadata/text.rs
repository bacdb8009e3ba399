//! Cleanup applied to human-facing fields recovered from markup.

use std::sync::OnceLock;

use regex::Regex;

fn line_break_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").expect("invalid line break regex"))
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("invalid tag regex"))
}

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("invalid whitespace regex"))
}

const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    // Last, so `&amp;lt;` decodes to `&lt;` rather than `<`.
    ("&amp;", "&"),
];

/// Reduce a markup fragment to plain display text.
///
/// Tags are dropped (line breaks become spaces), the common named entities are decoded
/// and whitespace runs collapse to a single space.
pub fn to_display_text(fragment: &str) -> String {
    let spaced = line_break_pattern().replace_all(fragment, " ");
    let stripped = tag_pattern().replace_all(&spaced, "");
    let decoded = decode_entities(&stripped);
    whitespace_pattern()
        .replace_all(decoded.trim(), " ")
        .into_owned()
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, replacement)| {
            acc.replace(entity, replacement)
        })
}

#[cfg(test)]
mod tests {
    use super::to_display_text;

    #[test]
    fn strips_tags_and_collapses_whitespace() {
        assert_eq!(
            to_display_text("  Working <em>Safely</em><br/>\n   at   Height "),
            "Working Safely at Height"
        );
    }

    #[test]
    fn decodes_common_entities() {
        assert_eq!(to_display_text("Ropes &amp; Knots&nbsp;101"), "Ropes & Knots 101");
        assert_eq!(to_display_text("&lt;intro&gt;"), "<intro>");
        assert_eq!(to_display_text("&amp;lt;"), "&lt;");
    }

    #[test]
    fn empty_markup_becomes_empty_text() {
        assert_eq!(to_display_text("<span> </span>"), "");
    }
}
