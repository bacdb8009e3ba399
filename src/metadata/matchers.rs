//! Structural matchers evaluated in priority order for each extracted field.

use std::sync::OnceLock;

use regex::Regex;

use super::text::to_display_text;

/// How a matched fragment is turned into a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    /// Keep the fragment as authored, trimming only surrounding whitespace.
    Verbatim,
    /// Reduce the fragment to plain display text.
    Display,
}

impl TextMode {
    fn apply(self, fragment: &str) -> String {
        match self {
            Self::Verbatim => fragment.trim().to_string(),
            Self::Display => to_display_text(fragment),
        }
    }
}

/// One pattern in a field's fallback chain.
pub trait FieldMatcher: Send + Sync {
    /// Short name used in trace output.
    fn name(&self) -> &'static str;

    /// Return the field value if this pattern occurs in the document.
    fn extract(&self, document: &str) -> Option<String>;
}

/// Matcher taking the first capture group of a regular expression.
pub struct CaptureMatcher {
    name: &'static str,
    pattern: Regex,
    mode: TextMode,
}

impl CaptureMatcher {
    /// Wrap a pattern whose first capture group holds the value.
    pub fn new(name: &'static str, pattern: Regex, mode: TextMode) -> Self {
        Self {
            name,
            pattern,
            mode,
        }
    }
}

impl FieldMatcher for CaptureMatcher {
    fn name(&self) -> &'static str {
        self.name
    }

    fn extract(&self, document: &str) -> Option<String> {
        let caps = self.pattern.captures(document)?;
        caps.get(1).map(|value| self.mode.apply(value.as_str()))
    }
}

fn meta_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?is)<meta\b(?:[^>"']|"[^"]*"|'[^']*')*>"#).expect("invalid meta tag regex")
    })
}

fn attribute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?is)([a-z][a-z0-9:_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("invalid attribute regex")
    })
}

/// Matcher for `<meta name="..." content="...">`, with attributes in any order.
pub struct MetaContentMatcher {
    name: &'static str,
    meta_name: String,
}

impl MetaContentMatcher {
    /// Match meta declarations whose `name` equals `meta_name`, ignoring case.
    pub fn new(name: &'static str, meta_name: impl Into<String>) -> Self {
        Self {
            name,
            meta_name: meta_name.into(),
        }
    }
}

impl FieldMatcher for MetaContentMatcher {
    fn name(&self) -> &'static str {
        self.name
    }

    fn extract(&self, document: &str) -> Option<String> {
        for tag in meta_tag_pattern().find_iter(document) {
            let mut declared_name = None;
            let mut content = None;
            for caps in attribute_pattern().captures_iter(tag.as_str()) {
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .map(|value| value.as_str());
                match caps[1].to_ascii_lowercase().as_str() {
                    "name" => declared_name = value,
                    "content" => content = value,
                    _ => {}
                }
            }

            let is_match = declared_name
                .is_some_and(|declared| declared.trim().eq_ignore_ascii_case(&self.meta_name));
            if is_match {
                return content.map(|content| TextMode::Display.apply(content));
            }
        }
        None
    }
}

/// Matcher that always yields the whole document.
pub struct WholeDocumentMatcher;

impl FieldMatcher for WholeDocumentMatcher {
    fn name(&self) -> &'static str {
        "whole-document"
    }

    fn extract(&self, document: &str) -> Option<String> {
        Some(document.trim().to_string())
    }
}

/// Ordered fallback chain for a single field.
pub struct FieldChain {
    matchers: Vec<Box<dyn FieldMatcher>>,
    default: String,
}

impl FieldChain {
    /// Chain evaluated in order, yielding `default` when nothing matches.
    pub fn new(matchers: Vec<Box<dyn FieldMatcher>>, default: impl Into<String>) -> Self {
        Self {
            matchers,
            default: default.into(),
        }
    }

    /// Names of the matchers in evaluation order.
    pub fn matcher_names(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|matcher| matcher.name()).collect()
    }

    /// Value from the first matcher producing non-empty text, or the default.
    pub fn resolve(&self, document: &str) -> String {
        for matcher in &self.matchers {
            if let Some(value) = matcher.extract(document)
                && !value.is_empty()
            {
                tracing::trace!(matcher = matcher.name(), "field matched");
                return value;
            }
        }
        self.default.clone()
    }
}
