//! Attribute-level rewriting of authored documents.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::trace;

use super::filters::is_external_reference;
use super::rules::{AssetRule, AssetTarget, default_rules};
use crate::models::ModuleDescriptor;

fn start_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?s)<[a-zA-Z](?:[^>"']|"[^"]*"|'[^']*')*>"#)
            .expect("invalid start tag regex")
    })
}

fn quoted_attribute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"([a-zA-Z_:][\w:.-]*)(\s*=\s*)(?:"([^"]*)"|'([^']*)')"#)
            .expect("invalid attribute regex")
    })
}

/// `src` itself or a prefixed variant such as `data-src`.
fn is_source_attribute(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name == "src" || name.ends_with("-src")
}

/// Rewrites authoring-time image paths in a document so they resolve under a module's
/// runtime asset directory.
pub struct AssetPathRewriter {
    target: AssetTarget,
    rules: Vec<Box<dyn AssetRule>>,
}

impl AssetPathRewriter {
    /// Rewriter for a target using the default directory-qualified then bare-filename chain.
    pub fn new(target: AssetTarget) -> Self {
        Self::with_rules(target, default_rules())
    }

    /// Rewriter with a caller-supplied rule chain, evaluated in order.
    pub fn with_rules(target: AssetTarget, rules: Vec<Box<dyn AssetRule>>) -> Self {
        Self { target, rules }
    }

    /// Rewriter anchored at a registered module's asset directory.
    pub fn for_module(descriptor: &ModuleDescriptor) -> Self {
        Self::new(AssetTarget::new(
            descriptor.asset_directory.clone(),
            descriptor.directory_name(),
        ))
    }

    /// Target references are rewritten towards.
    pub fn target(&self) -> &AssetTarget {
        &self.target
    }

    /// Rewrite a single reference value, returning `None` when no rule claims it.
    pub fn rewrite_reference(&self, reference: &str) -> Option<String> {
        let trimmed = reference.trim();
        if trimmed.is_empty() || is_external_reference(trimmed) {
            return None;
        }

        self.rules.iter().find_map(|rule| {
            let rewritten = rule.rewrite(trimmed, &self.target)?;
            trace!(rule = rule.name(), from = trimmed, to = %rewritten, "rewrote asset reference");
            Some(rewritten)
        })
    }

    /// Rewrite every `src` attribute value in `document`, leaving all other text untouched.
    ///
    /// Only attributes inside start tags are considered. Quote style is preserved and
    /// unclassifiable references are kept verbatim.
    pub fn rewrite_document<'d>(&self, document: &'d str) -> Cow<'d, str> {
        start_tag_pattern().replace_all(document, |tag: &Captures| {
            quoted_attribute_pattern()
                .replace_all(&tag[0], |attribute: &Captures| self.rewrite_attribute(attribute))
                .into_owned()
        })
    }

    fn rewrite_attribute(&self, attribute: &Captures) -> String {
        let name = &attribute[1];
        if !is_source_attribute(name) {
            return attribute[0].to_string();
        }

        let separator = &attribute[2];
        let (quote, value) = match (attribute.get(3), attribute.get(4)) {
            (Some(value), _) => ('"', value.as_str()),
            (None, Some(value)) => ('\'', value.as_str()),
            (None, None) => return attribute[0].to_string(),
        };

        match self.rewrite_reference(value) {
            Some(rewritten) => format!("{name}{separator}{quote}{rewritten}{quote}"),
            None => attribute[0].to_string(),
        }
    }
}

impl std::fmt::Debug for AssetPathRewriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rules: Vec<&str> = self.rules.iter().map(|rule| rule.name()).collect();
        f.debug_struct("AssetPathRewriter")
            .field("target", &self.target)
            .field("rules", &rules)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter() -> AssetPathRewriter {
        AssetPathRewriter::new(AssetTarget::new("/modules/Module 1", "Module 1"))
    }

    #[test]
    fn rewrites_directory_qualified_reference() {
        let document = r#"<img src="/Users/ana/Course/Module 1/diagram.png" alt="Diagram">"#;
        assert_eq!(
            rewriter().rewrite_document(document),
            r#"<img src="/modules/Module 1/diagram.png" alt="Diagram">"#
        );
    }

    #[test]
    fn rewrites_bare_filename_reference() {
        let document = r#"<img class="hero" src='/Users/ana/temp/xyz/photo.jpg'>"#;
        assert_eq!(
            rewriter().rewrite_document(document),
            r#"<img class="hero" src='/modules/Module 1/photo.jpg'>"#
        );
    }

    #[test]
    fn leaves_unclassified_references_alone() {
        let document = concat!(
            r#"<script src="/Users/ana/data.json"></script>"#,
            r#"<img src="https://cdn.example.com/Module 1/a.png">"#,
            r#"<img src="images/local.png">"#,
        );
        assert_eq!(rewriter().rewrite_document(document), document);
    }

    #[test]
    fn does_not_touch_text_outside_attributes() {
        let document = "<p>Saved at /Users/ana/Course/Module 1/diagram.png</p>";
        assert_eq!(rewriter().rewrite_document(document), document);
    }

    #[test]
    fn src_lookalikes_in_text_are_not_attributes() {
        let document = concat!(
            r#"<p>Set src="/Users/ana/x.png" in your editor</p>"#,
            r#"<img alt="was src='/Users/ana/y.png'" src="/Users/ana/z.png">"#,
        );
        assert_eq!(
            rewriter().rewrite_document(document),
            concat!(
                r#"<p>Set src="/Users/ana/x.png" in your editor</p>"#,
                r#"<img alt="was src='/Users/ana/y.png'" src="/modules/Module 1/z.png">"#,
            )
        );
    }

    #[test]
    fn protocol_relative_urls_are_left_alone() {
        let document = r#"<img src="//cdn.example.com/brand/logo.png">"#;
        assert_eq!(rewriter().rewrite_document(document), document);
        assert_eq!(rewriter().rewrite_reference("//cdn.example.com/Module 1/a.png"), None);
    }

    #[test]
    fn directory_rule_wins_over_bare_rule() {
        let rewritten = rewriter()
            .rewrite_reference("/Users/ana/Course/Module 1/diagram.png")
            .unwrap();
        assert_eq!(rewritten, "/modules/Module 1/diagram.png");
    }

    #[test]
    fn rewriting_is_idempotent() {
        let document = concat!(
            r#"<img src="/Users/ana/Course/Module 1/diagram.png">"#,
            r#"<img SRC = "C:\temp\xyz\photo.JPEG">"#,
            r#"<img data-src="/Users/ana/Module%201/lazy.gif">"#,
            r#"<a href="/Users/ana/data.json">data</a>"#,
        );
        let once = rewriter().rewrite_document(document).into_owned();
        let twice = rewriter().rewrite_document(&once).into_owned();
        assert_eq!(once, twice);
        assert!(once.contains(r#"src="/modules/Module 1/diagram.png""#));
        assert!(once.contains(r#"SRC = "/modules/Module 1/photo.JPEG""#));
        assert!(once.contains(r#"data-src="/modules/Module 1/lazy.gif""#));
    }

    #[test]
    fn for_module_uses_descriptor_directory() {
        let descriptor = ModuleDescriptor {
            id: "m3".into(),
            title: "Knots".into(),
            description: String::new(),
            document_location: "/modules/Module 3/index.html".into(),
            asset_directory: "/modules/Module 3/".into(),
            order: 3,
        };
        let rewriter = AssetPathRewriter::for_module(&descriptor);
        assert_eq!(
            rewriter.rewrite_reference("/Volumes/work/Module 3/bowline.svg").as_deref(),
            Some("/modules/Module 3/bowline.svg")
        );
    }
}
