//! Heuristic recovery of title, description, styles and body from authored documents.
//!
//! Every field is resolved through an ordered [`FieldChain`]. The first structural match
//! wins and partial matches are never merged, so a malformed document degrades to
//! defaults instead of failing.

mod matchers;
mod text;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use matchers::{
    CaptureMatcher, FieldChain, FieldMatcher, MetaContentMatcher, TextMode, WholeDocumentMatcher,
};
pub use text::to_display_text;

use crate::models::ExtractedMetadata;

/// Title used when a document declares none.
pub const DEFAULT_TITLE: &str = "Module";

/// Markers the extractor looks for in authored documents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Title used when neither `<title>` nor a cover heading is present.
    pub default_title: String,
    /// Class marking the heading that carries the module's cover title.
    pub cover_title_class: String,
    /// Class marking the paragraph that carries the cover subtitle.
    pub cover_subtitle_class: String,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_TITLE.into(),
            cover_title_class: "cover-title".into(),
            cover_subtitle_class: "cover-subtitle".into(),
        }
    }
}

/// Recovers [`ExtractedMetadata`] from raw document text.
pub struct MetadataExtractor {
    title: FieldChain,
    description: FieldChain,
    styles: FieldChain,
    body: FieldChain,
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new(&ExtractionSettings::default())
    }
}

impl MetadataExtractor {
    /// Build the standard chains for the given markers.
    pub fn new(settings: &ExtractionSettings) -> Self {
        let default_title = if settings.default_title.trim().is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            settings.default_title.trim().to_string()
        };

        let title = FieldChain::new(
            vec![
                Box::new(CaptureMatcher::new(
                    "title-element",
                    compile(r"(?is)<title\b[^>]*>(.*?)</title\s*>"),
                    TextMode::Display,
                )),
                Box::new(CaptureMatcher::new(
                    "cover-heading",
                    compile(&classed_element_pattern(
                        "h[1-6]",
                        &settings.cover_title_class,
                    )),
                    TextMode::Display,
                )),
            ],
            default_title,
        );

        let description = FieldChain::new(
            vec![
                Box::new(MetaContentMatcher::new("meta-description", "description")),
                Box::new(CaptureMatcher::new(
                    "cover-subtitle",
                    compile(&classed_element_pattern("p", &settings.cover_subtitle_class)),
                    TextMode::Display,
                )),
            ],
            "",
        );

        let styles = FieldChain::new(
            vec![Box::new(CaptureMatcher::new(
                "style-block",
                compile(r"(?is)<style\b[^>]*>(.*?)</style\s*>"),
                TextMode::Verbatim,
            ))],
            "",
        );

        // An unclosed `<body>` still marks where content starts.
        let body = FieldChain::new(
            vec![
                Box::new(CaptureMatcher::new(
                    "body-element",
                    compile(r"(?is)<body\b[^>]*>(.*)</body\s*>"),
                    TextMode::Verbatim,
                )),
                Box::new(CaptureMatcher::new(
                    "body-open-to-end",
                    compile(r"(?is)<body\b[^>]*>(.*)\z"),
                    TextMode::Verbatim,
                )),
                Box::new(WholeDocumentMatcher),
            ],
            "",
        );

        Self {
            title,
            description,
            styles,
            body,
        }
    }

    /// Run every field chain over `document`.
    pub fn extract(&self, document: &str) -> ExtractedMetadata {
        ExtractedMetadata {
            title: self.title.resolve(document),
            description: self.description.resolve(document),
            styles: self.styles.resolve(document),
            body: self.body.resolve(document),
        }
    }

    /// Chain used for the title field.
    pub fn title_chain(&self) -> &FieldChain {
        &self.title
    }

    /// Chain used for the description field.
    pub fn description_chain(&self) -> &FieldChain {
        &self.description
    }
}

/// Pattern for the first `tag` element whose class list contains `class` as a whole token.
fn classed_element_pattern(tag: &str, class: &str) -> String {
    format!(
        r#"(?is)<(?:{tag})\b[^>]*\bclass\s*=\s*["'](?:[^"']*\s)?{class}(?:\s[^"']*)?["'][^>]*>(.*?)</(?:{tag})\s*>"#,
        class = regex::escape(class.trim()),
    )
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("invalid metadata regex")
}

#[cfg(test)]
mod tests {
    use super::*;

    const COVER_DOCUMENT: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>
    .cover { background: navy; }
  </style>
  <style>.ignored {}</style>
</head>
<body class="page">
  <h2 class="subtitle">Not this one</h2>
  <h1 class="hero cover-title large">Working at <em>Height</em></h1>
  <p class="cover-subtitle">Harnesses, anchors &amp; rescue</p>
  <img src="/modules/Module 1/harness.png">
</body>
</html>"#;

    #[test]
    fn title_element_takes_priority() {
        let extractor = MetadataExtractor::default();
        let document = r#"<title>Declared</title><h1 class="cover-title">Cover</h1>"#;
        assert_eq!(extractor.extract(document).title, "Declared");
    }

    #[test]
    fn falls_back_to_cover_heading_and_subtitle() {
        let extracted = MetadataExtractor::default().extract(COVER_DOCUMENT);
        assert_eq!(extracted.title, "Working at Height");
        assert_eq!(extracted.description, "Harnesses, anchors & rescue");
    }

    #[test]
    fn meta_description_takes_priority_over_subtitle() {
        let document = r#"<meta name="description" content=" Declared summary ">
<p class="cover-subtitle">Subtitle</p>"#;
        let extracted = MetadataExtractor::default().extract(document);
        assert_eq!(extracted.description, "Declared summary");
    }

    #[test]
    fn meta_description_with_angle_bracket_beats_subtitle() {
        let document = r#"<meta name="description" content="Loads > 25kg need two people">
<p class="cover-subtitle">Sub</p>"#;
        let extracted = MetadataExtractor::default().extract(document);
        assert_eq!(extracted.description, "Loads > 25kg need two people");
    }

    #[test]
    fn takes_first_style_block_verbatim() {
        let extracted = MetadataExtractor::default().extract(COVER_DOCUMENT);
        assert_eq!(extracted.styles, ".cover { background: navy; }");
    }

    #[test]
    fn takes_body_inner_markup() {
        let extracted = MetadataExtractor::default().extract(COVER_DOCUMENT);
        assert!(extracted.body.starts_with(r#"<h2 class="subtitle">"#));
        assert!(extracted.body.ends_with(r#"<img src="/modules/Module 1/harness.png">"#));
        assert!(!extracted.body.contains("<head>"));
    }

    #[test]
    fn defaults_when_markers_are_missing() {
        let document = "  <div><h1>Plain heading</h1><p>Text</p></div>\n";
        let extracted = MetadataExtractor::default().extract(document);
        assert_eq!(extracted.title, "Module");
        assert_eq!(extracted.description, "");
        assert_eq!(extracted.styles, "");
        assert_eq!(extracted.body, "<div><h1>Plain heading</h1><p>Text</p></div>");
    }

    #[test]
    fn whole_document_body_keeps_inline_styles() {
        let document = "<style>p{}</style>\n<p>Loose content</p>";
        let extracted = MetadataExtractor::default().extract(document);
        assert_eq!(extracted.styles, "p{}");
        assert_eq!(extracted.body, document);
    }

    #[test]
    fn unclosed_body_runs_to_end_of_document() {
        let document = "<head></head><body>\n<p>Cut short</p>\n";
        let extracted = MetadataExtractor::default().extract(document);
        assert_eq!(extracted.body, "<p>Cut short</p>");
    }

    #[test]
    fn cover_class_must_be_a_whole_token() {
        let document = r#"<h1 class="cover-title-large">Wide</h1>"#;
        assert_eq!(MetadataExtractor::default().extract(document).title, "Module");
    }

    #[test]
    fn honours_custom_settings() {
        let settings = ExtractionSettings {
            default_title: "Untitled lesson".into(),
            cover_title_class: "lesson-name".into(),
            cover_subtitle_class: "lesson-tagline".into(),
        };
        let extractor = MetadataExtractor::new(&settings);
        let document = r#"<h3 class="lesson-name">Bowlines</h3><p class='lesson-tagline'>Loops</p>"#;
        let extracted = extractor.extract(document);
        assert_eq!(extracted.title, "Bowlines");
        assert_eq!(extracted.description, "Loops");
        assert_eq!(extractor.extract("<p>none</p>").title, "Untitled lesson");
    }

    #[test]
    fn blank_default_title_falls_back_to_module() {
        let settings = ExtractionSettings {
            default_title: "  ".into(),
            ..ExtractionSettings::default()
        };
        assert_eq!(MetadataExtractor::new(&settings).extract("").title, "Module");
    }

    #[test]
    fn chains_are_ordered() {
        let extractor = MetadataExtractor::default();
        assert_eq!(extractor.title_chain().matcher_names(), vec![
            "title-element",
            "cover-heading"
        ]);
        assert_eq!(extractor.description_chain().matcher_names(), vec![
            "meta-description",
            "cover-subtitle"
        ]);
    }
}
