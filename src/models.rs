//! Data structures shared by the registry, the pipeline stages and callers.

use serde::{Deserialize, Serialize};

/// Catalog entry describing one authored course module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
  /// Stable identifier used to look the module up.
  pub id: String,
  /// Curated module title shown in listings.
  pub title: String,
  /// Curated summary, independent of anything recovered from the document.
  #[serde(default)]
  pub description: String,
  /// Location of the raw authored document, resolved by the active fetcher.
  pub document_location: String,
  /// Runtime path prefix under which the module's images are served.
  pub asset_directory: String,
  /// Display sequence; only the relative ordering matters.
  #[serde(default)]
  pub order: i64,
}

impl ModuleDescriptor {
  /// Final non-empty segment of the asset directory, e.g. `Module 1` for `/modules/Module 1/`.
  ///
  /// Authoring tools embed this folder name in the absolute paths they write, so it doubles
  /// as the marker the asset rewriter searches for.
  pub fn directory_name(&self) -> &str {
    self
      .asset_directory
      .split(['/', '\\'])
      .filter(|segment| !segment.is_empty())
      .last()
      .unwrap_or("")
  }
}

/// Normalized, render-ready output for a single module.
///
/// Records are built once per normalization call and never change afterwards, so the
/// fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentRecord {
  id: String,
  title: String,
  description: String,
  styles: String,
  body: String,
}

impl ContentRecord {
  pub(crate) fn new(
    id: String,
    title: String,
    description: String,
    styles: String,
    body: String,
  ) -> Self {
    Self {
      id,
      title,
      description,
      styles,
      body,
    }
  }

  /// Identifier of the module this record was derived from.
  pub fn id(&self) -> &str {
    &self.id
  }

  /// Human-facing title. Never empty.
  pub fn title(&self) -> &str {
    &self.title
  }

  /// Human-facing description, possibly empty.
  pub fn description(&self) -> &str {
    &self.description
  }

  /// Raw stylesheet text lifted from the document, possibly empty.
  pub fn styles(&self) -> &str {
    &self.styles
  }

  /// Rewritten HTML fragment to inject into the display surface.
  pub fn body(&self) -> &str {
    &self.body
  }
}

/// Fields recovered from a document by the metadata extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedMetadata {
  /// Title from the `<title>` element or the cover heading, or the configured default.
  pub title: String,
  /// Description from the meta declaration or cover subtitle, or empty.
  pub description: String,
  /// Inner text of the first `<style>` block, or empty.
  pub styles: String,
  /// Inner text of `<body>`, or the whole document when no body boundary exists.
  pub body: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn descriptor(asset_directory: &str) -> ModuleDescriptor {
    ModuleDescriptor {
      id: "module-1".into(),
      title: "Module 1".into(),
      description: String::new(),
      document_location: "/modules/Module 1/index.html".into(),
      asset_directory: asset_directory.into(),
      order: 1,
    }
  }

  #[test]
  fn directory_name_uses_final_segment() {
    assert_eq!(descriptor("/modules/Module 1").directory_name(), "Module 1");
    assert_eq!(descriptor("/modules/Module 1/").directory_name(), "Module 1");
    assert_eq!(descriptor("assets\\Intro").directory_name(), "Intro");
    assert_eq!(descriptor("").directory_name(), "");
  }

  #[test]
  fn descriptor_reads_camel_case_entries() {
    let json = r#"{
      "id": "m2",
      "title": "Rigging",
      "description": "Ropes and knots",
      "documentLocation": "/modules/Module 2/index.html",
      "assetDirectory": "/modules/Module 2",
      "order": 20
    }"#;
    let parsed: ModuleDescriptor = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.document_location, "/modules/Module 2/index.html");
    assert_eq!(parsed.asset_directory, "/modules/Module 2");
    assert_eq!(parsed.order, 20);
  }

  #[test]
  fn record_serializes_all_fields() {
    let record = ContentRecord::new(
      "m1".into(),
      "Intro".into(),
      String::new(),
      "p { color: red; }".into(),
      "<p>Hi</p>".into(),
    );
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["id"], "m1");
    assert_eq!(value["title"], "Intro");
    assert_eq!(value["description"], "");
    assert_eq!(value["styles"], "p { color: red; }");
    assert_eq!(value["body"], "<p>Hi</p>");
  }
}
