//! Final composition of a [`ContentRecord`].

use crate::models::{ContentRecord, ExtractedMetadata};

/// Composes extracted metadata with optional curated values.
///
/// Declared title and description win over extracted ones whenever they hold non-blank
/// text; blank declarations leave the extracted value in place.
#[derive(Debug, Clone)]
pub struct ContentRecordBuilder {
  id: String,
  extracted: ExtractedMetadata,
  declared_title: Option<String>,
  declared_description: Option<String>,
}

impl ContentRecordBuilder {
  /// Start from what the extractor recovered for module `id`.
  pub fn new(id: impl Into<String>, extracted: ExtractedMetadata) -> Self {
    Self {
      id: id.into(),
      extracted,
      declared_title: None,
      declared_description: None,
    }
  }

  /// Curated title that overrides the extracted one when non-blank.
  pub fn declared_title(mut self, title: impl Into<String>) -> Self {
    self.declared_title = non_blank(title.into());
    self
  }

  /// Curated description that overrides the extracted one when non-blank.
  pub fn declared_description(mut self, description: impl Into<String>) -> Self {
    self.declared_description = non_blank(description.into());
    self
  }

  /// Produce the immutable record.
  pub fn build(self) -> ContentRecord {
    let ExtractedMetadata {
      title,
      description,
      styles,
      body,
    } = self.extracted;

    ContentRecord::new(
      self.id,
      self.declared_title.unwrap_or(title),
      self.declared_description.unwrap_or(description),
      styles,
      body,
    )
  }
}

fn non_blank(value: String) -> Option<String> {
  let trimmed = value.trim();
  (!trimmed.is_empty()).then(|| trimmed.to_string())
}
