//! End-to-end normalization: registry lookup, fetch, asset rewrite, extraction, composition.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::asset_paths::AssetPathRewriter;
use crate::error::NormalizeError;
use crate::fetcher::DocumentFetcher;
use crate::metadata::MetadataExtractor;
use crate::models::{ContentRecord, ModuleDescriptor};
use crate::record::ContentRecordBuilder;
use crate::registry::ModuleRegistry;

/// Outcome of normalizing one module as part of a batch.
pub type ModuleOutcome = (String, Result<ContentRecord, NormalizeError>);

/// Turns registered module ids into render-ready [`ContentRecord`]s.
///
/// Each call owns its own intermediate text; the only shared state is the read-only
/// registry and extractor.
pub struct ContentPipeline<F> {
  registry: Arc<ModuleRegistry>,
  fetcher: F,
  extractor: MetadataExtractor,
}

impl<F: DocumentFetcher> ContentPipeline<F> {
  /// Pipeline using the default extraction markers.
  pub fn new(registry: Arc<ModuleRegistry>, fetcher: F) -> Self {
    Self::with_extractor(registry, fetcher, MetadataExtractor::default())
  }

  /// Pipeline with a custom extractor.
  pub fn with_extractor(
    registry: Arc<ModuleRegistry>,
    fetcher: F,
    extractor: MetadataExtractor,
  ) -> Self {
    Self {
      registry,
      fetcher,
      extractor,
    }
  }

  /// Registry backing this pipeline.
  pub fn registry(&self) -> &ModuleRegistry {
    &self.registry
  }

  /// Registered modules in display order.
  pub fn catalog(&self) -> &[ModuleDescriptor] {
    self.registry.list_all()
  }

  /// Fetch and normalize the module registered under `id`.
  ///
  /// Suspends only while the document is fetched. Dropping the future before then leaves
  /// nothing to clean up.
  #[instrument(skip(self))]
  pub async fn normalize(&self, id: &str) -> Result<ContentRecord, NormalizeError> {
    let Some(descriptor) = self.registry.lookup(id) else {
      debug!("module is not registered");
      return Err(NormalizeError::NotFound(id.to_string()));
    };

    let raw = match self.fetcher.fetch(&descriptor.document_location).await {
      Ok(raw) => raw,
      Err(err) => {
        warn!(location = %err.location, status = %err.status, "failed to retrieve module document");
        return Err(err.into());
      }
    };

    let record = self.normalize_document(descriptor, &raw);
    debug!(bytes = raw.len(), title = record.title(), "normalized module");
    Ok(record)
  }

  /// Run the synchronous stages over an already retrieved document.
  pub fn normalize_document(&self, descriptor: &ModuleDescriptor, raw: &str) -> ContentRecord {
    let rewritten = AssetPathRewriter::for_module(descriptor).rewrite_document(raw);
    let extracted = self.extractor.extract(&rewritten);

    ContentRecordBuilder::new(descriptor.id.clone(), extracted)
      .declared_title(descriptor.title.clone())
      .declared_description(descriptor.description.clone())
      .build()
  }

  /// Normalize every registered module in catalog order, one at a time.
  pub async fn normalize_all(&self) -> Vec<ModuleOutcome> {
    let mut outcomes = Vec::with_capacity(self.registry.len());
    for descriptor in self.registry.list_all() {
      let outcome = self.normalize(&descriptor.id).await;
      outcomes.push((descriptor.id.clone(), outcome));
    }

    let failures = outcomes.iter().filter(|(_, outcome)| outcome.is_err()).count();
    info!(total = outcomes.len(), failures, "normalized catalog");
    outcomes
  }
}
