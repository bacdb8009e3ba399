use std::collections::BTreeMap;
use std::io::ErrorKind;

use async_trait::async_trait;
use tracing::debug;

use super::DocumentFetcher;
use crate::error::{RetrievalError, TransportStatus};

/// Serves documents from an in-memory table keyed by location.
///
/// Useful for embedding fixed documents into a binary and as a test double.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    documents: BTreeMap<String, String>,
}

impl StaticFetcher {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`StaticFetcher::insert`].
    pub fn with_document(mut self, location: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(location, text);
        self
    }

    /// Store `text` under `location`, replacing any previous document.
    pub fn insert(&mut self, location: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(location.into(), text.into());
    }
}

#[async_trait]
impl DocumentFetcher for StaticFetcher {
    async fn fetch(&self, location: &str) -> Result<String, RetrievalError> {
        debug!(location, "serving document from memory");
        self.documents
            .get(location)
            .cloned()
            .ok_or_else(|| RetrievalError::new(location, TransportStatus::Io(ErrorKind::NotFound)))
    }
}
