use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::DocumentFetcher;
use crate::error::{RetrievalError, TransportStatus};

/// Reads documents from a directory, treating locations as paths relative to its root.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    /// Serve documents from beneath `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory locations are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path for a location. Leading separators are dropped so site-absolute
    /// locations such as `/modules/Module 1/index.html` stay under the root.
    pub fn resolve(&self, location: &str) -> PathBuf {
        self.root.join(location.trim_start_matches(['/', '\\']))
    }
}

#[async_trait]
impl DocumentFetcher for FileFetcher {
    async fn fetch(&self, location: &str) -> Result<String, RetrievalError> {
        let path = self.resolve(location);
        debug!(location, path = %path.display(), "reading document");
        fs::read_to_string(&path)
            .await
            .map_err(|err| RetrievalError::new(location, TransportStatus::Io(err.kind())))
    }
}
