//! Retrieval of raw authored documents.
//!
//! Fetching is the only suspension point of the pipeline. Implementations perform a single
//! attempt and report non-success outcomes as [`RetrievalError`]; retry and timeout policy
//! belong to the caller or the transport.

mod file;
mod http;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;

pub use file::FileFetcher;
pub use http::HttpFetcher;
pub use memory::StaticFetcher;

use crate::error::RetrievalError;

/// Text-retrieval capability supplied by the hosting environment.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Return the full text stored at `location`.
    async fn fetch(&self, location: &str) -> Result<String, RetrievalError>;
}

#[async_trait]
impl<F: DocumentFetcher + ?Sized> DocumentFetcher for Box<F> {
    async fn fetch(&self, location: &str) -> Result<String, RetrievalError> {
        (**self).fetch(location).await
    }
}

#[async_trait]
impl<F: DocumentFetcher + ?Sized> DocumentFetcher for Arc<F> {
    async fn fetch(&self, location: &str) -> Result<String, RetrievalError> {
        (**self).fetch(location).await
    }
}
