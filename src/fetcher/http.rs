use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::DocumentFetcher;
use crate::error::{RetrievalError, TransportStatus};

/// Fetches documents over HTTP relative to a base URL.
///
/// The request timeout is enforced by the underlying client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    /// Create a fetcher for `base_url` with a per-request `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Self::with_client(client, base_url)
    }

    /// Create a fetcher reusing an existing client.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).with_context(|| format!("invalid base URL `{base_url}`"))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    /// Base URL relative locations are joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a location.
    ///
    /// Fully qualified URLs are used as-is; anything else is resolved beneath the base URL,
    /// including site-absolute paths.
    pub fn resolve(&self, location: &str) -> Result<Url, RetrievalError> {
        if let Ok(url) = Url::parse(location)
            && matches!(url.scheme(), "http" | "https")
        {
            return Ok(url);
        }

        self.base_url
            .join(location.trim_start_matches('/'))
            .map_err(|err| RetrievalError::new(location, TransportStatus::Transport(err.to_string())))
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, location: &str) -> Result<String, RetrievalError> {
        let url = self.resolve(location)?;
        debug!(location, %url, "requesting document");

        let transport_error =
            |err: reqwest::Error| RetrievalError::new(location, TransportStatus::Transport(err.to_string()));

        let response = self.client.get(url).send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::new(
                location,
                TransportStatus::Http(status.as_u16()),
            ));
        }

        response.text().await.map_err(transport_error)
    }
}
