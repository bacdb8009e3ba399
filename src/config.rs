//! Pipeline configuration describing where modules and documents come from.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::RegistryError;
use crate::metadata::ExtractionSettings;
use crate::registry::ModuleRegistry;

/// File name searched for by [`PipelineConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "content.config.json";

/// Discoverable configuration for document sources and extraction markers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Optional JSON or YAML registry file; the built-in catalog is used when unset.
    pub registry_file: Option<String>,
    /// Directory documents are read from when no base URL is configured.
    pub document_root: String,
    /// Base URL documents are fetched from; takes precedence over `document_root`.
    pub document_base_url: Option<String>,
    /// Per-request timeout applied by the HTTP transport, in seconds.
    pub request_timeout_secs: u64,
    /// Markers and defaults used by the metadata extractor.
    pub extraction: ExtractionSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            registry_file: None,
            document_root: "public".into(),
            document_base_url: None,
            request_timeout_secs: 30,
            extraction: ExtractionSettings::default(),
        }
    }
}

impl PipelineConfig {
    /// Attempt to load configuration from the provided directory.
    ///
    /// A missing or unparsable file yields the defaults so callers can continue with
    /// sensible assumptions.
    pub fn discover(base_dir: &Path) -> Self {
        let candidate = base_dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file, ignoring failures.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Read configuration from a file that is expected to exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Transport timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Registry file resolved against `base_dir`, if one is configured.
    pub fn registry_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.registry_file
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(|value| base_dir.join(value))
    }

    /// Document root resolved against `base_dir`.
    pub fn document_root_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.document_root)
    }

    /// Build the registry this configuration points at.
    pub fn load_registry(&self, base_dir: &Path) -> Result<ModuleRegistry, RegistryError> {
        match self.registry_path(base_dir) {
            Some(path) => ModuleRegistry::load_from_path(path),
            None => Ok(ModuleRegistry::builtin().clone()),
        }
    }
}
