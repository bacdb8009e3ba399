//! Error taxonomy for the normalization pipeline.
//!
//! Only an unknown module id and a failed document retrieval are errors. Imperfect markup
//! never is; the rewriter and extractor degrade to defaults instead.

use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Transport-level outcome attached to a failed retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportStatus {
  /// The server answered with a non-success HTTP status code.
  Http(u16),
  /// The filesystem refused the read.
  Io(ErrorKind),
  /// The request never produced a usable response (connect, timeout, decode).
  Transport(String),
}

impl fmt::Display for TransportStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Http(code) => write!(f, "HTTP status {code}"),
      Self::Io(kind) => write!(f, "I/O error ({kind})"),
      Self::Transport(message) => write!(f, "transport error: {message}"),
    }
  }
}

/// A document could not be fetched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to retrieve {location}: {status}")]
pub struct RetrievalError {
  /// Location that was requested.
  pub location: String,
  /// Underlying transport status.
  pub status: TransportStatus,
}

impl RetrievalError {
  /// Pair a location with the status that caused the failure.
  pub fn new(location: impl Into<String>, status: TransportStatus) -> Self {
    Self {
      location: location.into(),
      status,
    }
  }
}

/// Failure modes of [`crate::ContentPipeline::normalize`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
  /// No module is registered under the requested id.
  #[error("module `{0}` is not registered")]
  NotFound(String),

  /// The module's document could not be retrieved.
  #[error(transparent)]
  Retrieval(#[from] RetrievalError),
}

impl NormalizeError {
  /// Message suitable for showing to a site visitor.
  pub fn user_message(&self) -> &'static str {
    match self {
      Self::NotFound(_) => "This content is unavailable.",
      Self::Retrieval(_) => "We couldn't load this module. Please try again later.",
    }
  }
}

/// Errors raised while building or loading a module registry.
#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
  /// Two descriptors share an id.
  #[error("module id `{0}` is registered more than once")]
  DuplicateId(String),

  /// A descriptor has a blank id.
  #[error("module at position {position} has an empty id")]
  EmptyId {
    /// Zero-based position of the offending entry.
    position: usize,
  },

  /// The registry file could not be read.
  #[error("failed to read {}: {source}", .path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },

  /// The registry file could not be parsed.
  #[error("failed to parse {}: {source}", .path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source JSON or YAML error.
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}
