#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod metadata;
pub mod models;
pub mod pipeline;
pub mod record;
pub mod registry;

pub use asset_paths::{AssetPathRewriter, AssetRule, AssetTarget};
pub use config::PipelineConfig;
pub use error::{NormalizeError, RegistryError, RetrievalError, TransportStatus};
pub use fetcher::{DocumentFetcher, FileFetcher, HttpFetcher, StaticFetcher};
pub use metadata::{ExtractionSettings, MetadataExtractor};
pub use models::{ContentRecord, ExtractedMetadata, ModuleDescriptor};
pub use pipeline::ContentPipeline;
pub use record::ContentRecordBuilder;
pub use registry::ModuleRegistry;
