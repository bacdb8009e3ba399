//! Command-line front end for inspecting and checking the module catalog.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use crate::config::PipelineConfig;
use crate::fetcher::{DocumentFetcher, FileFetcher, HttpFetcher};
use crate::metadata::MetadataExtractor;
use crate::pipeline::ContentPipeline;
use crate::registry::ModuleRegistry;

/// Normalize authored course modules into render-ready content records.
#[derive(Debug, Parser)]
#[command(name = "course-content", version, about)]
pub struct Cli {
  /// Configuration file; defaults to `content.config.json` in the working directory.
  #[arg(long, global = true)]
  pub config: Option<PathBuf>,

  /// Directory documents are read from.
  #[arg(long, global = true, conflicts_with = "base_url")]
  pub root: Option<PathBuf>,

  /// Base URL documents are fetched from.
  #[arg(long, global = true)]
  pub base_url: Option<String>,

  /// Registry file (JSON or YAML) replacing the built-in catalog.
  #[arg(long, global = true)]
  pub registry: Option<PathBuf>,

  /// Action to perform.
  #[command(subcommand)]
  pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
  /// Print the module catalog in display order.
  List {
    /// Emit JSON instead of a table.
    #[arg(long)]
    json: bool,
  },
  /// Normalize one module and print its content record as JSON.
  Show {
    /// Module identifier.
    id: String,
  },
  /// Normalize every module and report failures.
  Check,
}

impl Cli {
  /// Run the parsed command.
  pub async fn execute(self) -> Result<()> {
    let (config, base_dir) = self.load_config()?;
    let pipeline = self.build_pipeline(&config, &base_dir)?;

    match &self.command {
      Command::List { json } => list(&pipeline, *json),
      Command::Show { id } => show(&pipeline, id).await,
      Command::Check => check(&pipeline).await,
    }
  }

  fn load_config(&self) -> Result<(PipelineConfig, PathBuf)> {
    match &self.config {
      Some(path) => {
        let config = PipelineConfig::load(path)?;
        let base_dir = path
          .parent()
          .map(Path::to_path_buf)
          .unwrap_or_else(|| PathBuf::from("."));
        Ok((config, base_dir))
      }
      None => {
        let base_dir = std::env::current_dir().context("failed to resolve working directory")?;
        Ok((PipelineConfig::discover(&base_dir), base_dir))
      }
    }
  }

  fn build_pipeline(
    &self,
    config: &PipelineConfig,
    base_dir: &Path,
  ) -> Result<ContentPipeline<Box<dyn DocumentFetcher>>> {
    let registry = match &self.registry {
      Some(path) => {
        ModuleRegistry::load_from_path(path).context("failed to load module registry")?
      }
      None => config
        .load_registry(base_dir)
        .context("failed to load module registry")?,
    };

    let base_url = self
      .base_url
      .clone()
      .or_else(|| config.document_base_url.clone())
      .filter(|_| self.root.is_none());

    let fetcher: Box<dyn DocumentFetcher> = match base_url {
      Some(base_url) => Box::new(HttpFetcher::new(&base_url, config.request_timeout())?),
      None => {
        let root = self
          .root
          .clone()
          .unwrap_or_else(|| config.document_root_path(base_dir));
        Box::new(FileFetcher::new(root))
      }
    };

    Ok(ContentPipeline::with_extractor(
      Arc::new(registry),
      fetcher,
      MetadataExtractor::new(&config.extraction),
    ))
  }
}

fn list<F: DocumentFetcher>(pipeline: &ContentPipeline<F>, json: bool) -> Result<()> {
  if json {
    println!("{}", serde_json::to_string_pretty(pipeline.catalog())?);
    return Ok(());
  }

  for module in pipeline.catalog() {
    println!("{:>6}  {:<16}  {}", module.order, module.id, module.title);
  }
  Ok(())
}

async fn show<F: DocumentFetcher>(pipeline: &ContentPipeline<F>, id: &str) -> Result<()> {
  match pipeline.normalize(id).await {
    Ok(record) => {
      println!("{}", serde_json::to_string_pretty(&record)?);
      Ok(())
    }
    Err(err) => {
      let message = err.user_message();
      Err(anyhow::Error::new(err).context(message))
    }
  }
}

async fn check<F: DocumentFetcher>(pipeline: &ContentPipeline<F>) -> Result<()> {
  let outcomes = pipeline.normalize_all().await;
  let mut failures = 0;

  for (id, outcome) in &outcomes {
    match outcome {
      Ok(record) => println!("ok    {id:<16}  {}", record.title()),
      Err(err) => {
        failures += 1;
        println!("FAIL  {id:<16}  {err}");
      }
    }
  }

  if failures > 0 {
    bail!("{failures} of {} modules failed to normalize", outcomes.len());
  }
  Ok(())
}
