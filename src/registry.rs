//! Catalog of known course modules.
//!
//! A registry is validated once at construction and is read-only afterwards, so it can be
//! shared between concurrent normalization requests without locking.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::error::RegistryError;
use crate::models::ModuleDescriptor;

/// On-disk layout of a registry file.
#[derive(Debug, Default, Deserialize)]
struct RegistryFile {
  #[serde(default)]
  modules: Vec<ModuleDescriptor>,
}

/// Ordered, immutable table of module descriptors keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
  modules: Vec<ModuleDescriptor>,
  index: BTreeMap<String, usize>,
}

impl ModuleRegistry {
  /// Validate `descriptors` and order them by `order`, keeping registration order on ties.
  pub fn new(
    descriptors: impl IntoIterator<Item = ModuleDescriptor>,
  ) -> Result<Self, RegistryError> {
    let mut modules: Vec<ModuleDescriptor> = descriptors.into_iter().collect();

    let mut seen = BTreeMap::new();
    for (position, module) in modules.iter().enumerate() {
      if module.id.trim().is_empty() {
        return Err(RegistryError::EmptyId { position });
      }
      if seen.insert(module.id.clone(), position).is_some() {
        return Err(RegistryError::DuplicateId(module.id.clone()));
      }
    }

    // `sort_by_key` is stable, which is what keeps equal orders in registration sequence.
    modules.sort_by_key(|module| module.order);

    let index = modules
      .iter()
      .enumerate()
      .map(|(position, module)| (module.id.clone(), position))
      .collect();

    Ok(Self { modules, index })
  }

  /// The site's built-in course catalog, constructed on first use.
  pub fn builtin() -> &'static ModuleRegistry {
    static BUILTIN: OnceLock<ModuleRegistry> = OnceLock::new();
    BUILTIN.get_or_init(|| {
      ModuleRegistry::new(builtin_modules()).expect("built-in module table has unique ids")
    })
  }

  /// Load a registry from a JSON or YAML file, chosen by extension.
  pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| RegistryError::Io {
      path: path.to_path_buf(),
      source,
    })?;

    let is_yaml = path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let file: RegistryFile = if is_yaml {
      serde_yaml::from_str(&contents).map_err(|err| RegistryError::Parse {
        path: path.to_path_buf(),
        source: Box::new(err),
      })?
    } else {
      serde_json::from_str(&contents).map_err(|err| RegistryError::Parse {
        path: path.to_path_buf(),
        source: Box::new(err),
      })?
    };

    Self::new(file.modules)
  }

  /// Descriptor registered under `id`, if any.
  pub fn lookup(&self, id: &str) -> Option<&ModuleDescriptor> {
    self.index.get(id).map(|&position| &self.modules[position])
  }

  /// All descriptors in display order.
  pub fn list_all(&self) -> &[ModuleDescriptor] {
    &self.modules
  }

  /// Returns `true` when `id` is registered.
  pub fn contains(&self, id: &str) -> bool {
    self.index.contains_key(id)
  }

  /// Number of registered modules.
  pub fn len(&self) -> usize {
    self.modules.len()
  }

  /// Returns `true` when no modules are registered.
  pub fn is_empty(&self) -> bool {
    self.modules.is_empty()
  }
}

fn builtin_modules() -> Vec<ModuleDescriptor> {
  const TABLE: &[(&str, &str, &str, &str, i64)] = &[
    (
      "introduction",
      "Course Introduction",
      "How the course is structured and what you will need.",
      "Introduction",
      0,
    ),
    (
      "module-1",
      "Foundations of Site Safety",
      "Hazard awareness, reporting lines and personal protective equipment.",
      "Module 1",
      10,
    ),
    (
      "module-2",
      "Working at Height",
      "Harnesses, anchor points and rescue planning.",
      "Module 2",
      20,
    ),
    (
      "module-3",
      "Manual Handling",
      "Safe lifting technique and load assessment.",
      "Module 3",
      30,
    ),
    (
      "module-4",
      "Emergency Response",
      "Evacuation, first response and incident reporting.",
      "Module 4",
      40,
    ),
  ];

  TABLE
    .iter()
    .map(|&(id, title, description, folder, order)| ModuleDescriptor {
      id: id.to_string(),
      title: title.to_string(),
      description: description.to_string(),
      document_location: format!("/modules/{folder}/index.html"),
      asset_directory: format!("/modules/{folder}"),
      order,
    })
    .collect()
}
