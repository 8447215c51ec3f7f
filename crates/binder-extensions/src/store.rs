//! Catalog store: loading configuration layers.
//!
//! The store loads per-level configuration documents and assembles them
//! into an evaluation scope chain. Layers are loaded in a defined
//! hierarchy — machine level first, then the application level — with the
//! child scope inheriting from the parent. Missing layer files are
//! silently skipped; invalid TOML in any layer produces an error.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::scope::{EvaluationScope, ScopeLevel};

/// A loaded configuration layer: the parsed document plus the logical
/// origin name used in source locations.
#[derive(Debug, Clone)]
pub struct LoadedLayer {
    pub document: toml::Table,
    pub origin: Option<String>,
}

/// Source of per-level configuration documents.
pub trait CatalogStore {
    /// Load the layer for `level`, or `None` when the level has no
    /// configuration.
    fn load_layer(&self, level: ScopeLevel) -> Result<Option<LoadedLayer>>;
}

/// TOML-file-backed catalog store with one file per scope level.
#[derive(Debug, Clone)]
pub struct TomlCatalogStore {
    machine_path: PathBuf,
    application_path: Option<PathBuf>,
}

impl TomlCatalogStore {
    pub fn new(machine_path: impl Into<PathBuf>, application_path: Option<PathBuf>) -> Self {
        Self {
            machine_path: machine_path.into(),
            application_path,
        }
    }

    fn path_for(&self, level: ScopeLevel) -> Option<&PathBuf> {
        match level {
            ScopeLevel::Machine => Some(&self.machine_path),
            ScopeLevel::Application => self.application_path.as_ref(),
        }
    }

    /// Load all layers and assemble the evaluation scope chain.
    ///
    /// The machine layer is the root; when an application layer exists it
    /// becomes a child scope inheriting from the machine scope. A missing
    /// machine file yields an empty root document rather than an error.
    pub fn load_scope(&self) -> Result<Arc<EvaluationScope>> {
        let machine = match self.load_layer(ScopeLevel::Machine)? {
            Some(layer) => EvaluationScope::machine(layer.document, layer.origin),
            None => {
                tracing::debug!(path = ?self.machine_path, "No machine layer found — starting empty");
                EvaluationScope::machine(toml::Table::new(), None)
            }
        };
        let machine = Arc::new(machine);

        match self.load_layer(ScopeLevel::Application)? {
            Some(layer) => Ok(Arc::new(EvaluationScope::inherit(
                machine,
                ScopeLevel::Application,
                layer.document,
                layer.origin,
            ))),
            None => Ok(machine),
        }
    }
}

impl CatalogStore for TomlCatalogStore {
    fn load_layer(&self, level: ScopeLevel) -> Result<Option<LoadedLayer>> {
        let Some(path) = self.path_for(level) else {
            return Ok(None);
        };
        if !path.exists() {
            tracing::debug!(?path, %level, "Layer file not found — skipping");
            return Ok(None);
        }
        tracing::debug!(?path, %level, "Loading configuration layer");
        let content = fs::read_to_string(path)?;
        let document: toml::Table = toml::from_str(&content)?;
        Ok(Some(LoadedLayer {
            document,
            origin: Some(path.display().to_string()),
        }))
    }
}
