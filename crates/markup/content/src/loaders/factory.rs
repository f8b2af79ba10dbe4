//! Content factory for loading a tender's markup data from one directory.

use std::path::{Path, PathBuf};

use markup_core::EngineConfig;

use crate::loaders::{
    ConfigLoader, ItemLoader, LoadResult, NamedParameters, ParameterLoader, TacticLoader,
};
use crate::pricing::LineItem;
use crate::tactic::{MarkupTactic, TacticRegistry};

/// Content factory that loads markup content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml        (optional)
/// ├── parameters.toml
/// ├── items.json
/// └── tactics/
///     ├── basic.json
///     └── subcontract.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(EngineConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the parameter set from `parameters.toml`.
    pub fn load_parameters(&self) -> LoadResult<NamedParameters> {
        ParameterLoader::load(&self.data_dir.join("parameters.toml"))
    }

    /// Load line items from `items.json`.
    pub fn load_items(&self) -> LoadResult<Vec<LineItem>> {
        ItemLoader::load(&self.data_dir.join("items.json"))
    }

    /// Load a single tactic from `tactics/{name}.json`.
    pub fn load_tactic(&self, name: &str) -> LoadResult<MarkupTactic> {
        let path = self.tactics_dir().join(format!("{}.json", name));
        TacticLoader::load(&path)
    }

    /// Load every tactic under `tactics/`.
    pub fn load_tactics(&self) -> LoadResult<TacticRegistry> {
        TacticLoader::load_dir(&self.tactics_dir())
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn tactics_dir(&self) -> PathBuf {
        self.data_dir.join("tactics")
    }
}
