//! Parameter set loader.

use std::path::Path;

use markup_core::ParameterSet;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Parameter file structure for TOML files.
///
/// ```toml
/// name = "Tender 2024-117"
///
/// [parameters]
/// overhead = 12.5
/// profit = 8
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub parameters: ParameterSet,
}

/// Loader for parameter sets from TOML files.
pub struct ParameterLoader;

impl ParameterLoader {
    pub fn load(path: &Path) -> LoadResult<NamedParameters> {
        let content = read_file(path)?;
        let named: NamedParameters = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse parameters TOML at {}: {}", path.display(), e)
        })?;
        tracing::debug!(
            path = %path.display(),
            count = named.parameters.len(),
            "loaded parameter set"
        );
        Ok(named)
    }

    pub fn parse(content: &str) -> LoadResult<NamedParameters> {
        toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse parameters TOML: {}", e))
    }
}
