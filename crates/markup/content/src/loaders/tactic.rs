//! Markup tactic loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::tactic::{MarkupTactic, TacticRegistry};

/// Loader for markup tactics from JSON files.
///
/// File format:
/// ```json
/// {
///   "name": "basic",
///   "sequences": {
///     "work": [
///       { "baseIndex": -1, "action1": "multiply",
///         "operand1": { "kind": "parameter", "key": "overhead", "format": "factor" } }
///     ]
///   }
/// }
/// ```
pub struct TacticLoader;

impl TacticLoader {
    pub fn load(path: &Path) -> LoadResult<MarkupTactic> {
        let content = read_file(path)?;
        let tactic: MarkupTactic = serde_json::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse tactic JSON at {}: {}", path.display(), e)
        })?;

        let problems = tactic.validate();
        if !problems.is_empty() {
            tracing::warn!(
                tactic = %tactic.name,
                problems = problems.len(),
                "loaded tactic has validation problems"
            );
        }
        Ok(tactic)
    }

    /// Loads every `*.json` file of `dir` into a registry.
    ///
    /// Files are read in name order so that a later duplicate name wins
    /// deterministically.
    pub fn load_dir(dir: &Path) -> LoadResult<TacticRegistry> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut registry = TacticRegistry::new();
        for path in paths {
            let tactic = Self::load(&path)?;
            if let Some(previous) = registry.add(tactic) {
                tracing::warn!(
                    tactic = %previous.name,
                    path = %path.display(),
                    "duplicate tactic name, keeping the later file"
                );
            }
        }
        Ok(registry)
    }
}
