//! Content loaders for reading markup data from files.
//!
//! Tactics and line items are JSON, matching what the tender application exports.
//! Parameter sets and engine configuration are hand-edited TOML.

pub mod config;
pub mod factory;
pub mod items;
pub mod parameters;
pub mod tactic;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use items::ItemLoader;
pub use parameters::{NamedParameters, ParameterLoader};
pub use tactic::TacticLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    tracing::debug!(path = %path.display(), "reading content file");
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
