//! Line item loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::pricing::LineItem;

/// Loader for line items from JSON arrays.
pub struct ItemLoader;

impl ItemLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<LineItem>> {
        let content = read_file(path)?;
        let items: Vec<LineItem> = serde_json::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse line items JSON at {}: {}", path.display(), e)
        })?;

        Ok(items)
    }
}
