//! Engine configuration loader.

use std::path::Path;

use markup_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`EngineConfig::default`].
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markup_core::NumberLocale;

    #[test]
    fn partial_config_uses_defaults() {
        let config = ConfigLoader::parse("locale = \"en\"\n").unwrap();
        assert_eq!(config.locale, NumberLocale::En);
        assert_eq!(config.currency_decimals, EngineConfig::DEFAULT_CURRENCY_DECIMALS);
        assert!(!config.fail_on_validation);
    }

    #[test]
    fn full_config() {
        let config = ConfigLoader::parse(
            "currency_decimals = 0\nlocale = \"ru\"\nfail_on_validation = true\n",
        )
        .unwrap();
        assert_eq!(
            config,
            EngineConfig::new()
                .with_currency_decimals(0)
                .with_locale(NumberLocale::Ru)
                .with_fail_on_validation(true)
        );
    }

    #[test]
    fn rejects_unknown_locale() {
        assert!(ConfigLoader::parse("locale = \"de\"\n").is_err());
    }
}
