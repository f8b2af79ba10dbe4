//! Environment-driven CLI settings.

use std::path::PathBuf;

/// Settings read from the environment (and `.env`).
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    /// Engine config used when `calc` gets no `--config` (`MARKUP_CONFIG`).
    pub engine_config: Option<PathBuf>,

    /// Directory for `markup.log` (`MARKUP_LOG_DIR`).
    pub log_dir: Option<PathBuf>,
}

impl CliConfig {
    pub const CONFIG_ENV: &'static str = "MARKUP_CONFIG";
    pub const LOG_DIR_ENV: &'static str = "MARKUP_LOG_DIR";

    pub fn from_env() -> Self {
        Self {
            engine_config: path_var(Self::CONFIG_ENV),
            log_dir: path_var(Self::LOG_DIR_ENV),
        }
    }
}

fn path_var(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
