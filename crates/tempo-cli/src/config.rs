//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use tempo_core::DEFAULT_TREND_DAYS;

/// Application configuration.
///
/// Sources merge in order: built-in defaults, `config.toml` in the user
/// config directory, an explicit `--config` file, then `TEMPO_*` environment
/// variables. Later sources win.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
    /// Trailing-window length for trends and insights when no `--days` flag
    /// is given.
    pub trend_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("tempo.db"),
            trend_days: DEFAULT_TREND_DAYS,
        }
    }
}

impl Config {
    /// Loads configuration, optionally merging a specific file over the
    /// defaults.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("TEMPO_")).extract()
    }
}

/// Platform config directory for tempo (`~/.config/tempo` on Linux).
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tempo"))
}

/// Platform data directory for tempo (`~/.local/share/tempo` on Linux).
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("tempo"))
}
