//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Default analysis window length in days.
const DEFAULT_WINDOW_DAYS: i64 = 60;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Analysis window length in days, counted back from the window end.
    pub window_days: i64,
    /// Evidence file consulted when no input files are given.
    pub evidence_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            evidence_path: data_dir.join("evidence.jsonl"),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (RHYTHM_*)
        figment = figment.merge(Env::prefixed("RHYTHM_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for rhythm.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("rhythm"))
}

/// Returns the platform-specific data directory for rhythm.
///
/// On Linux: `~/.local/share/rhythm`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("rhythm"))
}
