//! Configuration loading for sitesearch.

use std::path::PathBuf;

use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SITESEARCH_CONFIG";

/// Top-level configuration loaded from config.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Locations of the two source collections.
#[derive(Debug, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_documents_path")]
    pub documents: String,
    #[serde(default = "default_reference_path")]
    pub reference: String,
}

/// Timing of the live search prompt.
#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after input before a search starts.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Simulated backend round-trip before results appear.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

fn default_documents_path() -> String {
    "./content/documents.json".to_string()
}

fn default_reference_path() -> String {
    "./content/reference.json".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_latency_ms() -> u64 {
    500
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            documents: default_documents_path(),
            reference: default_reference_path(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            latency_ms: default_latency_ms(),
        }
    }
}

impl Config {
    /// Load config from `$SITESEARCH_CONFIG` or ~/.config/sitesearch/config.toml,
    /// or return defaults.
    pub fn load() -> anyhow::Result<Self> {
        if let Some(path) = Self::config_path()
            && path.exists()
        {
            let contents = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            return Ok(config);
        }

        Ok(Config::default())
    }

    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("", "", "sitesearch").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Expand ~ to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(base_dirs) = BaseDirs::new()
    {
        return base_dirs.home_dir().join(rest);
    }
    PathBuf::from(path)
}
