use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_SANBASE_URL: &str = "https://api.santiment.net";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SanbaseProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub sanbase: Option<SanbaseProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            sanbase: Some(SanbaseProviderConfig {
                base_url: DEFAULT_SANBASE_URL.to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RetryConfig {
    /// Minimum time between automatic re-fetches after a failed query.
    #[serde(default = "default_retry_window_ms")]
    pub window_ms: u64,
    /// Re-fetches attempted before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_retry_window_ms() -> u64 {
    1000
}

fn default_max_attempts() -> u32 {
    3
}

fn default_cache_ttl_secs() -> u64 {
    300
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            window_ms: default_retry_window_ms(),
            max_attempts: default_max_attempts(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            retry: RetryConfig::default(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no file has been set up yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("net", "santiment", "sanbase")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// How long fetched project details stay cached.
    pub fn cache_ttl(&self) -> Result<chrono::TimeDelta> {
        i64::try_from(self.cache_ttl_secs)
            .ok()
            .and_then(chrono::TimeDelta::try_seconds)
            .with_context(|| format!("cache_ttl_secs out of range: {}", self.cache_ttl_secs))
    }

    pub fn sanbase_url(&self) -> &str {
        self.providers
            .sanbase
            .as_ref()
            .map_or(DEFAULT_SANBASE_URL, |p| &p.base_url)
    }
}
