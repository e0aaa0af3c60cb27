//! Configuration management for setup-angle

pub mod schema;

pub use schema::Config;

use crate::error::{AngleError, AngleResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Values from flags or the CI environment that win over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub bucket: Option<String>,
    pub prefix: Option<String>,
    pub tool_cache: Option<String>,
    pub temp_dir: Option<String>,
    pub log_format: Option<String>,
}

impl Overrides {
    /// Apply every set override onto `config`. Empty strings count as unset.
    pub fn apply(&self, config: &mut Config) {
        if let Some(endpoint) = non_empty(&self.endpoint) {
            config.storage.endpoint = endpoint;
        }
        if let Some(bucket) = non_empty(&self.bucket) {
            config.storage.bucket = bucket;
        }
        // An explicitly empty prefix is meaningful: objects at the bucket root
        if let Some(ref prefix) = self.prefix {
            config.storage.prefix = prefix.clone();
        }
        if let Some(root) = non_empty(&self.tool_cache) {
            config.cache.root = Some(PathBuf::from(root));
        }
        if let Some(temp) = non_empty(&self.temp_dir) {
            config.cache.temp_dir = Some(PathBuf::from(temp));
        }
        if let Some(format) = non_empty(&self.log_format) {
            config.general.log_format = format;
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("setup-angle")
            .join("config.toml")
    }

    /// Default tool cache root when neither the CI host nor the config names one
    pub fn default_tool_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("setup-angle")
            .join("toolcache")
    }

    /// Effective tool cache root for `config`
    pub fn tool_cache_dir(config: &Config) -> PathBuf {
        config
            .cache
            .root
            .clone()
            .unwrap_or_else(Self::default_tool_cache_dir)
    }

    /// Effective scratch directory for `config`
    pub fn temp_dir(config: &Config) -> PathBuf {
        config
            .cache
            .temp_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    /// Load configuration, falling back to defaults if the file does not exist
    pub async fn load(&self) -> AngleResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration and apply overrides on top
    pub async fn load_with(&self, overrides: &Overrides) -> AngleResult<Config> {
        let mut config = self.load().await?;
        overrides.apply(&mut config);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> AngleResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| AngleError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| AngleError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> AngleResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AngleError::io(format!("creating directory {}", parent.display()), e)
            })?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            AngleError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
