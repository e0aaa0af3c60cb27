//! Configuration schema for setup-angle
//!
//! Configuration is stored at `~/.config/setup-angle/config.toml`. Every
//! section is optional; environment variables and flags override it.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Object storage holding the pre-built archives
    pub storage: StorageConfig,

    /// Local tool cache settings
    pub cache: CacheConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Object storage location of the archives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Endpoint URL (S3_ENDPOINT_URL)
    pub endpoint: String,

    /// Bucket name (S3_BUCKET_NAME)
    pub bucket: String,

    /// Key prefix inside the bucket (S3_PATH_PREFIX)
    pub prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://s3.amazonaws.com".to_string(),
            bucket: "angle-builds".to_string(),
            prefix: "prebuilt".to_string(),
        }
    }
}

/// Tool cache configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Tool cache root (defaults to the user cache directory)
    pub root: Option<PathBuf>,

    /// Scratch directory for downloads and extraction (defaults to the OS temp dir)
    pub temp_dir: Option<PathBuf>,
}
