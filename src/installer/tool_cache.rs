//! Tool cache abstraction
//!
//! The installer never touches the cache layout directly; it goes through
//! this trait so the real filesystem/network implementation can be swapped
//! for an in-memory one.

use crate::error::AngleResult;
use crate::resolver::HostArch;
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};

/// Name ANGLE installations are cached under
pub const TOOL_NAME: &str = "angle";

/// Lookup key of a cached tool
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub tool: String,
    pub version: String,
    pub arch: HostArch,
}

impl CacheKey {
    /// Key for an ANGLE installation of `branch` on `arch`
    pub fn angle(branch: &str, arch: HostArch) -> Self {
        Self {
            tool: TOOL_NAME.to_string(),
            version: branch.to_string(),
            arch,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.tool, self.version, self.arch)
    }
}

/// Key-value directory cache addressed by (tool, version, arch)
#[async_trait]
pub trait ToolCache: Send + Sync {
    /// Find a cached directory for `key`
    async fn find(&self, key: &CacheKey) -> AngleResult<Option<PathBuf>>;

    /// List every cached version of `tool` for `arch`
    async fn find_all_versions(&self, tool: &str, arch: HostArch) -> AngleResult<Vec<String>>;

    /// Download `url` to a temporary file and return its path
    async fn download(&self, url: &str) -> AngleResult<PathBuf>;

    /// Extract a gzip-compressed tar archive into a temporary directory
    async fn extract_tar(&self, archive: &Path) -> AngleResult<PathBuf>;

    /// Copy `source` into the cache under `key` and return the cached directory
    async fn cache_dir(&self, source: &Path, key: &CacheKey) -> AngleResult<PathBuf>;
}
