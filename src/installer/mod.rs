//! Cache-or-download installation of an ANGLE archive
//!
//! # Outcomes
//!
//! | Cache | Steps | Network |
//! |-------|-------|---------|
//! | Hit | reuse cached root | none |
//! | Miss | download → extract → cache | one GET |
//!
//! Either way the installation path is the cache root joined with the
//! archive's folder name; the root itself never holds the binaries.

pub mod local;
pub mod tool_cache;

pub use local::LocalToolCache;
pub use tool_cache::{CacheKey, ToolCache, TOOL_NAME};

use crate::error::{AngleError, AngleResult};
use crate::resolver::{ArtifactLocation, Branch, Platform};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Installation {
    /// Resolved branch
    pub branch: Branch,
    /// Platform the archive was chosen for
    pub platform: Platform,
    /// Directory holding the ANGLE files
    pub path: PathBuf,
    /// Whether the archive came from the cache
    pub cache_hit: bool,
}

/// Install `branch` for `platform`, reusing the cache when possible.
///
/// A download failure is wrapped into [`AngleError::DownloadFailed`];
/// extraction and cache failures propagate as the cache reports them.
pub async fn install(
    branch: Branch,
    platform: Platform,
    location: &ArtifactLocation,
    cache: &dyn ToolCache,
) -> AngleResult<Installation> {
    let key = CacheKey::angle(branch, platform.arch);

    let (root, cache_hit) = match cache.find(&key).await? {
        Some(root) => {
            info!("Found cached ANGLE {} at {}", branch, root.display());
            (root, true)
        }
        None => {
            info!("ANGLE {} not cached, fetching {}", branch, location.tarball_name);

            let archive = cache
                .download(&location.url)
                .await
                .map_err(|e| AngleError::DownloadFailed(e.to_string()))?;
            debug!("Archive downloaded to {}", archive.display());

            let extracted = cache.extract_tar(&archive).await?;
            debug!("Archive extracted to {}", extracted.display());

            (cache.cache_dir(&extracted, &key).await?, false)
        }
    };

    let path = root.join(&location.folder_name);
    if !path.exists() {
        warn!(
            "Expected {} inside the cached archive, but it does not exist",
            location.folder_name
        );
    }

    Ok(Installation {
        branch,
        platform,
        path,
        cache_hit,
    })
}
