//! On-disk tool cache
//!
//! Layout mirrors the hosted runner tool cache:
//!
//! ```text
//! <root>/<tool>/<version>/<arch>/            cached files
//! <root>/<tool>/<version>/<arch>.complete    JSON marker, written last
//! ```
//!
//! A directory without its marker is left over from an interrupted run and
//! is treated as a miss.

use super::tool_cache::{CacheKey, ToolCache};
use crate::error::{AngleError, AngleResult};
use crate::resolver::HostArch;
use crate::ui::{DownloadProgress, UiContext};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::{debug, info, warn};
use uuid::Uuid;
use walkdir::WalkDir;

/// Contents of a `<arch>.complete` marker
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheMarker {
    tool: String,
    version: String,
    arch: String,
    cached_at: DateTime<Utc>,
}

/// Tool cache backed by a local directory, downloading over HTTP
#[derive(Debug, Clone)]
pub struct LocalToolCache {
    root: PathBuf,
    temp_dir: PathBuf,
    ui: UiContext,
}

impl LocalToolCache {
    /// Create a cache rooted at `root`, using `temp_dir` for downloads and extraction
    pub fn new(root: PathBuf, temp_dir: PathBuf) -> Self {
        Self {
            root,
            temp_dir,
            ui: UiContext::non_interactive(),
        }
    }

    /// Show download progress according to `ui`
    pub fn with_ui(mut self, ui: UiContext) -> Self {
        self.ui = ui;
        self
    }

    /// Cache root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn version_dir(&self, tool: &str, version: &str) -> PathBuf {
        self.root.join(tool).join(version.replace(['/', '\\'], "-"))
    }

    fn entry_paths(&self, key: &CacheKey) -> (PathBuf, PathBuf) {
        let version_dir = self.version_dir(&key.tool, &key.version);
        let dir = version_dir.join(key.arch.as_str());
        let marker = version_dir.join(format!("{}.complete", key.arch));
        (dir, marker)
    }

    fn scratch_path(&self) -> PathBuf {
        self.temp_dir.join(Uuid::new_v4().to_string())
    }

    fn owns(&self, path: &Path) -> bool {
        path.starts_with(&self.temp_dir)
    }
}

fn read_marker(path: &Path) -> Option<CacheMarker> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(marker) => Some(marker),
        Err(e) => {
            warn!("Ignoring unreadable cache marker {}: {}", path.display(), e);
            None
        }
    }
}

#[async_trait]
impl ToolCache for LocalToolCache {
    async fn find(&self, key: &CacheKey) -> AngleResult<Option<PathBuf>> {
        let (dir, marker_path) = self.entry_paths(key);

        if !dir.is_dir() {
            debug!("Cache miss for {}", key);
            return Ok(None);
        }

        match read_marker(&marker_path) {
            Some(marker) if marker.version == key.version => {
                debug!("Cache hit for {} at {}", key, dir.display());
                Ok(Some(dir))
            }
            Some(marker) => {
                debug!(
                    "Cache entry {} belongs to version {}, not {}",
                    dir.display(),
                    marker.version,
                    key.version
                );
                Ok(None)
            }
            None => {
                warn!("Ignoring incomplete cache entry {}", dir.display());
                Ok(None)
            }
        }
    }

    async fn find_all_versions(&self, tool: &str, arch: HostArch) -> AngleResult<Vec<String>> {
        let tool_dir = self.root.join(tool);
        if !tool_dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&tool_dir)
            .map_err(|e| AngleError::io(format!("reading {}", tool_dir.display()), e))?;

        let mut versions = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| AngleError::io(format!("reading {}", tool_dir.display()), e))?;
            let marker_path = entry.path().join(format!("{}.complete", arch));
            if !entry.path().join(arch.as_str()).is_dir() {
                continue;
            }
            if let Some(marker) = read_marker(&marker_path) {
                versions.push(marker.version);
            }
        }

        versions.sort();
        versions.dedup();
        Ok(versions)
    }

    async fn download(&self, url: &str) -> AngleResult<PathBuf> {
        fs::create_dir_all(&self.temp_dir).map_err(|e| {
            AngleError::io(format!("creating directory {}", self.temp_dir.display()), e)
        })?;

        let dest = self.scratch_path();
        info!("Downloading {}", url);
        debug!("Download destination: {}", dest.display());

        let url_owned = url.to_string();
        let dest_clone = dest.clone();
        let ui = self.ui.clone();
        let result = tokio::task::spawn_blocking(move || {
            download_blocking(&url_owned, &dest_clone, &ui)
        })
        .await
        .map_err(|e| AngleError::Internal(format!("download task failed: {}", e)))?;

        if let Err(e) = result {
            if dest.exists() {
                let _ = fs::remove_file(&dest);
            }
            return Err(e);
        }

        Ok(dest)
    }

    async fn extract_tar(&self, archive: &Path) -> AngleResult<PathBuf> {
        let dest = self.scratch_path();
        info!("Extracting {}", archive.display());

        let archive_owned = archive.to_path_buf();
        let dest_clone = dest.clone();
        let result =
            tokio::task::spawn_blocking(move || extract_blocking(&archive_owned, &dest_clone))
                .await
                .map_err(|e| AngleError::Internal(format!("extraction task failed: {}", e)))
                .and_then(|r| r);

        if self.owns(archive) {
            if let Err(e) = fs::remove_file(archive) {
                debug!("Could not remove {}: {}", archive.display(), e);
            }
        }

        if let Err(e) = result {
            if dest.exists() {
                let _ = fs::remove_dir_all(&dest);
            }
            return Err(e);
        }

        Ok(dest)
    }

    async fn cache_dir(&self, source: &Path, key: &CacheKey) -> AngleResult<PathBuf> {
        let (dest, marker_path) = self.entry_paths(key);
        info!("Caching {} at {}", key, dest.display());

        let store_err = |reason: String| AngleError::CacheStore {
            path: dest.clone(),
            reason,
        };

        if marker_path.exists() {
            fs::remove_file(&marker_path).map_err(|e| store_err(e.to_string()))?;
        }
        if dest.exists() {
            fs::remove_dir_all(&dest).map_err(|e| store_err(e.to_string()))?;
        }
        fs::create_dir_all(&dest).map_err(|e| store_err(e.to_string()))?;

        let source_owned = source.to_path_buf();
        let dest_clone = dest.clone();
        tokio::task::spawn_blocking(move || copy_tree(&source_owned, &dest_clone))
            .await
            .map_err(|e| AngleError::Internal(format!("cache copy task failed: {}", e)))??;

        let marker = CacheMarker {
            tool: key.tool.clone(),
            version: key.version.clone(),
            arch: key.arch.to_string(),
            cached_at: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&marker)?;
        fs::write(&marker_path, content).map_err(|e| store_err(e.to_string()))?;

        if self.owns(source) {
            if let Err(e) = fs::remove_dir_all(source) {
                debug!("Could not remove {}: {}", source.display(), e);
            }
        }

        Ok(dest)
    }
}

fn download_blocking(url: &str, dest: &Path, ui: &UiContext) -> AngleResult<()> {
    let http_err = |reason: String| AngleError::Http {
        url: url.to_string(),
        reason,
    };

    let response = ureq::get(url).call().map_err(|e| http_err(e.to_string()))?;
    let total = response.body().content_length();
    let reader = response.into_body().into_reader();

    let mut file = File::create(dest)
        .map_err(|e| AngleError::io(format!("creating {}", dest.display()), e))?;

    let progress = DownloadProgress::new(ui, total);
    let copied = std::io::copy(&mut progress.wrap_read(reader), &mut file)
        .map_err(|e| http_err(e.to_string()))?;
    progress.finish();

    debug!("Downloaded {} bytes", copied);
    Ok(())
}

fn extract_blocking(archive: &Path, dest: &Path) -> AngleResult<()> {
    let extraction_err = |source: std::io::Error| AngleError::ExtractionFailed {
        path: archive.to_path_buf(),
        source,
    };

    fs::create_dir_all(dest).map_err(extraction_err)?;
    let file = File::open(archive).map_err(extraction_err)?;
    let mut tar = Archive::new(GzDecoder::new(file));
    tar.unpack(dest).map_err(extraction_err)?;
    Ok(())
}

fn copy_tree(source: &Path, dest: &Path) -> AngleResult<()> {
    let store_err = |reason: String| AngleError::CacheStore {
        path: dest.to_path_buf(),
        reason,
    };

    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry.map_err(|e| store_err(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| store_err(e.to_string()))?;
        let target = dest.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|e| store_err(e.to_string()))?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target).map_err(|e| store_err(e.to_string()))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| store_err(e.to_string()))?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> std::io::Result<()> {
    let points_to = fs::read_link(link)?;
    std::os::unix::fs::symlink(points_to, target)
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> std::io::Result<()> {
    fs::copy(link, target).map(|_| ())
}
