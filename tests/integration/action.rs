//! End-to-end runs against an in-memory host and tool cache

use async_trait::async_trait;
use setup_angle::action::{run, setup, ActionInputs};
use setup_angle::config::schema::StorageConfig;
use setup_angle::installer::{CacheKey, LocalToolCache, ToolCache};
use setup_angle::reporter::OutputSink;
use setup_angle::resolver::{HostArch, HostInfo};
use setup_angle::{AngleError, AngleResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

struct FakeHost {
    os: &'static str,
    arch: &'static str,
}

impl HostInfo for FakeHost {
    fn os(&self) -> &str {
        self.os
    }

    fn arch(&self) -> &str {
        self.arch
    }
}

const WINDOWS_X64: FakeHost = FakeHost {
    os: "win32",
    arch: "x64",
};

#[derive(Default)]
struct FakeCache {
    entries: Mutex<HashMap<CacheKey, PathBuf>>,
    downloads: Mutex<Vec<String>>,
    download_error: Option<&'static str>,
}

impl FakeCache {
    fn with_entry(key: CacheKey, path: &str) -> Self {
        let cache = Self::default();
        cache
            .entries
            .lock()
            .unwrap()
            .insert(key, PathBuf::from(path));
        cache
    }

    fn download_count(&self) -> usize {
        self.downloads.lock().unwrap().len()
    }
}

#[async_trait]
impl ToolCache for FakeCache {
    async fn find(&self, key: &CacheKey) -> AngleResult<Option<PathBuf>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn find_all_versions(&self, tool: &str, arch: HostArch) -> AngleResult<Vec<String>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.tool == tool && k.arch == arch)
            .map(|k| k.version.clone())
            .collect())
    }

    async fn download(&self, url: &str) -> AngleResult<PathBuf> {
        self.downloads.lock().unwrap().push(url.to_string());
        match self.download_error {
            Some(reason) => Err(AngleError::Http {
                url: url.to_string(),
                reason: reason.to_string(),
            }),
            None => Ok(PathBuf::from("/tmp/download")),
        }
    }

    async fn extract_tar(&self, _archive: &Path) -> AngleResult<PathBuf> {
        Ok(PathBuf::from("/tmp/extracted"))
    }

    async fn cache_dir(&self, _source: &Path, key: &CacheKey) -> AngleResult<PathBuf> {
        let root = PathBuf::from(format!(
            "/cache/{}/{}/{}",
            key.tool,
            key.version.replace('/', "-"),
            key.arch
        ));
        self.entries
            .lock()
            .unwrap()
            .insert(key.clone(), root.clone());
        Ok(root)
    }
}

#[derive(Default)]
struct RecordingSink {
    outputs: Vec<(String, String)>,
    failure: Option<String>,
}

impl OutputSink for RecordingSink {
    fn set_outputs(&mut self, outputs: &[(&str, &str)]) -> AngleResult<()> {
        self.outputs.extend(
            outputs
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string())),
        );
        Ok(())
    }

    fn set_failed(&mut self, message: &str) {
        self.failure = Some(message.to_string());
    }
}

#[tokio::test]
async fn cache_hit_with_default_branch() {
    let cache = FakeCache::with_entry(
        CacheKey::angle("fdff117", HostArch::Amd64),
        "/cache/angle/fdff117/amd64",
    );
    let mut sink = RecordingSink::default();

    let ok = run(
        &ActionInputs::default(),
        &StorageConfig::default(),
        &WINDOWS_X64,
        &cache,
        &mut sink,
    )
    .await;

    assert!(ok);
    assert_eq!(cache.download_count(), 0);
    assert!(sink.failure.is_none());
    assert_eq!(
        sink.outputs,
        vec![
            ("angle-branch".to_string(), "fdff117".to_string()),
            (
                "angle-path".to_string(),
                PathBuf::from("/cache/angle/fdff117/amd64")
                    .join("angle-fdff117-windows-amd64")
                    .display()
                    .to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn cache_miss_populates_cache() {
    let cache = FakeCache::default();
    let inputs = ActionInputs {
        angle_branch: Some("chromium/5615".to_string()),
        legacy_branch: None,
    };
    let host = FakeHost {
        os: "darwin",
        arch: "arm64",
    };

    let installation = setup(&inputs, &StorageConfig::default(), &host, &cache)
        .await
        .unwrap();

    let key = CacheKey::angle("chromium/5615", HostArch::Arm64);
    let cached_root = cache.entries.lock().unwrap().get(&key).cloned().unwrap();
    assert_eq!(
        installation.path,
        cached_root.join("angle-chromium-5615-macos-arm64")
    );
    assert!(!installation.cache_hit);

    let downloads = cache.downloads.lock().unwrap().clone();
    assert_eq!(downloads.len(), 1);
    assert!(downloads[0].ends_with("/chromium/5615/angle-chromium-5615-macos-arm64.tar.gz"));
}

#[tokio::test]
async fn second_run_hits_the_cache() {
    let cache = FakeCache::default();
    let inputs = ActionInputs::default();
    let storage = StorageConfig::default();

    let first = setup(&inputs, &storage, &WINDOWS_X64, &cache).await.unwrap();
    let second = setup(&inputs, &storage, &WINDOWS_X64, &cache).await.unwrap();

    assert!(!first.cache_hit);
    assert!(second.cache_hit);
    assert_eq!(first.path, second.path);
    assert_eq!(cache.download_count(), 1);
}

#[tokio::test]
async fn download_failure_reports_single_error() {
    let cache = FakeCache {
        download_error: Some("connection reset by peer"),
        ..FakeCache::default()
    };
    let mut sink = RecordingSink::default();

    let ok = run(
        &ActionInputs::default(),
        &StorageConfig::default(),
        &WINDOWS_X64,
        &cache,
        &mut sink,
    )
    .await;

    assert!(!ok);
    assert!(sink.outputs.is_empty());
    let failure = sink.failure.unwrap();
    assert!(failure.contains("Failed to download ANGLE tarball"));
    assert!(failure.contains("connection reset by peer"));
}

#[tokio::test]
async fn unsupported_platform_is_reported() {
    let cache = FakeCache::default();
    let mut sink = RecordingSink::default();
    let host = FakeHost {
        os: "linux",
        arch: "x64",
    };

    let ok = run(
        &ActionInputs::default(),
        &StorageConfig::default(),
        &host,
        &cache,
        &mut sink,
    )
    .await;

    assert!(!ok);
    assert!(sink.outputs.is_empty());
    assert_eq!(sink.failure.as_deref(), Some("Unsupported platform: linux"));
    assert_eq!(cache.download_count(), 0);
}

#[tokio::test]
async fn real_cache_with_unreachable_storage() {
    let temp = TempDir::new().unwrap();
    let cache = LocalToolCache::new(temp.path().join("toolcache"), temp.path().join("tmp"));
    let storage = StorageConfig {
        endpoint: "http://127.0.0.1:1".to_string(),
        bucket: "angle".to_string(),
        prefix: "builds".to_string(),
    };
    let mut sink = RecordingSink::default();

    let ok = run(
        &ActionInputs::default(),
        &storage,
        &WINDOWS_X64,
        &cache,
        &mut sink,
    )
    .await;

    assert!(!ok);
    assert!(sink.outputs.is_empty());
    let failure = sink.failure.unwrap();
    assert!(failure.starts_with("Failed to download ANGLE tarball: "));
    assert!(failure.contains("127.0.0.1:1"));
    assert!(cache
        .find(&CacheKey::angle("fdff117", HostArch::Amd64))
        .await
        .unwrap()
        .is_none());
}
