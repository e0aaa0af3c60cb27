//! Remote URL and local naming for a (branch, platform) pair

use super::platform::Platform;
use crate::config::schema::StorageConfig;
use serde::Serialize;

/// Where an archive lives remotely and what it is called locally
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactLocation {
    /// Full download URL
    pub url: String,
    /// Archive file name, e.g. `angle-chromium-5615-windows-amd64.tar.gz`
    pub tarball_name: String,
    /// Top-level directory inside the archive, e.g. `angle-chromium-5615-windows-amd64`
    pub folder_name: String,
}

const TARBALL_EXTENSION: &str = ".tar.gz";

/// Archive file name; path separators in the branch become hyphens
pub fn compute_tarball_name(branch: &str, platform: &Platform) -> String {
    format!(
        "{}{}",
        compute_folder_name(branch, platform),
        TARBALL_EXTENSION
    )
}

/// Directory name inside the archive (the tarball name without extension)
pub fn compute_folder_name(branch: &str, platform: &Platform) -> String {
    format!(
        "angle-{}-{}-{}",
        filesystem_safe(branch),
        platform.os,
        platform.arch
    )
}

/// Compute the full artifact location.
///
/// The URL keys the archive under the unmodified branch path, so
/// `chromium/5615` stays two path segments there while file names use
/// `chromium-5615`.
pub fn compute_artifact_location(
    branch: &str,
    platform: &Platform,
    storage: &StorageConfig,
) -> ArtifactLocation {
    let tarball_name = compute_tarball_name(branch, platform);
    let folder_name = compute_folder_name(branch, platform);

    let mut segments = vec![
        storage.endpoint.trim_end_matches('/'),
        storage.bucket.trim_matches('/'),
    ];
    let prefix = storage.prefix.trim_matches('/');
    if !prefix.is_empty() {
        segments.push(prefix);
    }
    segments.push(branch);
    segments.push(&tarball_name);

    ArtifactLocation {
        url: segments.join("/"),
        tarball_name,
        folder_name,
    }
}

fn filesystem_safe(branch: &str) -> String {
    branch.replace(['/', '\\'], "-")
}
