//! Error types for setup-angle
//!
//! All modules use `AngleResult<T>` as their return type. Every variant is
//! terminal for the run; the top-level handler turns it into the single
//! failure report.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for setup-angle operations
pub type AngleResult<T> = Result<T, AngleError>;

/// All errors that can occur while installing ANGLE
#[derive(Error, Debug)]
pub enum AngleError {
    // Input errors
    #[error("Unsupported ANGLE branch '{requested}'. Valid branches are: {}", .valid.join(", "))]
    UnsupportedBranch {
        requested: String,
        valid: Vec<&'static str>,
    },

    #[error("Unsupported {kind}: {value}")]
    UnsupportedPlatform { kind: &'static str, value: String },

    // Download errors
    #[error("Failed to download ANGLE tarball: {0}")]
    DownloadFailed(String),

    #[error("HTTP request to {url} failed: {reason}")]
    Http { url: String, reason: String },

    // Tool cache errors
    #[error("Failed to extract {path}: {source}")]
    ExtractionFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to cache {path}: {reason}")]
    CacheStore { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AngleError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an unsupported platform error for a host OS value
    pub fn unsupported_os(value: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            kind: "platform",
            value: value.into(),
        }
    }

    /// Create an unsupported platform error for a host CPU architecture
    pub fn unsupported_arch(value: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            kind: "architecture",
            value: value.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedBranch { .. } => {
                Some("Run `setup-angle branches` to list the supported branches")
            }
            Self::UnsupportedPlatform { .. } => {
                Some("Pre-built ANGLE archives exist for Windows and macOS on amd64 and arm64")
            }
            Self::DownloadFailed(_) => {
                Some("Check S3_ENDPOINT_URL, S3_BUCKET_NAME and S3_PATH_PREFIX")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_branch_lists_valid_values() {
        let err = AngleError::UnsupportedBranch {
            requested: "main".to_string(),
            valid: vec!["fdff117", "chromium/5615"],
        };
        let message = err.to_string();
        assert!(message.contains("'main'"));
        assert!(message.contains("fdff117, chromium/5615"));
    }

    #[test]
    fn unsupported_platform_names_value() {
        assert_eq!(
            AngleError::unsupported_os("linux").to_string(),
            "Unsupported platform: linux"
        );
        assert_eq!(
            AngleError::unsupported_arch("ia32").to_string(),
            "Unsupported architecture: ia32"
        );
    }

    #[test]
    fn download_failed_embeds_cause() {
        let err = AngleError::DownloadFailed("connection refused".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to download ANGLE tarball: connection refused"
        );
    }

    #[test]
    fn error_hint() {
        assert!(AngleError::DownloadFailed(String::new()).hint().is_some());
        assert_eq!(AngleError::Internal("x".to_string()).hint(), None);
    }
}
