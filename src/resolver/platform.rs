//! Host platform detection
//!
//! Host introspection sits behind [`HostInfo`] so detection can be driven
//! by a fake host in tests.

use crate::error::{AngleError, AngleResult};
use serde::Serialize;
use std::fmt;

/// Source of the raw host OS and CPU architecture names
pub trait HostInfo {
    /// Raw OS name (e.g. "windows", "macos", or the Node-style "win32", "darwin")
    fn os(&self) -> &str;

    /// Raw CPU architecture name (e.g. "x86_64", "aarch64", or "x64", "arm64")
    fn arch(&self) -> &str;
}

/// The machine this binary runs on
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl HostInfo for SystemHost {
    fn os(&self) -> &str {
        std::env::consts::OS
    }

    fn arch(&self) -> &str {
        std::env::consts::ARCH
    }
}

/// Operating systems with pre-built archives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostOs {
    Windows,
    Macos,
}

impl HostOs {
    /// Parse a raw host OS name
    pub fn from_raw(raw: &str) -> AngleResult<Self> {
        match raw {
            "win32" | "windows" => Ok(Self::Windows),
            "darwin" | "macos" => Ok(Self::Macos),
            other => Err(AngleError::unsupported_os(other)),
        }
    }

    /// Name used in artifact file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Macos => "macos",
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU architectures with pre-built archives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostArch {
    Amd64,
    Arm64,
}

impl HostArch {
    /// All architectures, in the order caches are listed
    pub const ALL: [HostArch; 2] = [HostArch::Amd64, HostArch::Arm64];

    /// Parse a raw CPU architecture name
    pub fn from_raw(raw: &str) -> AngleResult<Self> {
        match raw {
            "x64" | "x86_64" => Ok(Self::Amd64),
            "arm64" | "aarch64" => Ok(Self::Arm64),
            other => Err(AngleError::unsupported_arch(other)),
        }
    }

    /// Name used in artifact file names and cache keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for HostArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detected (OS, architecture) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Platform {
    pub os: HostOs,
    pub arch: HostArch,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// Detect the platform of `host`, failing on anything without an archive
pub fn detect_platform(host: &dyn HostInfo) -> AngleResult<Platform> {
    let os = HostOs::from_raw(host.os())?;
    let arch = HostArch::from_raw(host.arch())?;
    Ok(Platform { os, arch })
}
