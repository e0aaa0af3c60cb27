//! Resolution of a requested branch into a concrete artifact
//!
//! Validates the branch against the static allow-list, detects the host
//! platform and computes where the pre-built archive lives and what it is
//! called locally.

pub mod artifact;
pub mod branch;
pub mod platform;

pub use artifact::{
    compute_artifact_location, compute_folder_name, compute_tarball_name, ArtifactLocation,
};
pub use branch::{default_branch, validate_branch, Branch, SUPPORTED_BRANCHES};
pub use platform::{detect_platform, HostArch, HostInfo, HostOs, Platform, SystemHost};
