//! Branch allow-list and validation

use crate::error::{AngleError, AngleResult};
use tracing::debug;

/// A validated ANGLE branch identifier, always an entry of [`SUPPORTED_BRANCHES`]
pub type Branch = &'static str;

/// Branches with pre-built archives, newest first
pub const SUPPORTED_BRANCHES: &[Branch] = &["fdff117", "chromium/5615"];

/// The branch used when none is requested
pub fn default_branch() -> Branch {
    SUPPORTED_BRANCHES[0]
}

/// Validate a requested branch against the allow-list.
///
/// CI hosts pass an absent input as an empty string, so blank values fall
/// back to [`default_branch`] just like `None`.
pub fn validate_branch(requested: Option<&str>) -> AngleResult<Branch> {
    let requested = match requested.map(str::trim) {
        None | Some("") => {
            debug!("No branch requested, using default {}", default_branch());
            return Ok(default_branch());
        }
        Some(value) => value,
    };

    SUPPORTED_BRANCHES
        .iter()
        .copied()
        .find(|branch| *branch == requested)
        .ok_or_else(|| AngleError::UnsupportedBranch {
            requested: requested.to_string(),
            valid: SUPPORTED_BRANCHES.to_vec(),
        })
}
