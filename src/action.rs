//! The action's single sequential run
//!
//! validate input → detect platform → compute location → install → report

use crate::config::schema::StorageConfig;
use crate::error::AngleResult;
use crate::installer::{self, Installation, ToolCache};
use crate::reporter::{self, OutputSink};
use crate::resolver::{self, HostInfo};
use tracing::{debug, info};

/// Inputs read from the invoking host
#[derive(Debug, Clone, Default)]
pub struct ActionInputs {
    /// Requested ANGLE branch (`angle-branch`)
    pub angle_branch: Option<String>,
    /// Input of the earliest action revision (`branch`); read but not used
    pub legacy_branch: Option<String>,
}

/// Resolve and install the requested ANGLE build
pub async fn setup(
    inputs: &ActionInputs,
    storage: &StorageConfig,
    host: &dyn HostInfo,
    cache: &dyn ToolCache,
) -> AngleResult<Installation> {
    if let Some(legacy) = inputs.legacy_branch.as_deref().filter(|v| !v.is_empty()) {
        info!(
            "Ignoring input 'branch' ({}); use 'angle-branch' to select a branch",
            legacy
        );
    }

    let branch = resolver::validate_branch(inputs.angle_branch.as_deref())?;
    info!("Setting up ANGLE from branch: {}", branch);

    let platform = resolver::detect_platform(host)?;
    debug!("Detected platform {}", platform);

    let location = resolver::compute_artifact_location(branch, &platform, storage);
    debug!("Artifact location: {}", location.url);

    installer::install(branch, platform, &location, cache).await
}

/// Run the action end to end and report through `sink`. Returns whether it succeeded.
pub async fn run(
    inputs: &ActionInputs,
    storage: &StorageConfig,
    host: &dyn HostInfo,
    cache: &dyn ToolCache,
    sink: &mut dyn OutputSink,
) -> bool {
    let result = setup(inputs, storage, host, cache).await;
    reporter::report(result, sink)
}
