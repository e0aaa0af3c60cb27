//! Install command - the action's default run

use crate::action::{self, ActionInputs};
use crate::cli::args::InputArgs;
use crate::config::{Config, ConfigManager};
use crate::installer::LocalToolCache;
use crate::reporter::GithubActionsSink;
use crate::resolver::SystemHost;
use crate::ui::UiContext;
use tracing::debug;

/// Execute the install run. Returns whether it succeeded; failures have
/// already been reported to the host.
pub async fn execute(args: InputArgs, config: &Config) -> bool {
    let root = ConfigManager::tool_cache_dir(config);
    let temp = ConfigManager::temp_dir(config);
    debug!("Tool cache at {}, scratch at {}", root.display(), temp.display());

    let cache = LocalToolCache::new(root, temp).with_ui(UiContext::detect());
    let inputs = ActionInputs {
        angle_branch: args.angle_branch,
        legacy_branch: args.branch,
    };
    let mut sink = GithubActionsSink::from_env();

    action::run(&inputs, &config.storage, &SystemHost, &cache, &mut sink).await
}
