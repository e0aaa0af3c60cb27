//! Config command - show or initialize configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::AngleResult;
use crate::ui::{self, UiContext};

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config, manager: &ConfigManager) -> AngleResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> AngleResult<()> {
    println!("{}", toml::to_string_pretty(config)?);

    let ctx = UiContext::detect();
    ui::key_value(
        &ctx,
        "tool cache",
        &ConfigManager::tool_cache_dir(config).display().to_string(),
    );
    ui::key_value(
        &ctx,
        "scratch",
        &ConfigManager::temp_dir(config).display().to_string(),
    );
    Ok(())
}

async fn init_config(manager: &ConfigManager, force: bool) -> AngleResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    ui::step_ok_detail(&ctx, "Configuration initialized", &path.display().to_string());
    ui::remark(&ctx, "S3_* and RUNNER_* environment variables still take precedence");

    Ok(())
}
