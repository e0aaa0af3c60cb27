//! setup-angle - CI action entry point
//!
//! Installs ANGLE by default; subcommands inspect branches, cache and config.

use clap::Parser;
use console::style;
use setup_angle::cli::{Cli, Commands};
use setup_angle::config::ConfigManager;
use setup_angle::error::AngleResult;
use setup_angle::reporter::{GithubActionsSink, OutputSink};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AngleResult<ExitCode> {
    let cli = Cli::parse();

    let manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = match manager.load_with(&cli.overrides()).await {
        Ok(config) => config,
        // An install run reports every failure through the CI host
        Err(e) if cli.command.is_none() => {
            GithubActionsSink::from_env().set_failed(&e.to_string());
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e),
    };

    init_logging(cli.verbose, &config.general.log_format);

    match cli.command {
        None => {
            let ok = setup_angle::cli::commands::install(cli.inputs, &config).await;
            Ok(if ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Some(Commands::Branches(args)) => {
            setup_angle::cli::commands::branches(args)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Cache(args)) => {
            setup_angle::cli::commands::cache(args, &config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Config(args)) => {
            setup_angle::cli::commands::config(args, &config, &manager).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Logs go to stderr; stdout carries workflow commands and listings.
/// 0 = info, 1 = debug, 2+ = trace
fn init_logging(verbose: u8, format: &str) {
    let filter = match verbose {
        0 => EnvFilter::new("setup_angle=info"),
        1 => EnvFilter::new("setup_angle=debug"),
        _ => EnvFilter::new("setup_angle=trace"),
    };

    if format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .init();
    }
}
