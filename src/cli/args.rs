//! CLI argument definitions using clap derive

use crate::config::Overrides;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// setup-angle - install pre-built ANGLE binaries in CI
///
/// Without a subcommand, resolves the requested branch, installs it from
/// the tool cache or object storage, and reports `angle-branch` and
/// `angle-path` as action outputs.
#[derive(Parser, Debug)]
#[command(name = "setup-angle")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute (installs when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Action inputs
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Storage and cache locations
    #[command(flatten)]
    pub locations: LocationArgs,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SETUP_ANGLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log format: text or json
    #[arg(long, global = true)]
    pub log_format: Option<String>,
}

/// Inputs the CI host passes to the action
#[derive(Parser, Debug, Default)]
pub struct InputArgs {
    /// ANGLE branch to install (defaults to the newest supported branch)
    #[arg(long, env = "INPUT_ANGLE-BRANCH")]
    pub angle_branch: Option<String>,

    /// Input of the first action revision, accepted and ignored
    #[arg(long, env = "INPUT_BRANCH", hide = true)]
    pub branch: Option<String>,
}

/// Where archives come from and where they are cached
#[derive(Parser, Debug, Default)]
pub struct LocationArgs {
    /// Object storage endpoint URL
    #[arg(long, global = true, env = "S3_ENDPOINT_URL")]
    pub endpoint: Option<String>,

    /// Object storage bucket
    #[arg(long, global = true, env = "S3_BUCKET_NAME")]
    pub bucket: Option<String>,

    /// Key prefix inside the bucket
    #[arg(long, global = true, env = "S3_PATH_PREFIX")]
    pub prefix: Option<String>,

    /// Tool cache root
    #[arg(long, global = true, env = "RUNNER_TOOL_CACHE")]
    pub tool_cache: Option<String>,

    /// Scratch directory for downloads and extraction
    #[arg(long, global = true, env = "RUNNER_TEMP")]
    pub temp_dir: Option<String>,
}

impl Cli {
    /// Config overrides carried by flags and environment
    pub fn overrides(&self) -> Overrides {
        Overrides {
            endpoint: self.locations.endpoint.clone(),
            bucket: self.locations.bucket.clone(),
            prefix: self.locations.prefix.clone(),
            tool_cache: self.locations.tool_cache.clone(),
            temp_dir: self.locations.temp_dir.clone(),
            log_format: self.log_format.clone(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the supported ANGLE branches
    Branches(BranchesArgs),

    /// Inspect the local tool cache
    Cache(CacheArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the branches command
#[derive(Parser, Debug)]
pub struct BranchesArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cached ANGLE installations
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Show the config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
