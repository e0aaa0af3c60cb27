//! Cache command - inspect the local tool cache

use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config::{Config, ConfigManager};
use crate::error::AngleResult;
use crate::installer::{CacheKey, LocalToolCache, ToolCache, TOOL_NAME};
use crate::resolver::HostArch;
use serde::Serialize;
use std::path::PathBuf;

/// A cached installation as listed by `cache list`
#[derive(Debug, Clone, Serialize)]
pub struct CachedEntry {
    pub version: String,
    pub arch: HostArch,
    pub path: PathBuf,
}

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> AngleResult<()> {
    let cache = LocalToolCache::new(
        ConfigManager::tool_cache_dir(config),
        ConfigManager::temp_dir(config),
    );

    match args.action {
        CacheAction::List { format } => {
            let entries = cached_entries(&cache).await?;
            if entries.is_empty() {
                println!(
                    "No cached ANGLE installations in {}",
                    cache.root().display()
                );
                return Ok(());
            }

            match format {
                OutputFormat::Table => print_cache_table(&entries),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                OutputFormat::Plain => {
                    for entry in &entries {
                        println!("{} {}", entry.version, entry.arch);
                    }
                }
            }
            Ok(())
        }
    }
}

/// Collect every complete ANGLE entry in `cache`
pub async fn cached_entries(cache: &dyn ToolCache) -> AngleResult<Vec<CachedEntry>> {
    let mut entries = Vec::new();
    for arch in HostArch::ALL {
        for version in cache.find_all_versions(TOOL_NAME, arch).await? {
            if let Some(path) = cache.find(&CacheKey::angle(&version, arch)).await? {
                entries.push(CachedEntry {
                    version,
                    arch,
                    path,
                });
            }
        }
    }
    Ok(entries)
}

fn print_cache_table(entries: &[CachedEntry]) {
    println!("{:<16} {:<8} PATH", "VERSION", "ARCH");
    println!("{}", "-".repeat(80));

    for entry in entries {
        println!(
            "{:<16} {:<8} {}",
            entry.version,
            entry.arch.as_str(),
            entry.path.display()
        );
    }

    println!();
    println!("Total: {} installation(s)", entries.len());
}
