//! Buildcache - CI build cache plugin for Google Cloud Storage
//!
//! CLI entry point that resolves the cache plan and dispatches the
//! requested mode.

use buildcache::cache::Cache;
use buildcache::cli::Cli;
use buildcache::config::Config;
use buildcache::error::CacheResult;
use buildcache::plan::{self, Mode};
use buildcache::storage::GcsStorage;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> CacheResult<()> {
    let cli = Cli::parse();

    // Initialize logging; --debug (PLUGIN_DEBUG) raises the level
    let filter = if cli.debug {
        EnvFilter::new("buildcache=debug")
    } else {
        EnvFilter::new("buildcache=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Materialize the flag/environment surface once, then resolve the
    // mode and remote paths before touching any credentials.
    let config = Config::from_args(&cli)?;
    let plan = plan::resolve(&config)?;
    debug!("resolved cache plan: {plan:?}");

    let storage = GcsStorage::new(config.json_key.as_deref())?;
    let cache = Cache::new(Arc::new(storage));

    match plan.mode {
        Mode::Rebuild => cache.rebuild(&config.mounts, &plan.archive_path()).await?,
        Mode::Restore => {
            cache
                .restore(&plan.archive_path(), &plan.fallback_archive_path())
                .await?
        }
        Mode::Flush => cache.flush(&plan.flush_path, config.flush_age_days).await?,
    }

    info!("{} complete", plan.mode);
    Ok(())
}
