//! One-time materialization of the flag/environment surface
//!
//! The parsed CLI is folded into an immutable `Config` exactly once; the
//! resolver and the backend constructor receive this value instead of
//! reading ambient state.

use crate::cli::Cli;
use crate::error::{CacheError, CacheResult};
use std::path::PathBuf;

/// Repository coordinates the CI system provides for path defaulting
#[derive(Debug, Clone)]
pub struct RepoContext {
    pub owner: String,
    pub name: String,
    /// Default branch of the repository (fallback cache location)
    pub default_branch: String,
    /// Branch the triggering commit is on (primary cache location)
    pub commit_branch: String,
}

/// Immutable snapshot of everything the plugin was invoked with
#[derive(Debug, Clone)]
pub struct Config {
    pub filename: Option<String>,
    /// Root prefix (the bucket) anchoring every cache path
    pub root: String,
    pub path: Option<String>,
    pub fallback_path: Option<String>,
    pub flush_path: Option<String>,
    pub mounts: Vec<PathBuf>,
    pub rebuild: bool,
    pub restore: bool,
    pub flush: bool,
    pub flush_age_days: u32,
    pub repo: RepoContext,
    pub json_key: Option<String>,
}

impl Config {
    /// Build the immutable configuration from the parsed CLI
    pub fn from_args(cli: &Cli) -> CacheResult<Self> {
        let flush_age_days = cli.flush_age.trim().parse::<u32>().map_err(|_| {
            CacheError::Config(format!(
                "invalid flush age {:?}: expected a whole number of days",
                cli.flush_age
            ))
        })?;

        // PLUGIN_JSON_KEY is the primary credential source; the legacy
        // GCS_CACHE_JSON_KEY variable is honored as a fallback.
        let json_key = non_empty(&cli.json_key).or_else(|| {
            std::env::var("GCS_CACHE_JSON_KEY")
                .ok()
                .filter(|v| !v.is_empty())
        });

        Ok(Self {
            filename: non_empty(&cli.filename),
            root: cli.bucket.clone(),
            path: non_empty(&cli.path),
            fallback_path: non_empty(&cli.fallback_path),
            flush_path: non_empty(&cli.flush_path),
            mounts: cli.mount.clone(),
            rebuild: cli.rebuild,
            restore: cli.restore,
            flush: cli.flush,
            flush_age_days,
            repo: RepoContext {
                owner: cli.repo_owner.clone(),
                name: cli.repo_name.clone(),
                default_branch: cli.repo_branch.clone(),
                commit_branch: cli.commit_branch.clone(),
            },
            json_key,
        })
    }
}

/// Empty flag/environment values count as unset
fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
