//! CLI argument definitions using clap derive
//!
//! Every flag binds to the environment variable its CI runner provides,
//! so the binary works both as a plugin step and from a shell.

use clap::Parser;
use std::path::PathBuf;

/// CI build cache plugin backed by Google Cloud Storage.
///
/// Archives mount directories to a bucket path keyed by repository and
/// branch, restores them on later builds, and flushes entries past an
/// age threshold.
#[derive(Parser, Debug)]
#[command(name = "buildcache")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Filename for the cache archive
    #[arg(long, env = "PLUGIN_FILENAME")]
    pub filename: Option<String>,

    /// Bucket used as the root prefix for all cache paths
    #[arg(long, env = "PLUGIN_BUCKET", default_value = "")]
    pub bucket: String,

    /// Path to place the cache archive at
    #[arg(long, env = "PLUGIN_PATH")]
    pub path: Option<String>,

    /// Secondary path consulted when the primary archive is absent
    #[arg(long, env = "PLUGIN_FALLBACK_PATH")]
    pub fallback_path: Option<String>,

    /// Directories to cache (repeatable; comma-separated in the environment)
    #[arg(long = "mount", env = "PLUGIN_MOUNT", value_delimiter = ',')]
    pub mount: Vec<PathBuf>,

    /// Rebuild the cache from the mount directories
    #[arg(long, env = "PLUGIN_REBUILD")]
    pub rebuild: bool,

    /// Restore the mount directories from the cache
    #[arg(long, env = "PLUGIN_RESTORE")]
    pub restore: bool,

    /// Flush cache entries past the age threshold
    #[arg(long, env = "PLUGIN_FLUSH")]
    pub flush: bool,

    /// Flush cache entries older than this many days
    #[arg(long, env = "PLUGIN_FLUSH_AGE", default_value = "30")]
    pub flush_age: String,

    /// Path to scan for flushable cache entries
    #[arg(long, env = "PLUGIN_FLUSH_PATH")]
    pub flush_path: Option<String>,

    /// Enable debug logging
    #[arg(long, env = "PLUGIN_DEBUG")]
    pub debug: bool,

    /// Repository owner
    #[arg(long, env = "DRONE_REPO_OWNER", default_value = "")]
    pub repo_owner: String,

    /// Repository name
    #[arg(long, env = "DRONE_REPO_NAME", default_value = "")]
    pub repo_name: String,

    /// Repository default branch
    #[arg(long, env = "DRONE_REPO_BRANCH", default_value = "master")]
    pub repo_branch: String,

    /// Branch the triggering commit is on
    #[arg(long, env = "DRONE_COMMIT_BRANCH", default_value = "master")]
    pub commit_branch: String,

    /// Google service account JSON key
    #[arg(long, env = "PLUGIN_JSON_KEY", hide_env_values = true)]
    pub json_key: Option<String>,
}
