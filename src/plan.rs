//! Mode selection and remote path resolution
//!
//! Pure computation over the materialized configuration: picks the single
//! requested cache action and produces the normalized remote paths every
//! other component addresses the store with.

use crate::config::Config;
use crate::error::{CacheError, CacheResult};
use std::fmt;
use tracing::info;

/// Archive name used when the filename flag is unset
const DEFAULT_FILENAME: &str = "archive.tar";

/// The single cache action requested for this invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Archive the mount directories and upload the result
    Rebuild,
    /// Download the archive and unpack it into the workspace
    Restore,
    /// Delete remote entries older than the age threshold
    Flush,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rebuild => write!(f, "rebuild"),
            Self::Restore => write!(f, "restore"),
            Self::Flush => write!(f, "flush"),
        }
    }
}

/// Normalized remote locations for one invocation, immutable once resolved
#[derive(Debug, Clone)]
pub struct CachePlan {
    pub mode: Mode,
    /// Branch-specific cache location
    pub path: String,
    /// Default-branch location consulted when the primary is absent
    pub fallback_path: String,
    /// Location scanned for flushable entries
    pub flush_path: String,
    pub filename: String,
}

impl CachePlan {
    /// Full object path of the cache archive
    pub fn archive_path(&self) -> String {
        format!("{}/{}", self.path, self.filename)
    }

    /// Full object path of the fallback archive
    pub fn fallback_archive_path(&self) -> String {
        format!("{}/{}", self.fallback_path, self.filename)
    }
}

/// Validate the requested mode and compute the remote path layout
pub fn resolve(config: &Config) -> CacheResult<CachePlan> {
    let mode = select_mode(config.rebuild, config.restore, config.flush)?;

    if mode == Mode::Rebuild && config.mounts.is_empty() {
        return Err(CacheError::Config(
            "no mounts specified: rebuild needs at least one --mount".to_string(),
        ));
    }

    let repo = &config.repo;

    // Defaults to <owner>/<repo>/<commit branch>
    let path = config.path.clone().unwrap_or_else(|| {
        info!("no path specified, using default");
        format!("{}/{}/{}", repo.owner, repo.name, repo.commit_branch)
    });

    // Defaults to <owner>/<repo>/<default branch>
    let fallback_path = config.fallback_path.clone().unwrap_or_else(|| {
        info!("no fallback path specified, using default");
        format!("{}/{}/{}", repo.owner, repo.name, repo.default_branch)
    });

    // Defaults to <owner>/<repo>
    let flush_path = config.flush_path.clone().unwrap_or_else(|| {
        info!("no flush path specified, using default");
        format!("{}/{}", repo.owner, repo.name)
    });

    let filename = config.filename.clone().unwrap_or_else(|| {
        info!("no filename specified, using {DEFAULT_FILENAME}");
        DEFAULT_FILENAME.to_string()
    });

    Ok(CachePlan {
        mode,
        path: prefix_root(&config.root, &path),
        fallback_path: prefix_root(&config.root, &fallback_path),
        flush_path: prefix_root(&config.root, &flush_path),
        filename,
    })
}

fn select_mode(rebuild: bool, restore: bool, flush: bool) -> CacheResult<Mode> {
    match (rebuild, restore, flush) {
        (true, false, false) => Ok(Mode::Rebuild),
        (false, true, false) => Ok(Mode::Restore),
        (false, false, true) => Ok(Mode::Flush),
        (false, false, false) => Err(CacheError::Config(
            "no cache action specified: pass --rebuild, --restore or --flush".to_string(),
        )),
        _ => Err(CacheError::Config(
            "a single mode is required: pass only one of --rebuild, --restore or --flush"
                .to_string(),
        )),
    }
}

/// Anchor `path` under the root prefix and clean the result
fn prefix_root(root: &str, path: &str) -> String {
    clean_path(&format!("/{root}/{path}"))
}

/// Lexical path cleaning: collapses repeated separators, resolves `.` and
/// `..` segments, drops any trailing separator. The input is treated as
/// absolute and `..` never escapes the root.
fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RepoContext;
    use std::path::PathBuf;

    fn test_config() -> Config {
        Config {
            filename: None,
            root: "root".to_string(),
            path: None,
            fallback_path: None,
            flush_path: None,
            mounts: vec![PathBuf::from("deps")],
            rebuild: false,
            restore: false,
            flush: false,
            flush_age_days: 30,
            repo: RepoContext {
                owner: "o".to_string(),
                name: "r".to_string(),
                default_branch: "master".to_string(),
                commit_branch: "b".to_string(),
            },
            json_key: None,
        }
    }

    #[test]
    fn resolver_requires_exactly_one_mode() {
        for rebuild in [false, true] {
            for restore in [false, true] {
                for flush in [false, true] {
                    let config = Config {
                        rebuild,
                        restore,
                        flush,
                        ..test_config()
                    };
                    let selected = [rebuild, restore, flush].iter().filter(|m| **m).count();
                    assert_eq!(resolve(&config).is_ok(), selected == 1);
                }
            }
        }
    }

    #[test]
    fn rebuild_requires_mounts() {
        let config = Config {
            rebuild: true,
            mounts: vec![],
            ..test_config()
        };
        let err = resolve(&config).unwrap_err();
        assert!(matches!(err, CacheError::Config(_)));
        assert!(err.to_string().contains("mounts"));

        let config = Config {
            rebuild: true,
            ..test_config()
        };
        assert!(resolve(&config).is_ok());
    }

    #[test]
    fn default_paths_follow_repo_context() {
        let config = Config {
            restore: true,
            ..test_config()
        };
        let plan = resolve(&config).unwrap();
        assert_eq!(plan.path, "/root/o/r/b");
        assert_eq!(plan.fallback_path, "/root/o/r/master");
        assert_eq!(plan.flush_path, "/root/o/r");
        assert_eq!(plan.filename, "archive.tar");
    }

    #[test]
    fn overrides_are_anchored_under_the_root() {
        let config = Config {
            restore: true,
            path: Some("custom/location".to_string()),
            fallback_path: Some("//messy//./fallback/".to_string()),
            ..test_config()
        };
        let plan = resolve(&config).unwrap();
        assert_eq!(plan.path, "/root/custom/location");
        assert_eq!(plan.fallback_path, "/root/messy/fallback");
    }

    #[test]
    fn archive_path_joins_path_and_filename() {
        let config = Config {
            restore: true,
            filename: Some("deps.tar".to_string()),
            ..test_config()
        };
        let plan = resolve(&config).unwrap();
        assert_eq!(plan.archive_path(), "/root/o/r/b/deps.tar");
        assert_eq!(plan.fallback_archive_path(), "/root/o/r/master/deps.tar");
    }

    #[test]
    fn empty_root_still_yields_absolute_paths() {
        let config = Config {
            restore: true,
            root: String::new(),
            ..test_config()
        };
        let plan = resolve(&config).unwrap();
        assert_eq!(plan.path, "/o/r/b");
    }

    #[test]
    fn clean_path_normalizes() {
        assert_eq!(clean_path("/a//b/./c/../d/"), "/a/b/d");
        assert_eq!(clean_path("/root/.."), "/");
        assert_eq!(clean_path("/../escape"), "/escape");
        assert_eq!(clean_path("//"), "/");
    }

    #[test]
    fn mode_display() {
        assert_eq!(Mode::Rebuild.to_string(), "rebuild");
        assert_eq!(Mode::Restore.to_string(), "restore");
        assert_eq!(Mode::Flush.to_string(), "flush");
    }
}
