//! Cache orchestration engine
//!
//! Backend-agnostic rebuild/restore/flush over the [`Storage`] contract:
//! rebuild packs the mount directories into a tar archive and streams it
//! to the remote store; restore pulls the archive (falling back once to
//! the default-branch location) and unpacks it into the working
//! directory; flush prunes remote entries older than the age threshold.

mod archive;

use crate::error::{CacheError, CacheResult};
use crate::storage::Storage;
use chrono::{Duration, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs::File;
use tracing::{info, warn};

/// The cache engine, generic over the remote store
pub struct Cache {
    storage: Arc<dyn Storage>,
}

impl Cache {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Archive the mount directories and upload the result to `dst`
    pub async fn rebuild(&self, mounts: &[PathBuf], dst: &str) -> CacheResult<()> {
        info!("rebuilding cache from {} mount(s) into {dst}", mounts.len());

        let staged = archive::pack(mounts.to_vec()).await?;
        let mut src = File::open(&staged)
            .await
            .map_err(|e| CacheError::io("opening staged archive", e))?;

        self.storage.store(dst, &mut src).await
    }

    /// Fetch and unpack the archive at `src`, retrying once against
    /// `fallback` when the two differ
    pub async fn restore(&self, src: &str, fallback: &str) -> CacheResult<()> {
        match self.fetch_and_unpack(src).await {
            Err(err) if src != fallback => {
                warn!("restore from {src} failed ({err}), trying fallback");
                self.fetch_and_unpack(fallback).await
            }
            result => result,
        }
    }

    /// Delete every entry reachable from `scan_path` older than
    /// `max_age_days`
    pub async fn flush(&self, scan_path: &str, max_age_days: u32) -> CacheResult<()> {
        info!("flushing cache entries older than {max_age_days} day(s)");

        let cutoff = Utc::now() - Duration::days(i64::from(max_age_days));
        let entries = self.storage.list(scan_path).await?;
        let total = entries.len();
        let mut flushed = 0usize;

        for entry in entries {
            if entry.last_modified < cutoff {
                info!(
                    "flushing {} (last modified {})",
                    entry.path, entry.last_modified
                );
                self.storage.delete(&entry.path).await?;
                flushed += 1;
            }
        }

        info!("flushed {flushed} of {total} cache entries");
        Ok(())
    }

    async fn fetch_and_unpack(&self, src: &str) -> CacheResult<()> {
        info!("restoring cache from {src}");

        let staged = tempfile::NamedTempFile::new()
            .map_err(|e| CacheError::io("creating staging file", e))?;
        let mut dst = File::create(staged.path())
            .await
            .map_err(|e| CacheError::io("opening staging file", e))?;

        self.storage.fetch(src, &mut dst).await?;
        drop(dst);

        archive::unpack(staged.path().to_path_buf(), PathBuf::from(".")).await
    }
}
