//! Tar packing and unpacking of mount directories
//!
//! The tar crate is synchronous, so both operations run under
//! `spawn_blocking` and hand results back as owned paths.

use crate::error::{CacheError, CacheResult};
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempPath};
use tokio::task;

/// Pack `mounts` into a staged tar archive.
///
/// Each mount keeps its own path inside the archive, so unpacking in the
/// working directory recreates the mounts where they were.
pub(super) async fn pack(mounts: Vec<PathBuf>) -> CacheResult<TempPath> {
    task::spawn_blocking(move || {
        let staged = NamedTempFile::new()
            .map_err(|e| CacheError::io("creating archive staging file", e))?;
        {
            let mut builder = tar::Builder::new(staged.as_file());
            for mount in &mounts {
                builder
                    .append_dir_all(mount, mount)
                    .map_err(|e| CacheError::io(format!("archiving {}", mount.display()), e))?;
            }
            builder
                .finish()
                .map_err(|e| CacheError::io("finalizing archive", e))?;
        }
        Ok(staged.into_temp_path())
    })
    .await
    .map_err(|e| CacheError::Internal(format!("archive task failed: {e}")))?
}

/// Unpack the staged archive at `archive` into `dest`
pub(super) async fn unpack(archive: PathBuf, dest: PathBuf) -> CacheResult<()> {
    task::spawn_blocking(move || {
        let file =
            std::fs::File::open(&archive).map_err(|e| CacheError::io("opening staged archive", e))?;
        let mut tarball = tar::Archive::new(file);
        tarball
            .unpack(&dest)
            .map_err(|e| CacheError::io("unpacking archive", e))?;
        Ok(())
    })
    .await
    .map_err(|e| CacheError::Internal(format!("unpack task failed: {e}")))?
}
