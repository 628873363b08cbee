//! Remote object store contract
//!
//! Cache locations are addressed by a flat path string whose first segment
//! is the bucket and whose remainder is the object key. The contract is a
//! capability trait so additional backends (local filesystem, other object
//! stores) can sit next to the GCS one without touching the cache engine.

pub mod gcs;

pub use gcs::GcsStorage;

use crate::error::CacheResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::io::{AsyncRead, AsyncWrite};

/// One remote object, as reported by [`Storage::list`]
#[derive(Debug, Clone)]
pub struct StorageEntry {
    /// `bucket/key` address of the object
    pub path: String,
    /// Object size in bytes
    pub size: u64,
    /// Server-side last modification time
    pub last_modified: DateTime<Utc>,
}

/// Remote object store capability consumed by the cache engine
///
/// Operations are one-shot request/response calls; nothing is retried
/// internally and errors surface unchanged. Implementations are not
/// required to be safe for concurrent overlapping calls.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Stream the object at `path` into `dst`
    async fn fetch(
        &self,
        path: &str,
        dst: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> CacheResult<()>;

    /// Stream `src` into the object at `path`, replacing any existing
    /// object there. The source is consumed to EOF even on failure, so an
    /// upstream producer is never left blocked on an abandoned pipe.
    async fn store(&self, path: &str, src: &mut (dyn AsyncRead + Send + Unpin))
        -> CacheResult<()>;

    /// Enumerate the objects reachable from `path`'s bucket. The key
    /// segment is accepted but not applied as a prefix filter: the whole
    /// bucket is returned, which the flush scan relies on.
    async fn list(&self, path: &str) -> CacheResult<Vec<StorageEntry>>;

    /// Remove the single object at `path`
    async fn delete(&self, path: &str) -> CacheResult<()>;
}

/// Split a cache path into its bucket and key halves.
///
/// A single leading separator is tolerated. Bucket names are
/// case-insensitive and normalized to lowercase; keys preserve case. Both
/// halves must be non-empty or the split fails.
pub(crate) fn split_path(path: &str) -> Option<(String, String)> {
    let full = path.strip_prefix('/').unwrap_or(path);
    let separator = full.find('/')?;
    let (bucket, key) = (&full[..separator], &full[separator + 1..]);

    if bucket.is_empty() || key.is_empty() {
        return None;
    }

    Some((bucket.to_ascii_lowercase(), key.to_string()))
}

/// Consume the remainder of an abandoned source so its producer unblocks
pub(crate) async fn drain(src: &mut (dyn AsyncRead + Send + Unpin)) -> u64 {
    tokio::io::copy(src, &mut tokio::io::sink())
        .await
        .unwrap_or(0)
}
