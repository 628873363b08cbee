//! CI build cache plugin backed by Google Cloud Storage.
//!
//! Archives mount directories to branch-keyed bucket paths, restores them
//! with a default-branch fallback, and flushes entries past an age threshold.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod plan;
pub mod storage;

pub use error::{CacheError, CacheResult};
