//! Error types for the cache plugin.
//!
//! All modules use `CacheResult<T>` as their return type.

use thiserror::Error;

/// Result type alias for cache plugin operations
pub type CacheResult<T> = Result<T, CacheError>;

/// All errors that can occur in the plugin
#[derive(Error, Debug)]
pub enum CacheError {
    // Configuration errors
    #[error("invalid configuration: {0}")]
    Config(String),

    // Credential errors
    #[error("credential error: {0}")]
    Credential(String),

    // Storage addressing
    #[error("invalid cache path {0:?}: expected bucket/key")]
    InvalidPath(String),

    // Remote service failures
    #[error("storage backend error: {0}")]
    Backend(#[from] object_store::Error),

    #[error("incomplete upload of {path}: content transferred but not finalized")]
    PartialWrite {
        path: String,
        #[source]
        source: object_store::Error,
    },

    // Local IO errors
    #[error("io error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // General errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Config(_) => Some("run with --help for the full flag and environment surface"),
            Self::Credential(_) => {
                Some("provide a service account key via --json-key or PLUGIN_JSON_KEY")
            }
            _ => None,
        }
    }
}
