//! Error types for sri-static

use thiserror::Error;

/// Result type alias for SRI operations
pub type Result<T> = std::result::Result<T, SriError>;

/// Error types for SRI operations
#[derive(Error, Debug)]
pub enum SriError {
    /// Asset could not be opened or read while hashing
    #[error("Cannot read asset '{path}': {reason}")]
    FileAccess { path: String, reason: String },

    /// Logical static name has no backing file
    #[error("Static file not found: {0}")]
    NotFound(String),

    /// Algorithm identifier outside the supported set
    #[error("Unsupported algorithm '{0}' (expected one of sha256, sha384, sha512)")]
    UnsupportedAlgorithm(String),

    /// No tag template exists for the asset's extension
    #[error("Cannot build a tag for '{0}': only .js and .css assets are supported")]
    UnsupportedExtension(String),

    /// Named cache store is not configured
    #[error("Cache store '{0}' is not configured")]
    CacheStoreUnavailable(String),

    /// Cache store read/write failure
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Invalid configuration provided
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error during output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}
