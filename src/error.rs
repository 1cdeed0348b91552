//! Error types for chunk hashing and Merkle root reduction.

use thiserror::Error;

/// Errors surfaced by the chunk hashing and tree reduction stages
#[derive(Debug, Error)]
pub enum MerkleError {
    /// A caller-supplied argument is unusable (zero chunk size, empty leaf set)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The underlying byte source could not be opened or read
    #[error("Source unavailable: {0}")]
    SourceUnavailable(#[from] std::io::Error),

    /// A supplied value does not decode to a 32-byte digest
    #[error("Format error: {0}")]
    Format(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for MerkleError {
    fn from(err: config::ConfigError) -> Self {
        MerkleError::Config(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, MerkleError>;
