//! Error types for TAXQ

use thiserror::Error;

/// Result type alias for TAXQ operations
pub type Result<T> = std::result::Result<T, TaxqError>;

/// Main error type for TAXQ
#[derive(Error, Debug)]
pub enum TaxqError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
