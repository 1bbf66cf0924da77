//! Dump-layer error types
//!
//! All load-time failures are fatal: a dump that cannot be read or parsed
//! aborts store construction rather than yielding a partial record set.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dump operations
pub type Result<T> = std::result::Result<T, DumpError>;

/// Errors raised while locating, reading, or parsing dump files
#[derive(Error, Debug)]
pub enum DumpError {
    #[error("required dump file not found: {path}")]
    MissingFile { path: PathBuf },

    #[error("dump file is empty: {path}")]
    EmptyFile { path: PathBuf },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record in {file} at line {line}: {reason}")]
    Malformed {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("checksum failure: {0}")]
    Checksum(#[from] taxq_common::TaxqError),
}

impl DumpError {
    /// Build a `Malformed` error for a record in `file` at `line`
    pub fn malformed(file: &str, line: usize, reason: impl Into<String>) -> Self {
        DumpError::Malformed {
            file: file.to_string(),
            line,
            reason: reason.into(),
        }
    }
}
