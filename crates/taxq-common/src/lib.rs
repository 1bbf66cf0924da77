//! TAXQ Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the TAXQ workspace.
//!
//! # Overview
//!
//! This crate provides common functionality used across all TAXQ workspace
//! members:
//!
//! - **Error Handling**: Custom error types and result types
//! - **Logging**: Centralized tracing initialization
//! - **Checksums**: Dump file integrity verification utilities
//! - **Types**: Shared domain types (`TaxonId`, `NameClass`)
//!
//! # Example
//!
//! ```no_run
//! use taxq_common::checksum::compute_file_checksum;
//! use taxq_common::types::ChecksumAlgorithm;
//! use taxq_common::Result;
//!
//! fn fingerprint(path: &str) -> Result<String> {
//!     compute_file_checksum(path, ChecksumAlgorithm::Sha256)
//! }
//! ```

pub mod checksum;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{Result, TaxqError};
pub use types::TaxonId;
