//! Dump file set configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// File name of the node records
pub const NODES_FILE: &str = "nodes.dmp";
/// File name of the name records
pub const NAMES_FILE: &str = "names.dmp";
/// File name of the merged-id records
pub const MERGED_FILE: &str = "merged.dmp";
/// File name of the deleted-id records
pub const DELNODES_FILE: &str = "delnodes.dmp";

/// Configuration for locating and loading a taxonomy dump file set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Directory containing the `.dmp` files (default: `~/.taxq`)
    pub data_dir: PathBuf,
    /// Maximum number of node records to parse (None for unlimited)
    pub parse_limit: Option<usize>,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            parse_limit: None,
        }
    }
}

impl DumpConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `TAXQ_DATA_DIR`: Directory containing the `.dmp` files
    /// - `TAXQ_PARSE_LIMIT`: Maximum number of node records to parse
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("TAXQ_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(limit) = std::env::var("TAXQ_PARSE_LIMIT") {
            config.parse_limit = limit.parse::<usize>().ok();
        }

        Ok(config)
    }

    /// Set the data directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the parse limit
    pub fn with_parse_limit(mut self, limit: usize) -> Self {
        self.parse_limit = Some(limit);
        self
    }

    /// Path to the node records file
    pub fn nodes_path(&self) -> PathBuf {
        self.data_dir.join(NODES_FILE)
    }

    /// Path to the name records file
    pub fn names_path(&self) -> PathBuf {
        self.data_dir.join(NAMES_FILE)
    }

    /// Path to the merged-id records file
    pub fn merged_path(&self) -> PathBuf {
        self.data_dir.join(MERGED_FILE)
    }

    /// Path to the deleted-id records file
    pub fn delnodes_path(&self) -> PathBuf {
        self.data_dir.join(DELNODES_FILE)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".taxq"))
        .unwrap_or_else(|| PathBuf::from(".taxq"))
}

/// Check whether a directory looks like a taxonomy dump directory
/// (contains a non-empty `nodes.dmp` or `nodes.dmp.gz`)
pub fn has_dump(dir: impl AsRef<Path>) -> bool {
    let dir = dir.as_ref();
    [NODES_FILE, "nodes.dmp.gz"].iter().any(|name| {
        let path = dir.join(name);
        std::fs::metadata(&path).map(|m| m.len() > 0).unwrap_or(false)
    })
}
