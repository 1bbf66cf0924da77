//! Dump file reader
//!
//! Reads the dump file set from disk into memory. Plain `.dmp` files are
//! preferred; a `.dmp.gz` sibling is decompressed transparently when the
//! plain file is absent. `nodes.dmp` and `names.dmp` are required and must
//! be non-empty; `merged.dmp` and `delnodes.dmp` are optional.

use flate2::read::GzDecoder;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{DumpConfig, DELNODES_FILE, MERGED_FILE, NAMES_FILE, NODES_FILE};
use crate::error::{DumpError, Result};
use taxq_common::checksum::compute_file_checksum;
use taxq_common::types::ChecksumAlgorithm;

/// In-memory contents of a dump file set
#[derive(Debug, Clone)]
pub struct DumpFiles {
    /// Contents of `nodes.dmp`
    pub nodes: String,
    /// Contents of `names.dmp`
    pub names: String,
    /// Contents of `merged.dmp`, if present
    pub merged: Option<String>,
    /// Contents of `delnodes.dmp`, if present
    pub deleted: Option<String>,
    /// sha256 checksum per file read from disk, keyed by file name
    pub checksums: BTreeMap<String, String>,
    /// Directory the files were read from
    pub data_dir: PathBuf,
}

impl DumpFiles {
    /// Build a file set from in-memory contents (no disk access)
    pub fn from_contents(nodes: impl Into<String>, names: impl Into<String>) -> Self {
        Self {
            nodes: nodes.into(),
            names: names.into(),
            merged: None,
            deleted: None,
            checksums: BTreeMap::new(),
            data_dir: PathBuf::new(),
        }
    }

    /// Attach `merged.dmp` contents
    pub fn with_merged(mut self, merged: impl Into<String>) -> Self {
        self.merged = Some(merged.into());
        self
    }

    /// Attach `delnodes.dmp` contents
    pub fn with_deleted(mut self, deleted: impl Into<String>) -> Self {
        self.deleted = Some(deleted.into());
        self
    }
}

/// Reader for an on-disk dump file set
pub struct DumpReader {
    config: DumpConfig,
}

impl DumpReader {
    /// Create a new reader for the configured data directory
    pub fn new(config: DumpConfig) -> Self {
        Self { config }
    }

    /// Read the full dump file set into memory
    pub fn read(&self) -> Result<DumpFiles> {
        let data_dir = self.config.data_dir.clone();
        let mut checksums = BTreeMap::new();

        let nodes = self.read_required(NODES_FILE, &mut checksums)?;
        let names = self.read_required(NAMES_FILE, &mut checksums)?;
        let merged = self.read_optional(MERGED_FILE, &mut checksums)?;
        let deleted = self.read_optional(DELNODES_FILE, &mut checksums)?;

        Ok(DumpFiles {
            nodes,
            names,
            merged,
            deleted,
            checksums,
            data_dir,
        })
    }

    fn read_required(
        &self,
        file_name: &str,
        checksums: &mut BTreeMap<String, String>,
    ) -> Result<String> {
        let path = self.config.data_dir.join(file_name);
        let Some(resolved) = resolve_path(&path) else {
            return Err(DumpError::MissingFile { path });
        };

        let content = read_file(&resolved)?;
        if content.trim().is_empty() {
            return Err(DumpError::EmptyFile { path: resolved });
        }

        checksums.insert(
            file_name.to_string(),
            compute_file_checksum(&resolved, ChecksumAlgorithm::Sha256)?,
        );
        debug!(path = %resolved.display(), bytes = content.len(), "read dump file");
        Ok(content)
    }

    fn read_optional(
        &self,
        file_name: &str,
        checksums: &mut BTreeMap<String, String>,
    ) -> Result<Option<String>> {
        let path = self.config.data_dir.join(file_name);
        let Some(resolved) = resolve_path(&path) else {
            debug!(path = %path.display(), "optional dump file absent");
            return Ok(None);
        };

        let content = read_file(&resolved)?;
        checksums.insert(
            file_name.to_string(),
            compute_file_checksum(&resolved, ChecksumAlgorithm::Sha256)?,
        );
        debug!(path = %resolved.display(), bytes = content.len(), "read dump file");
        Ok(Some(content))
    }
}

/// Resolve a dump file path, falling back to a `.gz` sibling
fn resolve_path(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }

    let mut gz = path.as_os_str().to_os_string();
    gz.push(".gz");
    let gz = PathBuf::from(gz);
    gz.is_file().then_some(gz)
}

/// Read a dump file into a string, decompressing `.gz` files
fn read_file(path: &Path) -> Result<String> {
    let io_err = |source| DumpError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path).map_err(io_err)?;
    let mut content = String::new();

    if path.extension().is_some_and(|ext| ext == "gz") {
        GzDecoder::new(file)
            .read_to_string(&mut content)
            .map_err(io_err)?;
    } else {
        std::io::BufReader::new(file)
            .read_to_string(&mut content)
            .map_err(io_err)?;
    }

    Ok(content)
}
