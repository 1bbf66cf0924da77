//! Dump-to-store load pipeline
//!
//! Orchestrates the full load from an on-disk dump directory to a query-
//! ready store. Load is a one-time, single-threaded initialization step;
//! every failure is fatal and no partially initialized store is ever
//! returned. Once loaded, the store is immutable and safe for concurrent
//! reads.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use crate::store::{LoadOptions, TaxonStore};
use taxq_dump::{DmpParser, DumpConfig, DumpReader};

/// Load pipeline for a taxonomy dump directory
pub struct Loader {
    config: DumpConfig,
    options: LoadOptions,
}

impl Loader {
    /// Create a loader for the given dump configuration
    pub fn new(config: DumpConfig) -> Self {
        Self {
            config,
            options: LoadOptions::default(),
        }
    }

    /// Override store construction options
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the full load pipeline
    ///
    /// Steps:
    /// 1. Read dump files from disk
    /// 2. Parse the dump records
    /// 3. Build the taxon store (validating hierarchy invariants)
    ///
    /// Returns the query-ready store and a report of what was loaded.
    pub fn load(&self) -> Result<(TaxonStore, LoadReport)> {
        let started = Instant::now();

        info!(data_dir = %self.config.data_dir.display(), "Phase 1: reading dump files");
        let files = DumpReader::new(self.config.clone())
            .read()
            .context("Failed to read dump files")?;

        info!("Phase 2: parsing dump records");
        let parser = match self.config.parse_limit {
            Some(limit) => {
                warn!(limit = limit, "parse limit is set, loading a truncated store");
                DmpParser::with_limit(limit)
            }
            None => DmpParser::new(),
        };
        let dump = parser.parse(&files).context("Failed to parse dump files")?;
        let stats = dump.stats();
        info!(
            nodes = stats.node_count,
            names = stats.name_count,
            merged = stats.merged_count,
            deleted = stats.deleted_count,
            "parsed dump records"
        );

        info!("Phase 3: building taxon store");
        let store = TaxonStore::from_dump(dump, self.options.clone())
            .context("Failed to build taxon store")?;

        let report = LoadReport {
            taxa: store.len(),
            names: stats.name_count,
            merged: stats.merged_count,
            deleted: stats.deleted_count,
            checksums: files.checksums,
            data_dir: files.data_dir,
            elapsed_ms: started.elapsed().as_millis() as u64,
            loaded_at: Utc::now(),
        };

        info!(
            taxa = report.taxa,
            elapsed_ms = report.elapsed_ms,
            "taxonomy store loaded"
        );
        Ok((store, report))
    }
}

/// Report of a completed load
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    /// Number of taxa in the store
    pub taxa: usize,
    /// Number of name records in the dump
    pub names: usize,
    /// Number of merged-id records
    pub merged: usize,
    /// Number of deleted-id records
    pub deleted: usize,
    /// sha256 checksum per dump file, keyed by file name
    pub checksums: BTreeMap<String, String>,
    /// Directory the dump was read from
    pub data_dir: PathBuf,
    /// Wall-clock load time in milliseconds
    pub elapsed_ms: u64,
    /// When the load completed
    pub loaded_at: DateTime<Utc>,
}

impl LoadReport {
    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Loaded {} taxa ({} names, {} merged, {} deleted) from {} in {} ms",
            self.taxa,
            self.names,
            self.merged,
            self.deleted,
            self.data_dir.display(),
            self.elapsed_ms
        )
    }
}
