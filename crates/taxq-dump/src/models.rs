//! Taxonomy dump record models

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use taxq_common::types::{NameClass, TaxonId};

/// A single record from `nodes.dmp`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Taxonomy ID of this node
    pub taxid: TaxonId,
    /// Taxonomy ID of the parent node (equal to `taxid` for the root)
    pub parent: TaxonId,
    /// Taxonomic rank (e.g., "species", "genus", "no rank")
    pub rank: String,
}

impl NodeRecord {
    pub fn new(taxid: TaxonId, parent: TaxonId, rank: impl Into<String>) -> Self {
        Self {
            taxid,
            parent,
            rank: rank.into(),
        }
    }

    /// Whether this record denotes the root (it is its own parent)
    pub fn is_root(&self) -> bool {
        self.taxid == self.parent
    }
}

/// A single record from `names.dmp`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    /// Taxonomy ID the name belongs to
    pub taxid: TaxonId,
    /// The name itself
    pub name: String,
    /// Unique variant of the name (empty when the name is already unique)
    pub unique_name: String,
    /// Class of the name (scientific name, synonym, ...)
    pub class: NameClass,
}

impl NameRecord {
    pub fn new(
        taxid: TaxonId,
        name: impl Into<String>,
        unique_name: impl Into<String>,
        class: NameClass,
    ) -> Self {
        Self {
            taxid,
            name: name.into(),
            unique_name: unique_name.into(),
            class,
        }
    }
}

/// A record from `merged.dmp` (old ID merged into new ID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRecord {
    /// Retired taxonomy ID
    pub old_taxid: TaxonId,
    /// Replacement taxonomy ID
    pub new_taxid: TaxonId,
}

impl MergedRecord {
    pub fn new(old_taxid: TaxonId, new_taxid: TaxonId) -> Self {
        Self {
            old_taxid,
            new_taxid,
        }
    }
}

/// A record from `delnodes.dmp`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedRecord {
    /// Deleted taxonomy ID
    pub taxid: TaxonId,
}

impl DeletedRecord {
    pub fn new(taxid: TaxonId) -> Self {
        Self { taxid }
    }
}

/// Complete record set parsed from a taxonomy dump directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpSet {
    /// All node records
    pub nodes: Vec<NodeRecord>,
    /// All name records
    pub names: Vec<NameRecord>,
    /// Merged ids (old -> new)
    pub merged: Vec<MergedRecord>,
    /// Deleted ids
    pub deleted: Vec<DeletedRecord>,
}

impl DumpSet {
    pub fn new(
        nodes: Vec<NodeRecord>,
        names: Vec<NameRecord>,
        merged: Vec<MergedRecord>,
        deleted: Vec<DeletedRecord>,
    ) -> Self {
        Self {
            nodes,
            names,
            merged,
            deleted,
        }
    }

    /// Get a node record by ID
    pub fn get_node(&self, taxid: TaxonId) -> Option<&NodeRecord> {
        self.nodes.iter().find(|n| n.taxid == taxid)
    }

    /// Check if a taxonomy ID was merged, returning the replacement ID
    pub fn is_merged(&self, taxid: TaxonId) -> Option<TaxonId> {
        self.merged
            .iter()
            .find(|m| m.old_taxid == taxid)
            .map(|m| m.new_taxid)
    }

    /// Check if a taxonomy ID was deleted
    pub fn is_deleted(&self, taxid: TaxonId) -> bool {
        self.deleted.iter().any(|d| d.taxid == taxid)
    }

    /// The distinct rank names appearing in the node records
    pub fn rank_names(&self) -> Vec<&str> {
        let mut ranks: Vec<&str> = self.nodes.iter().map(|n| n.rank.as_str()).collect();
        ranks.sort_unstable();
        ranks.dedup();
        ranks
    }

    /// Get statistics about the dump
    pub fn stats(&self) -> DumpStats {
        DumpStats {
            node_count: self.nodes.len(),
            name_count: self.names.len(),
            merged_count: self.merged.len(),
            deleted_count: self.deleted.len(),
        }
    }

    /// Serialize the full record set to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize DumpSet to JSON")
    }
}

/// Statistics about a parsed dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpStats {
    /// Number of node records
    pub node_count: usize,
    /// Number of name records
    pub name_count: usize,
    /// Number of merged ids
    pub merged_count: usize,
    /// Number of deleted ids
    pub deleted_count: usize,
}

impl fmt::Display for DumpStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} names, {} merged, {} deleted",
            self.node_count, self.name_count, self.merged_count, self.deleted_count
        )
    }
}
