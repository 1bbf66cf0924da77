//! Engine error types
//!
//! Load-time failures (`LoadError`) are fatal and abort store construction;
//! per-query failures (`QueryError`) are returned per call and never affect
//! store state. Merged and deleted identifiers are lookup *outcomes*
//! (`store::Resolution`), not errors — callers choose how to treat them.

use taxq_common::TaxonId;
use taxq_dump::DumpError;
use thiserror::Error;

/// Fatal errors raised while constructing a taxon store
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Dump(#[from] DumpError),

    #[error("duplicate taxon id {0} in node records")]
    DuplicateTaxon(TaxonId),

    #[error("taxon {child} references missing parent {parent}")]
    MissingParent { child: TaxonId, parent: TaxonId },

    #[error("cycle detected in parent chain at taxon {0}")]
    CycleDetected(TaxonId),

    #[error("no root taxon found in node records")]
    MissingRoot,

    #[error("multiple root taxa found ({0}, {1})")]
    MultipleRoots(TaxonId, TaxonId),
}

/// Per-query errors over a loaded store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("taxon not found: {0}")]
    NotFound(TaxonId),

    #[error("taxon {0} has been deleted")]
    Deleted(TaxonId),

    #[error("no common ancestor among resolvable taxa")]
    NoCommonAncestor,

    #[error("invalid lineage format: {0}")]
    InvalidFormat(String),
}
