//! Lowest common ancestor computation
//!
//! The LCA of a taxon set is the deepest node common to all of the set's
//! lineages. Because the hierarchy is a tree, that is the last element of
//! the longest common prefix of the root-first lineage paths — identical
//! to intersecting the ancestor sets and taking the maximum-depth member.

use rayon::prelude::*;
use tracing::warn;

use crate::error::QueryError;
use crate::store::TaxonStore;
use taxq_common::types::TaxonId;

impl TaxonStore {
    /// Lowest common ancestor of a set of identifiers
    ///
    /// Stale identifiers are resolved first; deleted and unknown
    /// identifiers are excluded with a warning. If nothing survives
    /// resolution the result is `QueryError::NoCommonAncestor` — never a
    /// silent default. A singleton set's LCA is its own (resolved)
    /// identifier.
    pub fn lca(&self, ids: &[TaxonId]) -> Result<TaxonId, QueryError> {
        let mut paths: Vec<Vec<TaxonId>> = Vec::with_capacity(ids.len());
        for &id in ids {
            match self.lineage(id) {
                Ok(path) => paths.push(path.ids()),
                Err(err) => {
                    warn!(taxid = %id, error = %err, "excluding taxon from LCA computation");
                }
            }
        }

        if paths.is_empty() {
            return Err(QueryError::NoCommonAncestor);
        }

        let shortest = paths.iter().map(Vec::len).min().unwrap_or(0);
        let mut lca = None;
        for position in 0..shortest {
            let candidate = paths[0][position];
            if paths.iter().all(|path| path[position] == candidate) {
                lca = Some(candidate);
            } else {
                break;
            }
        }

        lca.ok_or(QueryError::NoCommonAncestor)
    }

    /// Independent LCA computation over several sets, in parallel
    ///
    /// One result per input set, in input order.
    pub fn lca_multi(&self, sets: &[Vec<TaxonId>]) -> Vec<Result<TaxonId, QueryError>> {
        sets.par_iter().map(|set| self.lca(set)).collect()
    }
}
