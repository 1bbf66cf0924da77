//! Subtree enumeration
//!
//! Depth-first pre-order traversal of the child index. The lazy iterator
//! is the primary interface; `subtree_map` is the eager raw mode used for
//! structural export, serializing as the nested name-keyed map shape.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::QueryError;
use crate::store::{Taxon, TaxonStore};
use taxq_common::types::TaxonId;

/// Lazy depth-first pre-order iterator over a subtree
///
/// Yields the starting taxon first, then every descendant exactly once,
/// children in ascending id order. Restart a traversal by calling
/// [`TaxonStore::subtree`] again.
pub struct SubtreeIter<'a> {
    store: &'a TaxonStore,
    stack: Vec<TaxonId>,
}

impl<'a> Iterator for SubtreeIter<'a> {
    type Item = &'a Taxon;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        // children are sorted ascending; push reversed so the smallest
        // id is visited first
        for &child in self.store.children_ids(id).iter().rev() {
            self.stack.push(child);
        }
        self.store.get(id)
    }
}

/// Eagerly built nested subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtreeNode {
    /// Taxonomy ID
    pub id: TaxonId,
    /// Taxonomic rank
    pub rank: String,
    /// Scientific name
    pub name: String,
    /// Child subtrees, ascending id order
    pub children: Vec<SubtreeNode>,
}

impl SubtreeNode {
    /// Display label in `"<id> [<rank>] <name>"` form
    pub fn label(&self) -> String {
        format!("{} [{}] {}", self.id, self.rank, self.name)
    }

    /// Total number of taxa in this subtree (including this node)
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(SubtreeNode::count).sum::<usize>()
    }
}

// Serializes as a single-entry map keyed by the node label, with the
// children as a nested label-keyed map: the raw export shape.
impl Serialize for SubtreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.label(), &ChildMap(&self.children))?;
        map.end()
    }
}

struct ChildMap<'a>(&'a [SubtreeNode]);

impl Serialize for ChildMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for child in self.0 {
            map.serialize_entry(&child.label(), &ChildMap(&child.children))?;
        }
        map.end()
    }
}

impl TaxonStore {
    /// Lazily enumerate a taxon and all of its descendants
    ///
    /// Stale identifiers are resolved first; deleted ids are
    /// `QueryError::Deleted` and unknown ids `QueryError::NotFound`.
    pub fn subtree(&self, id: TaxonId) -> Result<SubtreeIter<'_>, QueryError> {
        let resolved = self.resolve_target(id)?;
        Ok(SubtreeIter {
            store: self,
            stack: vec![resolved],
        })
    }

    /// Eagerly build the nested subtree of a taxon
    ///
    /// Matches the recursive tree shape; intended for structural export
    /// rather than streaming consumption.
    pub fn subtree_map(&self, id: TaxonId) -> Result<SubtreeNode, QueryError> {
        let resolved = self.resolve_target(id)?;
        self.build_subtree_node(resolved)
            .ok_or(QueryError::NotFound(resolved))
    }

    fn build_subtree_node(&self, id: TaxonId) -> Option<SubtreeNode> {
        let taxon = self.get(id)?;
        Some(SubtreeNode {
            id,
            rank: taxon.rank.clone(),
            name: taxon.name.clone(),
            children: self
                .children_ids(id)
                .iter()
                .filter_map(|&child| self.build_subtree_node(child))
                .collect(),
        })
    }
}
