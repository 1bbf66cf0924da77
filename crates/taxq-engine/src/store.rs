//! Taxon store
//!
//! In-memory indexed representation of all taxon nodes and their
//! parent/child/name/rank relationships. Built once from a parsed dump
//! (`from_dump`); read-only afterwards.
//!
//! Construction validates the structural invariants of the hierarchy and
//! fails fatally on violation: duplicate ids, dangling parent references,
//! parent cycles, and missing or multiple roots all abort the load.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::error::{LoadError, QueryError};
use crate::rank::RankOrder;
use taxq_common::types::TaxonId;
use taxq_dump::DumpSet;

/// A single taxon node, owned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxon {
    /// Taxonomy ID
    pub id: TaxonId,
    /// Scientific name
    pub name: String,
    /// Taxonomic rank (e.g., "species", "genus", "no rank")
    pub rank: String,
    /// Parent taxonomy ID (None for the root)
    pub parent: Option<TaxonId>,
}

/// Options controlling store construction
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Index every name class for `lookup_by_name(_, false)`; when false,
    /// only scientific names are indexed and both lookup modes coincide
    pub index_all_names: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            index_all_names: true,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_all_names(mut self, index_all_names: bool) -> Self {
        self.index_all_names = index_all_names;
        self
    }
}

/// Outcome of resolving a possibly-stale identifier
///
/// Merged and deleted identifiers are outcomes rather than errors; callers
/// decide how to treat them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The identifier is live in the store
    Current(TaxonId),
    /// The identifier was merged into another taxon
    Merged { old: TaxonId, new: TaxonId },
    /// The identifier was deleted upstream
    Deleted(TaxonId),
    /// The identifier is not known to the store at all
    Unknown(TaxonId),
}

impl Resolution {
    /// The live identifier this resolution points at, if any
    pub fn target(&self) -> Option<TaxonId> {
        match self {
            Resolution::Current(id) => Some(*id),
            Resolution::Merged { new, .. } => Some(*new),
            Resolution::Deleted(_) | Resolution::Unknown(_) => None,
        }
    }
}

/// Identifier- and name-indexed taxonomy store
///
/// Immutable after construction; all queries take `&self`. Share a loaded
/// store behind an `Arc` for concurrent use.
#[derive(Debug, Clone)]
pub struct TaxonStore {
    taxa: HashMap<TaxonId, Taxon>,
    children: HashMap<TaxonId, Vec<TaxonId>>,
    sci_names: HashMap<String, Vec<TaxonId>>,
    all_names: HashMap<String, Vec<TaxonId>>,
    merged: HashMap<TaxonId, TaxonId>,
    deleted: HashSet<TaxonId>,
    depths: HashMap<TaxonId, u32>,
    rank_order: RankOrder,
    root: TaxonId,
}

impl TaxonStore {
    /// Build a store from a parsed dump
    pub fn from_dump(dump: DumpSet, options: LoadOptions) -> Result<Self, LoadError> {
        let mut taxa: HashMap<TaxonId, Taxon> = HashMap::with_capacity(dump.nodes.len());
        let mut root: Option<TaxonId> = None;

        for node in &dump.nodes {
            let parent = if node.is_root() {
                match root {
                    Some(existing) => return Err(LoadError::MultipleRoots(existing, node.taxid)),
                    None => root = Some(node.taxid),
                }
                None
            } else {
                Some(node.parent)
            };

            let taxon = Taxon {
                id: node.taxid,
                name: String::new(),
                rank: node.rank.clone(),
                parent,
            };
            if taxa.insert(node.taxid, taxon).is_some() {
                return Err(LoadError::DuplicateTaxon(node.taxid));
            }
        }

        let root = root.ok_or(LoadError::MissingRoot)?;

        // Every parent reference must land on a known node.
        for taxon in taxa.values() {
            if let Some(parent) = taxon.parent {
                if !taxa.contains_key(&parent) {
                    return Err(LoadError::MissingParent {
                        child: taxon.id,
                        parent,
                    });
                }
            }
        }

        let depths = compute_depths(&taxa, root)?;

        let mut children: HashMap<TaxonId, Vec<TaxonId>> = HashMap::new();
        for taxon in taxa.values() {
            if let Some(parent) = taxon.parent {
                children.entry(parent).or_default().push(taxon.id);
            }
        }
        for ids in children.values_mut() {
            ids.sort_unstable();
        }

        let mut sci_names: HashMap<String, Vec<TaxonId>> = HashMap::new();
        let mut all_names: HashMap<String, Vec<TaxonId>> = HashMap::new();
        let mut orphan_names = 0usize;

        for record in &dump.names {
            let Some(taxon) = taxa.get_mut(&record.taxid) else {
                orphan_names += 1;
                continue;
            };

            let key = record.name.trim().to_lowercase();
            if record.class.is_scientific() {
                if taxon.name.is_empty() {
                    taxon.name = record.name.clone();
                }
                sci_names.entry(key.clone()).or_default().push(record.taxid);
                all_names.entry(key).or_default().push(record.taxid);
            } else if options.index_all_names {
                all_names.entry(key).or_default().push(record.taxid);
            }
        }

        if orphan_names > 0 {
            warn!(count = orphan_names, "skipped name records referencing unknown taxa");
        }

        let unnamed = taxa.values().filter(|t| t.name.is_empty()).count();
        if unnamed > 0 {
            warn!(count = unnamed, "taxa without a scientific name record");
        }

        for ids in sci_names.values_mut().chain(all_names.values_mut()) {
            ids.sort_unstable();
            ids.dedup();
        }

        let merged: HashMap<TaxonId, TaxonId> = dump
            .merged
            .iter()
            .map(|m| (m.old_taxid, m.new_taxid))
            .collect();
        let deleted: HashSet<TaxonId> = dump.deleted.iter().map(|d| d.taxid).collect();

        let rank_order = RankOrder::from_ranks(dump.nodes.iter().map(|n| n.rank.as_str()));

        debug!(
            taxa = taxa.len(),
            names = all_names.len(),
            merged = merged.len(),
            deleted = deleted.len(),
            "taxon store built"
        );

        Ok(Self {
            taxa,
            children,
            sci_names,
            all_names,
            merged,
            deleted,
            depths,
            rank_order,
            root,
        })
    }

    /// Number of taxa in the store
    pub fn len(&self) -> usize {
        self.taxa.len()
    }

    /// Whether the store holds no taxa
    pub fn is_empty(&self) -> bool {
        self.taxa.is_empty()
    }

    /// The root taxon id
    pub fn root(&self) -> TaxonId {
        self.root
    }

    /// The rank ordering derived at load time
    pub fn rank_order(&self) -> &RankOrder {
        &self.rank_order
    }

    /// Get a taxon without error reporting
    pub fn get(&self, id: TaxonId) -> Option<&Taxon> {
        self.taxa.get(&id)
    }

    /// Whether the store holds a live taxon with this id
    pub fn contains(&self, id: TaxonId) -> bool {
        self.taxa.contains_key(&id)
    }

    /// Look up a taxon by id
    pub fn lookup(&self, id: TaxonId) -> Result<&Taxon, QueryError> {
        self.taxa.get(&id).ok_or(QueryError::NotFound(id))
    }

    /// Look up taxa by name (case-insensitive exact match)
    ///
    /// With `sci_name_only`, synonyms and other non-scientific name classes
    /// are ignored. Returns every match — an ambiguous name is not an
    /// error, and an unknown name yields an empty result.
    pub fn lookup_by_name(&self, name: &str, sci_name_only: bool) -> Vec<&Taxon> {
        let key = name.trim().to_lowercase();
        let index = if sci_name_only {
            &self.sci_names
        } else {
            &self.all_names
        };

        index
            .get(&key)
            .map(|ids| ids.iter().filter_map(|id| self.taxa.get(id)).collect())
            .unwrap_or_default()
    }

    /// Resolve a possibly-stale identifier
    ///
    /// Consults the merge records (transitively) and the deleted set.
    pub fn resolve_stale(&self, id: TaxonId) -> Resolution {
        if self.taxa.contains_key(&id) {
            return Resolution::Current(id);
        }

        let mut target = id;
        let mut hops = 0usize;
        while let Some(&next) = self.merged.get(&target) {
            if self.taxa.contains_key(&next) {
                return Resolution::Merged { old: id, new: next };
            }
            target = next;
            hops += 1;
            if hops > self.merged.len() {
                warn!(taxid = %id, "cyclic merge redirect chain");
                return Resolution::Unknown(id);
            }
        }

        if self.deleted.contains(&target) {
            return Resolution::Deleted(id);
        }

        if target != id {
            warn!(taxid = %id, target = %target, "merge redirect does not reach a live taxon");
        }
        Resolution::Unknown(id)
    }

    /// Resolve a possibly-stale identifier to a live id, or fail
    ///
    /// Deleted ids are `QueryError::Deleted`; ids unknown to the store are
    /// `QueryError::NotFound`.
    pub fn resolve_target(&self, id: TaxonId) -> Result<TaxonId, QueryError> {
        match self.resolve_stale(id) {
            Resolution::Current(id) => Ok(id),
            Resolution::Merged { old, new } => {
                debug!(old = %old, new = %new, "following merge redirect");
                Ok(new)
            }
            Resolution::Deleted(id) => Err(QueryError::Deleted(id)),
            Resolution::Unknown(id) => Err(QueryError::NotFound(id)),
        }
    }

    /// Depth of a taxon below the root (root has depth 0)
    pub fn depth(&self, id: TaxonId) -> Result<u32, QueryError> {
        self.depths.get(&id).copied().ok_or(QueryError::NotFound(id))
    }

    /// The parent taxon, if any
    pub fn parent(&self, id: TaxonId) -> Result<Option<&Taxon>, QueryError> {
        let taxon = self.lookup(id)?;
        Ok(match taxon.parent {
            Some(parent) => self.taxa.get(&parent),
            None => None,
        })
    }

    /// Direct child ids of a taxon, sorted ascending
    pub fn children_ids(&self, id: TaxonId) -> &[TaxonId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over all taxa (arbitrary order)
    pub fn iter(&self) -> impl Iterator<Item = &Taxon> {
        self.taxa.values()
    }
}

/// Compute the depth of every node, detecting parent cycles
///
/// Walks each node's parent chain up to the first node with a known depth,
/// then unwinds. A chain that revisits itself is a cycle.
fn compute_depths(
    taxa: &HashMap<TaxonId, Taxon>,
    root: TaxonId,
) -> Result<HashMap<TaxonId, u32>, LoadError> {
    let mut depths: HashMap<TaxonId, u32> = HashMap::with_capacity(taxa.len());
    depths.insert(root, 0);

    let mut chain: Vec<TaxonId> = Vec::new();
    let mut on_chain: HashSet<TaxonId> = HashSet::new();

    for &start in taxa.keys() {
        if depths.contains_key(&start) {
            continue;
        }

        chain.clear();
        on_chain.clear();

        let mut cur = start;
        while !depths.contains_key(&cur) {
            if !on_chain.insert(cur) {
                return Err(LoadError::CycleDetected(cur));
            }
            chain.push(cur);

            // Parents are validated before depth computation; only the
            // seeded root has no parent.
            let Some(parent) = taxa.get(&cur).and_then(|t| t.parent) else {
                return Err(LoadError::MissingRoot);
            };
            cur = parent;
        }

        let base = depths[&cur];
        for (offset, &node) in chain.iter().rev().enumerate() {
            depths.insert(node, base + offset as u32 + 1);
        }
    }

    Ok(depths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxq_dump::{DeletedRecord, MergedRecord, NameRecord, NodeRecord};
    use taxq_common::types::NameClass;

    fn node(taxid: u32, parent: u32, rank: &str) -> NodeRecord {
        NodeRecord::new(TaxonId(taxid), TaxonId(parent), rank)
    }

    fn sci(taxid: u32, name: &str) -> NameRecord {
        NameRecord::new(TaxonId(taxid), name, "", NameClass::ScientificName)
    }

    fn small_dump() -> DumpSet {
        DumpSet::new(
            vec![
                node(1, 1, "no rank"),
                node(2, 1, "domain"),
                node(543, 2, "family"),
                node(1382510, 543, "no rank"),
            ],
            vec![
                sci(1, "root"),
                sci(2, "Bacteria"),
                NameRecord::new(TaxonId(2), "eubacteria", "", NameClass::Synonym),
                sci(543, "Enterobacteriaceae"),
                sci(1382510, "Salmonella bongori"),
            ],
            vec![MergedRecord::new(TaxonId(666), TaxonId(543))],
            vec![DeletedRecord::new(TaxonId(999))],
        )
    }

    #[test]
    fn test_from_dump_builds_indexes() {
        let store = TaxonStore::from_dump(small_dump(), LoadOptions::default()).unwrap();

        assert_eq!(store.len(), 4);
        assert_eq!(store.root(), TaxonId(1));
        assert_eq!(store.lookup(TaxonId(543)).unwrap().name, "Enterobacteriaceae");
        assert_eq!(store.children_ids(TaxonId(2)), &[TaxonId(543)]);
        assert_eq!(store.depth(TaxonId(1382510)).unwrap(), 3);
    }

    #[test]
    fn test_lookup_unknown_id() {
        let store = TaxonStore::from_dump(small_dump(), LoadOptions::default()).unwrap();
        assert_eq!(store.lookup(TaxonId(4242)), Err(QueryError::NotFound(TaxonId(4242))));
    }

    #[test]
    fn test_lookup_by_name_sci_only() {
        let store = TaxonStore::from_dump(small_dump(), LoadOptions::default()).unwrap();

        let hits = store.lookup_by_name("Bacteria", true);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, TaxonId(2));

        // synonym resolves only through the all-names index
        assert!(store.lookup_by_name("eubacteria", true).is_empty());
        assert_eq!(store.lookup_by_name("eubacteria", false)[0].id, TaxonId(2));
    }

    #[test]
    fn test_lookup_by_name_case_insensitive() {
        let store = TaxonStore::from_dump(small_dump(), LoadOptions::default()).unwrap();
        assert_eq!(store.lookup_by_name("BACTERIA", true).len(), 1);
        assert_eq!(store.lookup_by_name(" bacteria ", true).len(), 1);
    }

    #[test]
    fn test_lookup_by_name_unknown_is_empty() {
        let store = TaxonStore::from_dump(small_dump(), LoadOptions::default()).unwrap();
        assert!(store.lookup_by_name("Homo sapiens", false).is_empty());
    }

    #[test]
    fn test_options_disable_synonym_index() {
        let options = LoadOptions::new().with_all_names(false);
        let store = TaxonStore::from_dump(small_dump(), options).unwrap();
        assert!(store.lookup_by_name("eubacteria", false).is_empty());
    }

    #[test]
    fn test_resolve_stale() {
        let store = TaxonStore::from_dump(small_dump(), LoadOptions::default()).unwrap();

        assert_eq!(store.resolve_stale(TaxonId(543)), Resolution::Current(TaxonId(543)));
        assert_eq!(
            store.resolve_stale(TaxonId(666)),
            Resolution::Merged {
                old: TaxonId(666),
                new: TaxonId(543)
            }
        );
        assert_eq!(store.resolve_stale(TaxonId(999)), Resolution::Deleted(TaxonId(999)));
        assert_eq!(store.resolve_stale(TaxonId(4242)), Resolution::Unknown(TaxonId(4242)));
    }

    #[test]
    fn test_resolve_target() {
        let store = TaxonStore::from_dump(small_dump(), LoadOptions::default()).unwrap();

        assert_eq!(store.resolve_target(TaxonId(666)), Ok(TaxonId(543)));
        assert_eq!(
            store.resolve_target(TaxonId(999)),
            Err(QueryError::Deleted(TaxonId(999)))
        );
        assert_eq!(
            store.resolve_target(TaxonId(4242)),
            Err(QueryError::NotFound(TaxonId(4242)))
        );
    }

    #[test]
    fn test_duplicate_taxon_is_fatal() {
        let dump = DumpSet::new(
            vec![node(1, 1, "no rank"), node(2, 1, "domain"), node(2, 1, "domain")],
            vec![sci(1, "root")],
            vec![],
            vec![],
        );
        let err = TaxonStore::from_dump(dump, LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateTaxon(TaxonId(2))));
    }

    #[test]
    fn test_missing_parent_is_fatal() {
        let dump = DumpSet::new(
            vec![node(1, 1, "no rank"), node(5, 4, "genus")],
            vec![sci(1, "root")],
            vec![],
            vec![],
        );
        let err = TaxonStore::from_dump(dump, LoadOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingParent {
                child: TaxonId(5),
                parent: TaxonId(4)
            }
        ));
    }

    #[test]
    fn test_cycle_is_fatal() {
        // 10 -> 11 -> 12 -> 10, disconnected from the root
        let dump = DumpSet::new(
            vec![
                node(1, 1, "no rank"),
                node(10, 12, "no rank"),
                node(11, 10, "no rank"),
                node(12, 11, "no rank"),
            ],
            vec![sci(1, "root")],
            vec![],
            vec![],
        );
        let err = TaxonStore::from_dump(dump, LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::CycleDetected(_)));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dump = DumpSet::new(
            vec![node(2, 3, "domain"), node(3, 2, "domain")],
            vec![],
            vec![],
            vec![],
        );
        let err = TaxonStore::from_dump(dump, LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingRoot));
    }

    #[test]
    fn test_multiple_roots_is_fatal() {
        let dump = DumpSet::new(
            vec![node(1, 1, "no rank"), node(7, 7, "no rank")],
            vec![],
            vec![],
            vec![],
        );
        let err = TaxonStore::from_dump(dump, LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::MultipleRoots(_, _)));
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TaxonStore>();
    }
}
