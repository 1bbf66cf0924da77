//! Rank ordering and rank-predicate filtering
//!
//! Ranks form a total preorder over a canonical backbone (superkingdom
//! down to strain). Ranks outside the backbone — "no rank", "clade", and
//! anything else the dump invents — are *unordered*: they compare to
//! nothing, and range filters pass them through unless explicitly
//! discarded.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

use crate::error::QueryError;
use crate::store::TaxonStore;
use taxq_common::types::TaxonId;

/// The rank name given to unranked taxa
pub const NO_RANK: &str = "no rank";

/// Canonical rank backbone, highest first. Names within one entry are
/// aliases sharing a position ("domain" superseded "superkingdom" in
/// newer dumps).
const CANONICAL_RANKS: &[&[&str]] = &[
    &["superkingdom", "domain", "realm"],
    &["kingdom"],
    &["subkingdom"],
    &["superphylum"],
    &["phylum"],
    &["subphylum"],
    &["superclass"],
    &["class"],
    &["subclass"],
    &["infraclass"],
    &["cohort"],
    &["subcohort"],
    &["superorder"],
    &["order"],
    &["suborder"],
    &["infraorder"],
    &["parvorder"],
    &["superfamily"],
    &["family"],
    &["subfamily"],
    &["tribe"],
    &["subtribe"],
    &["genus"],
    &["subgenus"],
    &["section"],
    &["subsection"],
    &["series"],
    &["species group"],
    &["species subgroup"],
    &["species"],
    &["subspecies", "forma specialis"],
    &["varietas"],
    &["subvariety"],
    &["forma"],
    &["strain", "isolate"],
];

/// Normalize a rank name for comparison
pub fn normalize_rank(rank: &str) -> String {
    rank.trim().to_lowercase()
}

/// Total preorder over rank names, fixed at load time
#[derive(Debug, Clone)]
pub struct RankOrder {
    positions: HashMap<&'static str, u32>,
}

impl RankOrder {
    /// Derive the ordering at load time from the dump's rank list
    ///
    /// The canonical backbone supplies the positions; observed ranks
    /// outside the backbone stay unordered and are reported at debug
    /// level.
    pub fn from_ranks<'a>(observed: impl IntoIterator<Item = &'a str>) -> Self {
        let order = Self::canonical();

        let mut unordered: Vec<String> = observed
            .into_iter()
            .map(normalize_rank)
            .filter(|rank| rank != NO_RANK && !order.positions.contains_key(rank.as_str()))
            .collect();
        unordered.sort_unstable();
        unordered.dedup();
        if !unordered.is_empty() {
            debug!(ranks = ?unordered, "dump contains ranks outside the canonical order");
        }

        order
    }

    /// The canonical backbone ordering alone
    pub fn canonical() -> Self {
        let mut positions = HashMap::new();
        for (position, aliases) in CANONICAL_RANKS.iter().enumerate() {
            for alias in *aliases {
                positions.insert(*alias, position as u32);
            }
        }
        Self { positions }
    }

    /// Position of a rank in the order (0 is highest), None if unordered
    pub fn position(&self, rank: &str) -> Option<u32> {
        self.positions.get(normalize_rank(rank).as_str()).copied()
    }

    /// Whether a rank participates in the order
    pub fn is_ranked(&self, rank: &str) -> bool {
        self.position(rank).is_some()
    }

    /// Compare two ranks; None when either is unordered
    ///
    /// `Ordering::Less` means `a` is higher (closer to the root) than `b`.
    pub fn compare(&self, a: &str, b: &str) -> Option<Ordering> {
        Some(self.position(a)?.cmp(&self.position(b)?))
    }

    /// Whether rank `a` is strictly higher than rank `b`
    pub fn is_higher(&self, a: &str, b: &str) -> bool {
        matches!(self.compare(a, b), Some(Ordering::Less))
    }

    /// Whether rank `a` is strictly lower than rank `b`
    pub fn is_lower(&self, a: &str, b: &str) -> bool {
        matches!(self.compare(a, b), Some(Ordering::Greater))
    }
}

/// Rank predicate for [`TaxonStore::filter_by_rank`]
///
/// # Precedence policy
///
/// `equal_to` takes precedence: when it is set, `higher_than` and
/// `lower_than` are ignored rather than combined. Supply either the
/// equality rank or the range bounds, not both.
///
/// Unordered ranks ("no rank", "clade", anything outside the canonical
/// order) satisfy range bounds unless `discard_no_rank` is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankPredicate {
    /// Keep taxa whose rank equals this rank exactly
    pub equal_to: Option<String>,
    /// Keep taxa whose rank is strictly higher than this rank
    pub higher_than: Option<String>,
    /// Keep taxa whose rank is strictly lower than this rank
    pub lower_than: Option<String>,
    /// Drop taxa whose rank is unordered
    pub discard_no_rank: bool,
}

impl RankPredicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equal_to(mut self, rank: impl Into<String>) -> Self {
        self.equal_to = Some(rank.into());
        self
    }

    pub fn higher_than(mut self, rank: impl Into<String>) -> Self {
        self.higher_than = Some(rank.into());
        self
    }

    pub fn lower_than(mut self, rank: impl Into<String>) -> Self {
        self.lower_than = Some(rank.into());
        self
    }

    pub fn discard_no_rank(mut self, discard: bool) -> Self {
        self.discard_no_rank = discard;
        self
    }
}

impl TaxonStore {
    /// Filter identifiers by rank predicate
    ///
    /// Stale identifiers are resolved first; deleted and unknown
    /// identifiers are dropped from the output (logged, not errors).
    /// Output ids are post-resolution and preserve input order, so the
    /// operation is idempotent: re-filtering a result with the same
    /// predicate returns the same sequence.
    ///
    /// See [`RankPredicate`] for the `equal_to` precedence policy.
    pub fn filter_by_rank(&self, ids: &[TaxonId], predicate: &RankPredicate) -> Vec<TaxonId> {
        if predicate.equal_to.is_some()
            && (predicate.higher_than.is_some() || predicate.lower_than.is_some())
        {
            debug!("equal_to is set; ignoring higher_than/lower_than bounds");
        }

        let mut out = Vec::with_capacity(ids.len());
        for &id in ids {
            let target = match self.resolve_target(id) {
                Ok(target) => target,
                Err(err) => {
                    tracing::warn!(taxid = %id, error = %err, "dropping taxon from rank filter");
                    continue;
                }
            };
            let Ok(taxon) = self.lookup(target) else {
                continue;
            };
            if self.rank_matches(&taxon.rank, predicate) {
                out.push(target);
            }
        }
        out
    }

    fn rank_matches(&self, rank: &str, predicate: &RankPredicate) -> bool {
        if let Some(equal) = &predicate.equal_to {
            return normalize_rank(rank) == normalize_rank(equal);
        }

        let order = self.rank_order();
        if !order.is_ranked(rank) {
            return !predicate.discard_no_rank;
        }

        if let Some(bound) = &predicate.higher_than {
            if !order.is_higher(rank, bound) {
                return false;
            }
        }
        if let Some(bound) = &predicate.lower_than {
            if !order.is_lower(rank, bound) {
                return false;
            }
        }
        true
    }

    /// Classify an identifier's rank position against a threshold rank
    ///
    /// Convenience over [`RankOrder::compare`]; resolves stale ids first.
    pub fn compare_rank(&self, id: TaxonId, threshold: &str) -> Result<Option<Ordering>, QueryError> {
        let target = self.resolve_target(id)?;
        let taxon = self.lookup(target)?;
        Ok(self.rank_order().compare(&taxon.rank, threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_positions() {
        let order = RankOrder::canonical();
        assert!(order.position("superkingdom").is_some());
        assert_eq!(order.position("superkingdom"), order.position("domain"));
        assert!(order.position("family") < order.position("genus"));
        assert!(order.position("genus") < order.position("species"));
    }

    #[test]
    fn test_unordered_ranks() {
        let order = RankOrder::canonical();
        assert!(!order.is_ranked(NO_RANK));
        assert!(!order.is_ranked("clade"));
        assert!(order.compare("clade", "species").is_none());
        assert!(order.compare("species", NO_RANK).is_none());
    }

    #[test]
    fn test_compare_direction() {
        let order = RankOrder::canonical();
        assert_eq!(order.compare("family", "species"), Some(Ordering::Less));
        assert_eq!(order.compare("species", "family"), Some(Ordering::Greater));
        assert_eq!(order.compare("Family", "FAMILY"), Some(Ordering::Equal));
        assert!(order.is_higher("phylum", "class"));
        assert!(order.is_lower("subspecies", "species"));
        assert!(!order.is_higher("genus", "genus"));
    }

    #[test]
    fn test_from_ranks_keeps_backbone() {
        let order = RankOrder::from_ranks(["species", "wibble", "no rank"]);
        // unobserved backbone ranks still compare
        assert!(order.is_higher("family", "species"));
        assert!(!order.is_ranked("wibble"));
    }

    #[test]
    fn test_predicate_builder() {
        let predicate = RankPredicate::new()
            .higher_than("species")
            .lower_than("phylum")
            .discard_no_rank(true);
        assert_eq!(predicate.higher_than.as_deref(), Some("species"));
        assert_eq!(predicate.lower_than.as_deref(), Some("phylum"));
        assert!(predicate.discard_no_rank);
        assert!(predicate.equal_to.is_none());
    }
}
