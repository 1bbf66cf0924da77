//! LCA engine integration tests

mod common;

use common::{ids, sample_store};
use taxq_common::TaxonId;
use taxq_engine::QueryError;

#[test]
fn test_lca_of_siblings_is_parent() {
    let store = sample_store();
    assert_eq!(store.lca(&ids(&[9606, 1425170])), Ok(TaxonId(9605)));
}

#[test]
fn test_lca_of_cousins() {
    let store = sample_store();

    // Escherichia coli and Salmonella bongori share the family
    assert_eq!(store.lca(&ids(&[562, 54736])), Ok(TaxonId(543)));
}

#[test]
fn test_lca_across_domains_is_root() {
    let store = sample_store();
    assert_eq!(store.lca(&ids(&[562, 9606])), Ok(TaxonId(1)));
}

#[test]
fn test_lca_with_descendant_returns_ancestor() {
    let store = sample_store();

    // y descends from x => lca(x, y) == x
    assert_eq!(store.lca(&ids(&[543, 562])), Ok(TaxonId(543)));
    assert_eq!(store.lca(&ids(&[2, 1382510])), Ok(TaxonId(2)));
    assert_eq!(store.lca(&ids(&[1, 9606])), Ok(TaxonId(1)));
}

#[test]
fn test_lca_singleton_equals_stale_resolution() {
    let store = sample_store();

    assert_eq!(store.lca(&ids(&[562])), Ok(TaxonId(562)));
    // a merged singleton resolves to its redirect target
    assert_eq!(store.lca(&ids(&[666])), Ok(TaxonId(543)));
    assert_eq!(store.lca(&ids(&[666])), store.resolve_target(TaxonId(666)));
}

#[test]
fn test_lca_skips_unresolvable_members() {
    let store = sample_store();

    // deleted and unknown ids are excluded, the rest still resolve
    assert_eq!(store.lca(&ids(&[999, 562, 54736])), Ok(TaxonId(543)));
}

#[test]
fn test_lca_all_unresolvable_is_no_common_ancestor() {
    let store = sample_store();

    assert_eq!(store.lca(&ids(&[999, 31337])), Err(QueryError::NoCommonAncestor));
    assert_eq!(store.lca(&[]), Err(QueryError::NoCommonAncestor));
}

#[test]
fn test_lca_multi_preserves_set_order() {
    let store = sample_store();

    let sets = vec![
        ids(&[9606, 1425170]),
        ids(&[562, 54736]),
        ids(&[999]),
        ids(&[562, 9606]),
    ];
    let results = store.lca_multi(&sets);

    assert_eq!(results.len(), 4);
    assert_eq!(results[0], Ok(TaxonId(9605)));
    assert_eq!(results[1], Ok(TaxonId(543)));
    assert_eq!(results[2], Err(QueryError::NoCommonAncestor));
    assert_eq!(results[3], Ok(TaxonId(1)));
}

#[test]
fn test_lca_multi_matches_single_set_results() {
    let store = sample_store();

    let sets = vec![ids(&[561, 590]), ids(&[9606, 54736])];
    let multi = store.lca_multi(&sets);
    for (set, result) in sets.iter().zip(&multi) {
        assert_eq!(result, &store.lca(set));
    }
}
