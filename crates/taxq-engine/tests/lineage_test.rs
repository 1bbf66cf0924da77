//! Lineage resolver integration tests

mod common;

use common::{ids, sample_store};
use taxq_common::TaxonId;
use taxq_engine::{LineageFormat, QueryError};

#[test]
fn test_full_lineage_path() {
    let store = sample_store();

    let path = store.lineage(TaxonId(1382510)).unwrap();
    assert_eq!(path.ids(), ids(&[1, 2, 543, 1382510]));
    assert_eq!(
        path.names(),
        vec![
            "root",
            "Bacteria",
            "Enterobacteriaceae",
            "Salmonella bongori serovar 66:z41:-"
        ]
    );
    assert!(!path.was_merged());
}

#[test]
fn test_root_lineage_is_single_element() {
    let store = sample_store();

    let path = store.lineage(TaxonId(1)).unwrap();
    assert_eq!(path.len(), 1);
    assert_eq!(path.ids(), ids(&[1]));
}

#[test]
fn test_merged_id_follows_redirect() {
    let store = sample_store();

    let path = store.lineage(TaxonId(666)).unwrap();
    assert!(path.was_merged());
    assert_eq!(path.queried, TaxonId(666));
    assert_eq!(path.resolved, TaxonId(543));
    assert_eq!(path.ids(), ids(&[1, 2, 543]));

    // identical to the target's own lineage apart from the queried id
    let direct = store.lineage(TaxonId(543)).unwrap();
    assert_eq!(path.nodes, direct.nodes);
}

#[test]
fn test_deleted_id_is_typed_error() {
    let store = sample_store();
    assert_eq!(
        store.lineage(TaxonId(999)),
        Err(QueryError::Deleted(TaxonId(999)))
    );
}

#[test]
fn test_unknown_id_is_not_found() {
    let store = sample_store();
    assert_eq!(
        store.lineage(TaxonId(31337)),
        Err(QueryError::NotFound(TaxonId(31337)))
    );
}

#[test]
fn test_join_names() {
    let store = sample_store();
    let path = store.lineage(TaxonId(562)).unwrap();
    assert_eq!(
        path.join_names(";"),
        "root;Bacteria;Enterobacteriaceae;Escherichia;Escherichia coli"
    );
}

#[test]
fn test_reformat_standard_ranks() {
    let store = sample_store();

    let path = store.lineage(TaxonId(54736)).unwrap();
    let format = LineageFormat::parse("{f};{g};{s}").unwrap();
    let formatted = path.reformat(&format);

    assert_eq!(formatted.names, "Enterobacteriaceae;Salmonella;Salmonella bongori");
    assert_eq!(formatted.taxids, "543;590;54736");
}

#[test]
fn test_reformat_absent_ranks_render_empty() {
    let store = sample_store();

    // 1382510 hangs directly below the family with no genus/species
    let path = store.lineage(TaxonId(1382510)).unwrap();
    let format = LineageFormat::parse("{f};{g};{s};{S}").unwrap();
    let formatted = path.reformat(&format);

    assert_eq!(formatted.names, "Enterobacteriaceae;;;");
    assert_eq!(formatted.taxids, "543;;;");
}

#[test]
fn test_reformat_domain_satisfies_superkingdom_placeholder() {
    let store = sample_store();

    let path = store.lineage(TaxonId(9606)).unwrap();
    let formatted = path.reformat(&LineageFormat::default());

    assert_eq!(formatted.names, "Eukaryota;;;;Hominidae;Homo;Homo sapiens");
    assert_eq!(formatted.taxids, "2759;;;;9604;9605;9606");
}

#[test]
fn test_lineage_many_preserves_input_order() {
    let store = sample_store();

    let input = ids(&[9606, 999, 666, 562]);
    let results = store.lineage_many(&input);

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].as_ref().unwrap().resolved, TaxonId(9606));
    assert_eq!(results[1], Err(QueryError::Deleted(TaxonId(999))));
    assert_eq!(results[2].as_ref().unwrap().resolved, TaxonId(543));
    assert_eq!(results[3].as_ref().unwrap().resolved, TaxonId(562));
}

#[test]
fn test_lineage_is_deterministic() {
    let store = sample_store();
    let first = store.lineage(TaxonId(562)).unwrap();
    let second = store.lineage(TaxonId(562)).unwrap();
    assert_eq!(first, second);
}
