//! Shared test fixtures: a small synthetic taxonomy
//!
//! ```text
//! 1 root (no rank)
//! └── 2 Bacteria (domain)
//!     └── 543 Enterobacteriaceae (family)
//!         ├── 561 Escherichia (genus)
//!         │   └── 562 Escherichia coli (species)
//!         ├── 590 Salmonella (genus)
//!         │   └── 54736 Salmonella bongori (species)
//!         └── 1382510 Salmonella bongori serovar 66:z41:- (no rank)
//! └── 2759 Eukaryota (domain)
//!     └── 9604 Hominidae (family)
//!         └── 9605 Homo (genus)
//!             ├── 9606 Homo sapiens (species)
//!             └── 1425170 Homo heidelbergensis (species)
//!
//! merged:  666 -> 543
//! deleted: 999
//! ```

use taxq_common::types::{NameClass, TaxonId};
use taxq_dump::{DeletedRecord, DumpSet, MergedRecord, NameRecord, NodeRecord};
use taxq_engine::{LoadOptions, TaxonStore};

pub fn node(taxid: u32, parent: u32, rank: &str) -> NodeRecord {
    NodeRecord::new(TaxonId(taxid), TaxonId(parent), rank)
}

pub fn sci(taxid: u32, name: &str) -> NameRecord {
    NameRecord::new(TaxonId(taxid), name, "", NameClass::ScientificName)
}

pub fn synonym(taxid: u32, name: &str) -> NameRecord {
    NameRecord::new(TaxonId(taxid), name, "", NameClass::Synonym)
}

pub fn sample_dump() -> DumpSet {
    DumpSet::new(
        vec![
            node(1, 1, "no rank"),
            node(2, 1, "domain"),
            node(543, 2, "family"),
            node(561, 543, "genus"),
            node(562, 561, "species"),
            node(590, 543, "genus"),
            node(54736, 590, "species"),
            node(1382510, 543, "no rank"),
            node(2759, 1, "domain"),
            node(9604, 2759, "family"),
            node(9605, 9604, "genus"),
            node(9606, 9605, "species"),
            node(1425170, 9605, "species"),
        ],
        vec![
            sci(1, "root"),
            sci(2, "Bacteria"),
            synonym(2, "eubacteria"),
            sci(543, "Enterobacteriaceae"),
            sci(561, "Escherichia"),
            sci(562, "Escherichia coli"),
            synonym(562, "Bacillus coli"),
            sci(590, "Salmonella"),
            sci(54736, "Salmonella bongori"),
            sci(1382510, "Salmonella bongori serovar 66:z41:-"),
            sci(2759, "Eukaryota"),
            sci(9604, "Hominidae"),
            sci(9605, "Homo"),
            sci(9606, "Homo sapiens"),
            NameRecord::new(TaxonId(9606), "human", "", NameClass::GenbankCommonName),
            sci(1425170, "Homo heidelbergensis"),
        ],
        vec![MergedRecord::new(TaxonId(666), TaxonId(543))],
        vec![DeletedRecord::new(TaxonId(999))],
    )
}

pub fn sample_store() -> TaxonStore {
    TaxonStore::from_dump(sample_dump(), LoadOptions::default())
        .expect("sample dump is structurally valid")
}

pub fn ids(raw: &[u32]) -> Vec<TaxonId> {
    raw.iter().copied().map(TaxonId).collect()
}
