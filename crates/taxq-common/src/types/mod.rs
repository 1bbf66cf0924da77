//! Common types used across TAXQ

use serde::{Deserialize, Serialize};
use std::fmt;

/// NCBI-style taxonomy identifier - newtype pattern for type safety
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaxonId(pub u32);

impl TaxonId {
    /// The root of the taxonomy (taxid 1)
    pub const ROOT: Self = Self(1);

    /// Create a new TaxonId
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the inner value
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Check if this is the root taxon
    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT.0
    }
}

impl fmt::Display for TaxonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TaxonId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<TaxonId> for u32 {
    fn from(taxon: TaxonId) -> Self {
        taxon.0
    }
}

impl std::str::FromStr for TaxonId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(Self)
    }
}

/// Classification of a taxon name record (`names.dmp` name class column)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameClass {
    /// The unique scientific name of the taxon
    ScientificName,
    /// A synonymous name
    Synonym,
    /// An equivalent name
    EquivalentName,
    /// A vernacular name
    CommonName,
    /// GenBank's preferred vernacular name
    GenbankCommonName,
    /// Name with author attribution
    Authority,
    /// Acronym form
    Acronym,
    /// Any other name class as it appears in the dump
    Other(String),
}

impl NameClass {
    /// Parse a name class from its dump-file representation
    pub fn from_dmp(value: &str) -> Self {
        match value.trim() {
            "scientific name" => NameClass::ScientificName,
            "synonym" => NameClass::Synonym,
            "equivalent name" => NameClass::EquivalentName,
            "common name" => NameClass::CommonName,
            "genbank common name" => NameClass::GenbankCommonName,
            "authority" => NameClass::Authority,
            "acronym" => NameClass::Acronym,
            other => NameClass::Other(other.to_string()),
        }
    }

    /// Whether this record carries the taxon's scientific name
    pub fn is_scientific(&self) -> bool {
        matches!(self, NameClass::ScientificName)
    }
}

impl fmt::Display for NameClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameClass::ScientificName => write!(f, "scientific name"),
            NameClass::Synonym => write!(f, "synonym"),
            NameClass::EquivalentName => write!(f, "equivalent name"),
            NameClass::CommonName => write!(f, "common name"),
            NameClass::GenbankCommonName => write!(f, "genbank common name"),
            NameClass::Authority => write!(f, "authority"),
            NameClass::Acronym => write!(f, "acronym"),
            NameClass::Other(other) => write!(f, "{}", other),
        }
    }
}

/// Checksum algorithm type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChecksumAlgorithm {
    Sha256,
    Sha512,
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecksumAlgorithm::Sha256 => write!(f, "sha256"),
            ChecksumAlgorithm::Sha512 => write!(f, "sha512"),
        }
    }
}
