//! Lineage resolution and formatted projection
//!
//! A lineage is the ancestor chain of a taxon, ordered root → taxon. Stale
//! identifiers are resolved before walking: merged ids follow their
//! redirect (the original id stays recorded on the path), deleted and
//! unknown ids are typed errors.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::QueryError;
use crate::rank::normalize_rank;
use crate::store::TaxonStore;
use taxq_common::types::TaxonId;

/// One step of a lineage path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageNode {
    /// Taxonomy ID
    pub id: TaxonId,
    /// Taxonomic rank
    pub rank: String,
    /// Scientific name
    pub name: String,
}

/// An ancestor chain from the root down to a taxon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineagePath {
    /// The identifier as queried
    pub queried: TaxonId,
    /// The identifier after stale resolution (differs when merged)
    pub resolved: TaxonId,
    /// Path nodes, root first, the queried taxon last
    pub nodes: Vec<LineageNode>,
}

impl LineagePath {
    /// Whether the queried identifier was redirected by a merge record
    pub fn was_merged(&self) -> bool {
        self.queried != self.resolved
    }

    /// The taxon the path leads to
    pub fn target(&self) -> Option<&LineageNode> {
        self.nodes.last()
    }

    /// Number of nodes on the path
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Identifiers along the path, root first
    pub fn ids(&self) -> Vec<TaxonId> {
        self.nodes.iter().map(|n| n.id).collect()
    }

    /// Names along the path, root first
    pub fn names(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.name.as_str()).collect()
    }

    /// Join the path names with a separator
    pub fn join_names(&self, separator: &str) -> String {
        self.names().join(separator)
    }

    /// Project the path onto a format template
    ///
    /// Ranks absent from the path render as empty fields in both the name
    /// and the taxid projection.
    pub fn reformat(&self, format: &LineageFormat) -> FormattedLineage {
        let mut names = String::new();
        let mut taxids = String::new();

        for token in &format.tokens {
            match token {
                FormatToken::Literal(text) => {
                    names.push_str(text);
                    taxids.push_str(text);
                }
                FormatToken::Rank(code) => {
                    if let Some(node) = self.nodes.iter().find(|n| code.matches(&n.rank)) {
                        names.push_str(&node.name);
                        taxids.push_str(&node.id.to_string());
                    }
                }
            }
        }

        FormattedLineage { names, taxids }
    }
}

/// Canonical ranks addressable from a format template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankCode {
    Superkingdom,
    Kingdom,
    Phylum,
    Class,
    Order,
    Family,
    Genus,
    Species,
    Subspecies,
}

impl RankCode {
    /// Placeholder character of this rank code
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'k' => Some(RankCode::Superkingdom),
            'K' => Some(RankCode::Kingdom),
            'p' => Some(RankCode::Phylum),
            'c' => Some(RankCode::Class),
            'o' => Some(RankCode::Order),
            'f' => Some(RankCode::Family),
            'g' => Some(RankCode::Genus),
            's' => Some(RankCode::Species),
            'S' => Some(RankCode::Subspecies),
            _ => None,
        }
    }

    /// Canonical rank name selected by this code
    pub fn rank_name(self) -> &'static str {
        match self {
            RankCode::Superkingdom => "superkingdom",
            RankCode::Kingdom => "kingdom",
            RankCode::Phylum => "phylum",
            RankCode::Class => "class",
            RankCode::Order => "order",
            RankCode::Family => "family",
            RankCode::Genus => "genus",
            RankCode::Species => "species",
            RankCode::Subspecies => "subspecies",
        }
    }

    /// Whether a rank string is selected by this code
    pub fn matches(self, rank: &str) -> bool {
        let rank = normalize_rank(rank);
        match self {
            // "domain"/"realm" superseded "superkingdom" in newer dumps
            RankCode::Superkingdom => {
                rank == "superkingdom" || rank == "domain" || rank == "realm"
            }
            other => rank == other.rank_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormatToken {
    Literal(String),
    Rank(RankCode),
}

/// A parsed lineage format template
///
/// Templates mix literal text with `{x}` rank placeholders: `{k}`
/// superkingdom/domain, `{K}` kingdom, `{p}` phylum, `{c}` class, `{o}`
/// order, `{f}` family, `{g}` genus, `{s}` species, `{S}` subspecies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageFormat {
    tokens: Vec<FormatToken>,
}

impl LineageFormat {
    /// The standard seven-rank template
    pub const DEFAULT_TEMPLATE: &'static str = "{k};{p};{c};{o};{f};{g};{s}";

    /// Parse a format template
    pub fn parse(template: &str) -> Result<Self, QueryError> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars();

        while let Some(c) = chars.next() {
            if c != '{' {
                literal.push(c);
                continue;
            }

            let code = chars.next().ok_or_else(|| {
                QueryError::InvalidFormat("unterminated placeholder".to_string())
            })?;
            if chars.next() != Some('}') {
                return Err(QueryError::InvalidFormat(format!(
                    "expected '}}' after '{{{}'",
                    code
                )));
            }
            let rank = RankCode::from_char(code).ok_or_else(|| {
                QueryError::InvalidFormat(format!("unknown placeholder '{{{}}}'", code))
            })?;

            if !literal.is_empty() {
                tokens.push(FormatToken::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(FormatToken::Rank(rank));
        }

        if !literal.is_empty() {
            tokens.push(FormatToken::Literal(literal));
        }

        Ok(Self { tokens })
    }
}

impl Default for LineageFormat {
    fn default() -> Self {
        Self::parse(Self::DEFAULT_TEMPLATE).unwrap_or(Self { tokens: Vec::new() })
    }
}

/// A lineage projected onto a format template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedLineage {
    /// Name projection (e.g., "Enterobacteriaceae;Salmonella;Salmonella bongori")
    pub names: String,
    /// Parallel taxid projection (e.g., "543;590;54736")
    pub taxids: String,
}

impl TaxonStore {
    /// Resolve the full lineage of an identifier
    ///
    /// Deterministic for a fixed store. The path's last element is the
    /// queried taxon (after merge resolution); the root's own lineage is a
    /// single-element path.
    pub fn lineage(&self, id: TaxonId) -> Result<LineagePath, QueryError> {
        let resolved = self.resolve_target(id)?;

        let mut nodes = Vec::new();
        let mut cursor = Some(resolved);
        while let Some(current) = cursor {
            let taxon = self.lookup(current)?;
            nodes.push(LineageNode {
                id: taxon.id,
                rank: taxon.rank.clone(),
                name: taxon.name.clone(),
            });
            cursor = taxon.parent;
        }
        nodes.reverse();

        debug!(taxid = %id, depth = nodes.len(), "resolved lineage");
        Ok(LineagePath {
            queried: id,
            resolved,
            nodes,
        })
    }

    /// Resolve lineages for many identifiers in parallel
    ///
    /// One result per input identifier, in input order.
    pub fn lineage_many(&self, ids: &[TaxonId]) -> Vec<Result<LineagePath, QueryError>> {
        ids.par_iter().map(|&id| self.lineage(id)).collect()
    }
}
