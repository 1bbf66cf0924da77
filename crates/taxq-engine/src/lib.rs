//! Taxonomy query engine
//!
//! An in-process query engine over a static, versioned taxonomic hierarchy
//! loaded from a taxdump file set. The store is built once and is read-only
//! afterwards; every query operation takes `&self` and the store is
//! `Send + Sync`, so a loaded store can be shared behind an `Arc` and
//! queried from any number of threads without locking.
//!
//! # Components
//!
//! - [`store::TaxonStore`]: identifier- and name-indexed taxon records,
//!   merged/deleted resolution
//! - [`lineage`]: ancestor chains and formatted lineage projection
//! - [`subtree`]: lazy depth-first subtree enumeration and nested export
//! - [`rank`]: canonical rank ordering and rank-predicate filtering
//! - [`lca`]: lowest common ancestor over taxon sets
//! - [`loader`]: phased dump-to-store load pipeline
//!
//! # Example
//!
//! ```no_run
//! use taxq_dump::DumpConfig;
//! use taxq_engine::loader::Loader;
//! use taxq_common::TaxonId;
//!
//! # fn example() -> anyhow::Result<()> {
//! let (store, report) = Loader::new(DumpConfig::from_env()?).load()?;
//! println!("{}", report.summary());
//!
//! let lineage = store.lineage(TaxonId(562))?;
//! println!("{}", lineage.join_names(";"));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod lca;
pub mod lineage;
pub mod loader;
pub mod rank;
pub mod store;
pub mod subtree;

// Re-export commonly used types
pub use error::{LoadError, QueryError};
pub use lineage::{FormattedLineage, LineageFormat, LineageNode, LineagePath};
pub use loader::{LoadReport, Loader};
pub use rank::{RankOrder, RankPredicate, NO_RANK};
pub use store::{LoadOptions, Resolution, Taxon, TaxonStore};
pub use subtree::{SubtreeIter, SubtreeNode};
