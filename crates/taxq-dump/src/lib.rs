//! Taxonomy dump file set
//!
//! Locates, reads, and parses NCBI-style taxdump flat files into typed
//! records:
//!
//! - `nodes.dmp`: taxon id, parent id, rank
//! - `names.dmp`: taxon id, name, unique variant, name class
//! - `merged.dmp`: retired id -> replacement id
//! - `delnodes.dmp`: deleted ids
//!
//! # File Format
//! The `.dmp` files use a tab-delimited format with pipe separators
//! (`\t|\t`); lines end with `\t|` and a newline. A plain pipe-delimited
//! variant is also accepted.
//!
//! # Example
//! ```no_run
//! use taxq_dump::{DmpParser, DumpConfig, DumpReader};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = DumpConfig::from_env()?;
//! let files = DumpReader::new(config).read()?;
//! let dump = DmpParser::new().parse(&files)?;
//! println!("{}", dump.stats());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod reader;

// Re-export commonly used types
pub use config::DumpConfig;
pub use error::{DumpError, Result};
pub use models::{DeletedRecord, DumpSet, DumpStats, MergedRecord, NameRecord, NodeRecord};
pub use parser::DmpParser;
pub use reader::{DumpFiles, DumpReader};
