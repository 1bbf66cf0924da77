//! Taxonomy dump file parser
//!
//! Parses the four taxdump flat files into typed records. Unlike lookup
//! failures, a malformed record is fatal: the dump is a fixed external
//! contract, and a file that violates it aborts the load instead of
//! producing a silently incomplete record set.

use tracing::debug;

use crate::config::{DELNODES_FILE, MERGED_FILE, NAMES_FILE, NODES_FILE};
use crate::error::{DumpError, Result};
use crate::models::{DeletedRecord, DumpSet, MergedRecord, NameRecord, NodeRecord};
use crate::reader::DumpFiles;
use taxq_common::types::{NameClass, TaxonId};

/// Parser for taxonomy dump files
pub struct DmpParser {
    /// Maximum number of node records to parse (None for unlimited)
    parse_limit: Option<usize>,
}

impl DmpParser {
    /// Create a new parser with no limit
    pub fn new() -> Self {
        Self { parse_limit: None }
    }

    /// Create a parser with a node record limit
    pub fn with_limit(limit: usize) -> Self {
        Self {
            parse_limit: Some(limit),
        }
    }

    /// Parse all dump files into a `DumpSet`
    pub fn parse(&self, files: &DumpFiles) -> Result<DumpSet> {
        debug!(file = NODES_FILE, "parsing node records");
        let nodes = self.parse_nodes(&files.nodes)?;
        debug!(count = nodes.len(), "parsed node records");

        debug!(file = NAMES_FILE, "parsing name records");
        let names = self.parse_names(&files.names)?;
        debug!(count = names.len(), "parsed name records");

        let merged = match &files.merged {
            Some(content) => {
                debug!(file = MERGED_FILE, "parsing merged records");
                self.parse_merged(content)?
            }
            None => Vec::new(),
        };

        let deleted = match &files.deleted {
            Some(content) => {
                debug!(file = DELNODES_FILE, "parsing deleted records");
                self.parse_delnodes(content)?
            }
            None => Vec::new(),
        };

        Ok(DumpSet::new(nodes, names, merged, deleted))
    }

    /// Parse `nodes.dmp` content
    ///
    /// # Format
    /// ```text
    /// tax_id | parent_tax_id | rank | ...
    /// 9606 | 9605 | species | ...
    /// ```
    ///
    /// Fields beyond the third are ignored.
    pub fn parse_nodes(&self, content: &str) -> Result<Vec<NodeRecord>> {
        let mut nodes = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            nodes.push(self.parse_nodes_line(line, idx + 1)?);

            if let Some(limit) = self.parse_limit {
                if nodes.len() >= limit {
                    debug!(limit = limit, "reached node parse limit");
                    break;
                }
            }
        }

        Ok(nodes)
    }

    /// Parse a single line from `nodes.dmp`
    pub fn parse_nodes_line(&self, line: &str, line_num: usize) -> Result<NodeRecord> {
        let fields = split_dmp_fields(line);

        if fields.len() < 3 {
            return Err(DumpError::malformed(
                NODES_FILE,
                line_num,
                format!("expected at least 3 fields, got {}", fields.len()),
            ));
        }

        let taxid = parse_taxid(fields[0], NODES_FILE, line_num)?;
        let parent = parse_taxid(fields[1], NODES_FILE, line_num)?;
        let rank = fields[2];

        if rank.is_empty() {
            return Err(DumpError::malformed(NODES_FILE, line_num, "empty rank field"));
        }

        Ok(NodeRecord::new(taxid, parent, rank))
    }

    /// Parse `names.dmp` content
    ///
    /// # Format
    /// ```text
    /// tax_id | name_txt | unique name | name class |
    /// 9606 | Homo sapiens |  | scientific name |
    /// ```
    pub fn parse_names(&self, content: &str) -> Result<Vec<NameRecord>> {
        let mut names = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            names.push(self.parse_names_line(line, idx + 1)?);
        }

        Ok(names)
    }

    /// Parse a single line from `names.dmp`
    pub fn parse_names_line(&self, line: &str, line_num: usize) -> Result<NameRecord> {
        let fields = split_dmp_fields(line);

        if fields.len() < 4 {
            return Err(DumpError::malformed(
                NAMES_FILE,
                line_num,
                format!("expected at least 4 fields, got {}", fields.len()),
            ));
        }

        let taxid = parse_taxid(fields[0], NAMES_FILE, line_num)?;
        let name = fields[1];

        if name.is_empty() {
            return Err(DumpError::malformed(NAMES_FILE, line_num, "empty name field"));
        }

        Ok(NameRecord::new(
            taxid,
            name,
            fields[2],
            NameClass::from_dmp(fields[3]),
        ))
    }

    /// Parse `merged.dmp` content
    ///
    /// # Format
    /// ```text
    /// old_tax_id | new_tax_id |
    /// 123 | 456 |
    /// ```
    pub fn parse_merged(&self, content: &str) -> Result<Vec<MergedRecord>> {
        let mut merged = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            merged.push(self.parse_merged_line(line, idx + 1)?);
        }

        Ok(merged)
    }

    /// Parse a single line from `merged.dmp`
    pub fn parse_merged_line(&self, line: &str, line_num: usize) -> Result<MergedRecord> {
        let fields = split_dmp_fields(line);

        if fields.len() < 2 {
            return Err(DumpError::malformed(
                MERGED_FILE,
                line_num,
                format!("expected at least 2 fields, got {}", fields.len()),
            ));
        }

        let old_taxid = parse_taxid(fields[0], MERGED_FILE, line_num)?;
        let new_taxid = parse_taxid(fields[1], MERGED_FILE, line_num)?;

        Ok(MergedRecord::new(old_taxid, new_taxid))
    }

    /// Parse `delnodes.dmp` content
    ///
    /// # Format
    /// ```text
    /// tax_id |
    /// 789 |
    /// ```
    pub fn parse_delnodes(&self, content: &str) -> Result<Vec<DeletedRecord>> {
        let mut deleted = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            deleted.push(self.parse_delnodes_line(line, idx + 1)?);
        }

        Ok(deleted)
    }

    /// Parse a single line from `delnodes.dmp`
    pub fn parse_delnodes_line(&self, line: &str, line_num: usize) -> Result<DeletedRecord> {
        let fields = split_dmp_fields(line);

        if fields.is_empty() {
            return Err(DumpError::malformed(DELNODES_FILE, line_num, "empty record"));
        }

        let taxid = parse_taxid(fields[0], DELNODES_FILE, line_num)?;
        Ok(DeletedRecord::new(taxid))
    }
}

impl Default for DmpParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a dump line into trimmed fields
///
/// The standard separator is `\t|\t` with a trailing `\t|`; plain
/// pipe-delimited lines are accepted as well.
fn split_dmp_fields(line: &str) -> Vec<&str> {
    let fields: Vec<&str> = if line.contains("\t|") {
        line.split("\t|\t")
            .map(|f| f.trim().trim_end_matches('|').trim())
            .collect()
    } else {
        line.split('|').map(|f| f.trim()).collect()
    };

    // A trailing separator produces one empty trailing field; drop it.
    match fields.as_slice() {
        [rest @ .., last] if last.is_empty() && !rest.is_empty() => rest.to_vec(),
        _ => fields,
    }
}

fn parse_taxid(field: &str, file: &str, line_num: usize) -> Result<TaxonId> {
    field
        .parse::<TaxonId>()
        .map_err(|_| DumpError::malformed(file, line_num, format!("invalid taxid: {:?}", field)))
}
