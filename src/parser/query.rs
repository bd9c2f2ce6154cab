// taxgrade: Grade metagenomic classifier parameter sweeps against expected taxonomy.
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//
use std::io::Read;

use indexmap::IndexMap;
use log::debug;

use crate::ExpectedPatterns;
use crate::ReadRecord;
use crate::ReadTable;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone)]
pub struct UnexpectedReadId {
    pub read_id: String,
}

impl std::fmt::Display for UnexpectedReadId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Unexpected read ID: {}", self.read_id)
    }
}

impl std::error::Error for UnexpectedReadId {}

/// Resolve the expected label for every read in a query file.
///
/// Streams the FASTA/FASTQ records in `conn` (gzipped input works) and keeps
/// only the headers. Each header is tested for substring containment against
/// the negative patterns, then the positive patterns, in file order; the
/// first match decides the expected label. A header matching no pattern at
/// all is fatal: every read in the query set must be accounted for in the
/// expectation file.
pub fn resolve_read_ids<R: Read + Send>(
    conn: R,
    patterns: &ExpectedPatterns,
) -> Result<ReadTable, E> {
    let mut table = ReadTable::default();

    let mut reader = needletail::parse_fastx_reader(conn)?;
    while let Some(record) = reader.next() {
        let record = record?;
        let read_id = String::from_utf8_lossy(record.id()).to_string();
        let expected = match_expected(&read_id, patterns)
            .ok_or_else(|| UnexpectedReadId { read_id: read_id.clone() })?;
        table.reads.insert(read_id, ReadRecord { expected, observed: IndexMap::new() });
    }

    debug!("Resolved {} query reads", table.reads.len());
    Ok(table)
}

/// First-match-wins pattern lookup: Some(None) for a negative match,
/// Some(label) for a positive match, None when nothing matches.
fn match_expected(
    read_id: &str,
    patterns: &ExpectedPatterns,
) -> Option<Option<String>> {
    for pattern in &patterns.negative {
        if read_id.contains(pattern) {
            return Some(None)
        }
    }
    for (pattern, label) in &patterns.positive {
        if read_id.contains(pattern) {
            return Some(label.clone())
        }
    }
    None
}
