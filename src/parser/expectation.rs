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
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;

use log::debug;

use crate::AbundanceTable;
use crate::ExpectedPatterns;

use crate::parser::MalformedLine;
use crate::parser::NEGATIVE_SENTINEL;
use crate::parser::POSITIVE_SENTINEL;
use crate::parser::RANKS_SENTINEL;
use crate::parser::rank_index;

type E = Box<dyn std::error::Error>;

/// Parse an expectation file in per-read (rk) mode.
///
/// Reads the `@@ranks` declaration to resolve `rank` to a lineage index, then
/// collects the `@@negative` section's bare patterns and the `@@positive`
/// section's `<pattern><TAB><lineage>` lines, keeping only the label at the
/// analysed rank. A label of `0` is stored as missing. Section sentinels
/// toggle the mode for all following lines; file order is preserved.
pub fn read_expected_reads<R: Read>(
    conn: &mut R,
    rank: &str,
) -> Result<ExpectedPatterns, E> {
    let reader = BufReader::new(conn);

    let mut idx: Option<usize> = None;
    let mut is_negative = false;
    let mut patterns = ExpectedPatterns::default();

    for line in reader.lines() {
        let line = line?;
        if line.starts_with(RANKS_SENTINEL) {
            idx = Some(rank_index(&line, rank)?);
            continue;
        } else if line.starts_with(NEGATIVE_SENTINEL) {
            is_negative = true;
            continue;
        } else if line.starts_with(POSITIVE_SENTINEL) {
            is_negative = false;
            continue;
        }

        if is_negative {
            patterns.negative.push(line);
        } else {
            let idx = idx.ok_or_else(|| MalformedLine { line: line.clone() })?;
            let (pattern, lineage) = line.split_once('\t')
                .ok_or_else(|| MalformedLine { line: line.clone() })?;
            let label = lineage.split(';').nth(idx)
                .ok_or_else(|| MalformedLine { line: line.clone() })?;
            let label = if label == "0" { None } else { Some(label.to_string()) };
            patterns.positive.push((pattern.to_string(), label));
        }
    }

    debug!("Read {} negative and {} positive patterns", patterns.negative.len(), patterns.positive.len());
    Ok(patterns)
}

/// Parse an expectation file in abundance (bc) mode.
///
/// The `@@negative` section's lines are bare counts of reads expected to stay
/// unclassified; they accumulate into the UNMATCHED bucket and the total. The
/// `@@positive` section's `<count><TAB><lineage>` lines accumulate into the
/// label at the analysed rank and the total.
pub fn read_expected_abundances<R: Read>(
    conn: &mut R,
    rank: &str,
) -> Result<AbundanceTable, E> {
    let reader = BufReader::new(conn);

    let mut idx: Option<usize> = None;
    let mut is_negative = false;
    let mut abunds = AbundanceTable::default();

    for line in reader.lines() {
        let line = line?;
        if line.starts_with(RANKS_SENTINEL) {
            idx = Some(rank_index(&line, rank)?);
            continue;
        } else if line.starts_with(NEGATIVE_SENTINEL) {
            is_negative = true;
            continue;
        } else if line.starts_with(POSITIVE_SENTINEL) {
            is_negative = false;
            continue;
        }

        if is_negative {
            let count: i64 = line.trim().parse()?;
            abunds.add_unmatched(count);
        } else {
            let idx = idx.ok_or_else(|| MalformedLine { line: line.clone() })?;
            let (count, lineage) = line.split_once('\t')
                .ok_or_else(|| MalformedLine { line: line.clone() })?;
            let count: i64 = count.trim().parse()?;
            let label = lineage.split(';').nth(idx)
                .ok_or_else(|| MalformedLine { line: line.clone() })?;
            abunds.add_expected(label, count);
        }
    }

    debug!("Expecting {} reads over {} taxa", abunds.total, abunds.taxa.len());
    Ok(abunds)
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn read_expected_reads_sections() {
        use super::read_expected_reads;
        use std::io::Cursor;

        let mut data: Vec<u8> = b"@@ranks\td;p;c\n".to_vec();
        data.append(&mut b"@@negative\n".to_vec());
        data.append(&mut b"shuffled\n".to_vec());
        data.append(&mut b"random\n".to_vec());
        data.append(&mut b"@@positive\n".to_vec());
        data.append(&mut b"id1\td1;p1;c1\n".to_vec());
        data.append(&mut b"id2\td2;p2;c2\n".to_vec());

        let got = read_expected_reads(&mut Cursor::new(data), "p").unwrap();

        assert_eq!(got.negative, vec!["shuffled".to_string(), "random".to_string()]);
        assert_eq!(got.positive, vec![
            ("id1".to_string(), Some("p1".to_string())),
            ("id2".to_string(), Some("p2".to_string())),
        ]);
    }

    #[test]
    fn read_expected_reads_zero_label_is_missing() {
        use super::read_expected_reads;
        use std::io::Cursor;

        let data: Vec<u8> = b"@@ranks\td;p\n@@positive\nid1\td1;0\n".to_vec();
        let got = read_expected_reads(&mut Cursor::new(data), "p").unwrap();

        assert_eq!(got.positive, vec![("id1".to_string(), None)]);
    }

    #[test]
    fn read_expected_reads_undeclared_rank() {
        use super::read_expected_reads;
        use std::io::Cursor;

        let data: Vec<u8> = b"@@ranks\td;p\n@@positive\nid1\td1;p1\n".to_vec();
        let got = read_expected_reads(&mut Cursor::new(data), "genus");

        assert!(got.is_err());
    }

    #[test]
    fn read_expected_abundances_totals() {
        use super::read_expected_abundances;
        use crate::{EXPECTED, UNMATCHED};
        use std::io::Cursor;

        let mut data: Vec<u8> = b"@@ranks\td;p\n".to_vec();
        data.append(&mut b"@@negative\n".to_vec());
        data.append(&mut b"10\n".to_vec());
        data.append(&mut b"5\n".to_vec());
        data.append(&mut b"@@positive\n".to_vec());
        data.append(&mut b"100\td1;p1\n".to_vec());
        data.append(&mut b"50\td2;p2\n".to_vec());
        data.append(&mut b"25\td3;p1\n".to_vec());

        let got = read_expected_abundances(&mut Cursor::new(data), "p").unwrap();

        assert_eq!(got.total, 190);
        assert_eq!(got.taxa[UNMATCHED][EXPECTED], 15);
        // Two lineages collapse onto p1 at the analysed rank.
        assert_eq!(got.taxa["p1"][EXPECTED], 125);
        assert_eq!(got.taxa["p2"][EXPECTED], 50);
    }
}
