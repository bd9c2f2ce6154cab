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

//! taxgrade is a library and a command-line client for grading the raw output
//! of a metagenomic classifier training sweep against known taxonomic
//! assignments.
//!
//! A training sweep runs the same classifier over one query read set under
//! several parameter configurations ("settings") and concatenates the raw
//! results into a single file, with each setting's block introduced by a
//! `@@_<setting>` sentinel line. taxgrade parses that file together with an
//! expectation file describing the ground truth, computes one agreement score
//! per setting, and prints the settings ranked from best to worst.
//!
//! Two metrics are supported, selected with [Metric]:
//!
//!   - `rk`: the multiclass generalization of the Matthews correlation
//!     coefficient over per-read classifications at the analysed rank.
//!     Ground truth is given as header patterns that identify the reads.
//!   - `bc`: Bray-Curtis similarity over per-taxon abundance counts.
//!     Ground truth is given as expected counts per lineage.
//!
//! ## Usage
//!
//! ### Command line
//!
//! ```text
//! taxgrade --query reads.fasta --exp expected.txt --train train-results.txt \
//!     --rank genus --metric rk --name sweep-1
//! ```
//!
//! The ranked `<setting>\t<score>` report is written to stdout; log output
//! goes to stderr.
//!
//! ### Rust API
//!
//! The entry points [evaluate_rk] and [evaluate_bc] run the full pipeline over
//! anything that implements [Read] and return the unranked per-setting scores.
//! Ranking and formatting live in [report]. The parsing stages in [parser] can
//! also be driven individually; they fill the [ReadTable] and [AbundanceTable]
//! structures defined here.
//!

use std::io::Read;

use indexmap::IndexMap;

pub mod metrics;
pub mod parser;
pub mod report;

type E = Box<dyn std::error::Error>;

/// Column key for the ground-truth entries in [ReadTable] and [AbundanceTable].
pub const EXPECTED: &str = "exp";

/// Category filled in for reads without a classification at the analysed rank.
///
/// Both the ground truth and the observations use this literal, so a read that
/// was expected to stay unclassified and did counts as an exact match.
pub const UNCLASSIFIED: &str = "unclassified";

/// Taxon bucket for reads that were not assigned to any category.
pub const UNMATCHED: &str = "UNMATCHED";

/// Supported agreement metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Metric {
    #[default]
    Rk,
    BrayCurtis,
}

impl std::str::FromStr for Metric {
    type Err = String; // Define an error type for parsing failures

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rk" => Ok(Metric::Rk),
            "bc" => Ok(Metric::BrayCurtis),
            _ => Err(format!("'{}' is not a valid Metric", s)),
        }
    }
}

/// Ground truth for per-read grading, as ordered pattern lists.
///
/// Patterns are matched against read headers by substring search in file
/// order, negative before positive, and the first match wins. The order is
/// load-bearing when patterns overlap, so these are explicit lists rather
/// than hash maps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpectedPatterns {
    /// Patterns identifying reads that should stay unclassified.
    pub negative: Vec<String>,
    /// Patterns identifying classifiable reads, with the expected label at
    /// the analysed rank. A label of None means the truth is unknown at this
    /// rank (a literal `0` in the lineage).
    pub positive: Vec<(String, Option<String>)>,
}

/// One query read: its expected label plus the per-setting observations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadRecord {
    /// Expected label at the analysed rank; None means expected unclassified.
    pub expected: Option<String>,
    /// Observed label per setting. An absent setting means the read was not
    /// classified under it. Inserting a second label for the same setting is
    /// the fatal duplicate-classification condition.
    pub observed: IndexMap<String, String>,
}

/// Per-read classification table, keyed by read header in query-file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadTable {
    pub reads: IndexMap<String, ReadRecord>,
}

impl ReadTable {
    /// Ground-truth labels in table order, missing entries filled with
    /// [UNCLASSIFIED].
    pub fn expected_labels(&self) -> Vec<&str> {
        self.reads.values()
            .map(|record| record.expected.as_deref().unwrap_or(UNCLASSIFIED))
            .collect()
    }

    /// Labels observed under `setting` in table order, missing entries filled
    /// with [UNCLASSIFIED].
    ///
    /// The fill is required: the correlation coefficient needs a complete
    /// categorical vector per setting.
    pub fn observed_labels(&self, setting: &str) -> Vec<&str> {
        self.reads.values()
            .map(|record| record.observed.get(setting).map(|label| label.as_str()).unwrap_or(UNCLASSIFIED))
            .collect()
    }
}

/// Per-taxon abundance table: taxon -> column -> count.
///
/// Columns are [EXPECTED] plus the setting names. Counts are signed so that a
/// malformed input which drives [UNMATCHED] below zero flows through to the
/// metric instead of panicking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AbundanceTable {
    pub taxa: IndexMap<String, IndexMap<String, i64>>,
    /// Total expected abundance over all taxa, [UNMATCHED] included.
    pub total: i64,
}

impl AbundanceTable {
    /// Adds `count` reads that are expected to stay unclassified.
    pub fn add_unmatched(&mut self, count: i64) {
        *self.taxa.entry(UNMATCHED.to_string()).or_default()
            .entry(EXPECTED.to_string()).or_insert(0) += count;
        self.total += count;
    }

    /// Adds `count` to `taxon`'s expected abundance.
    pub fn add_expected(&mut self, taxon: &str, count: i64) {
        *self.taxa.entry(taxon.to_string()).or_default()
            .entry(EXPECTED.to_string()).or_insert(0) += count;
        self.total += count;
    }

    /// Opens a setting block: seeds its [UNMATCHED] count with the total
    /// expected abundance. Observations recorded afterwards decrement it.
    pub fn open_setting(&mut self, setting: &str) {
        self.taxa.entry(UNMATCHED.to_string()).or_default()
            .insert(setting.to_string(), self.total);
    }

    /// Counts one observation of `taxon` under `setting`.
    ///
    /// An unexpected taxon gets a fresh row; its [EXPECTED] cell stays absent
    /// and is zero-filled at scoring time.
    pub fn record(&mut self, taxon: &str, setting: &str) {
        *self.taxa.entry(taxon.to_string()).or_default()
            .entry(setting.to_string()).or_insert(0) += 1;
        *self.taxa.entry(UNMATCHED.to_string()).or_default()
            .entry(setting.to_string()).or_insert(0) -= 1;
    }

    /// The `column` counts over all taxa in table order, absent cells filled
    /// with 0. The fill is required: the distance metric is undefined over
    /// missing values.
    pub fn counts(&self, column: &str) -> Vec<f64> {
        self.taxa.values()
            .map(|row| *row.get(column).unwrap_or(&0) as f64)
            .collect()
    }
}

/// Grade per-read classifications with the Rk correlation coefficient.
///
/// Runs the full rk pipeline: ground-truth patterns from `expected`, read IDs
/// from the `query` FASTA, observations from `training`, then one Rk score
/// per setting, rounded to four decimals. Scores are returned in
/// setting-discovery order; see [report::rank_scores] for the ranked order.
///
/// ## Usage
/// ```rust
/// use taxgrade::evaluate_rk;
/// use std::io::Cursor;
///
/// let expected = b"@@ranks\td;p\n@@negative\nshuffled\n@@positive\nid1\td1;p1\n".to_vec();
/// let query = b">id1\nACGT\n>shuffled-0\nTTGA\n".to_vec();
///
/// let mut training: Vec<u8> = Vec::new();
/// training.extend(b"@@_strict\n>id1\np: p1\n>shuffled-0\nNo match\n");
/// training.extend(b"@@_lenient\n>id1\np: p1\n>shuffled-0\np: p1\n");
///
/// let scores = evaluate_rk(
///     Cursor::new(query),
///     &mut Cursor::new(expected),
///     &mut Cursor::new(training),
///     "p",
/// ).unwrap();
///
/// // `strict` reproduces the ground truth exactly, `lenient` classifies the
/// // shuffled read too and gets no credit.
/// assert_eq!(scores, vec![("strict".to_string(), 1.0), ("lenient".to_string(), 0.0)]);
/// ```
pub fn evaluate_rk<Q: Read + Send, X: Read, T: Read>(
    query: Q,
    expected: &mut X,
    training: &mut T,
    rank: &str,
) -> Result<Vec<(String, f64)>, E> {
    let patterns = parser::expectation::read_expected_reads(expected, rank)?;
    let mut table = parser::query::resolve_read_ids(query, &patterns)?;
    let settings = parser::training::read_training_rk(training, rank, &mut table)?;

    let truth = table.expected_labels();
    let mut scores: Vec<(String, f64)> = Vec::with_capacity(settings.len());
    for setting in settings {
        let observed = table.observed_labels(&setting);
        let score = metrics::round4(metrics::rk::rk_correlation(&truth, &observed));
        scores.push((setting, score));
    }
    Ok(scores)
}

/// Grade per-taxon abundances with the Bray-Curtis similarity index.
///
/// Runs the full bc pipeline: expected counts from `expected`, observed
/// counts from `training`, then one similarity score per setting, computed as
/// `1 - round(dissimilarity, 4)`. The query file is not consulted in this
/// mode. Scores are returned in setting-discovery order.
///
/// ## Usage
/// ```rust
/// use taxgrade::evaluate_bc;
/// use std::io::Cursor;
///
/// let expected = b"@@ranks\td;p\n@@negative\n10\n@@positive\n100\td1;p1\n".to_vec();
///
/// // One setting that matches all 100 classifiable reads and leaves the
/// // 10 unclassifiable ones unmatched.
/// let mut training = String::from("@@_only\n");
/// training.push_str(&"p: p1\n".repeat(100));
///
/// let scores = evaluate_bc(
///     &mut Cursor::new(expected),
///     &mut Cursor::new(training.into_bytes()),
///     "p",
/// ).unwrap();
///
/// assert_eq!(scores, vec![("only".to_string(), 1.0)]);
/// ```
pub fn evaluate_bc<X: Read, T: Read>(
    expected: &mut X,
    training: &mut T,
    rank: &str,
) -> Result<Vec<(String, f64)>, E> {
    let mut abunds = parser::expectation::read_expected_abundances(expected, rank)?;
    let settings = parser::training::read_training_bc(training, rank, &mut abunds)?;

    let truth = abunds.counts(EXPECTED);
    let mut scores: Vec<(String, f64)> = Vec::with_capacity(settings.len());
    for setting in settings {
        let observed = abunds.counts(&setting);
        let dissimilarity = metrics::bray_curtis::bray_curtis(&truth, &observed);
        scores.push((setting, 1.0 - metrics::round4(dissimilarity)));
    }
    Ok(scores)
}
