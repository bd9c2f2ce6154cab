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

// Input specific parsers
pub mod expectation;
pub mod query;
pub mod training;

type E = Box<dyn std::error::Error>;

/// Line prefix declaring the taxonomy ranks in the expectation file.
pub const RANKS_SENTINEL: &str = "@@ranks";
/// Section sentinel for reads that should stay unclassified.
pub const NEGATIVE_SENTINEL: &str = "@@negative";
/// Section sentinel for reads with an expected classification.
pub const POSITIVE_SENTINEL: &str = "@@positive";
/// Prefix that opens a new parameter-setting block in the training results.
pub const SETTING_SENTINEL: &str = "@@";
/// Named setting prefix; stripped to obtain the setting name.
pub const SETTING_NAME_PREFIX: &str = "@@_";
/// Line marking an unclassified read within a setting block.
pub const NO_MATCH: &str = "No match";

#[derive(Debug, Clone)]
pub struct UnknownRank {
    pub rank: String,
}

impl std::fmt::Display for UnknownRank {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "The rank {} is not declared in the expectation file", self.rank)
    }
}

impl std::error::Error for UnknownRank {}

#[derive(Debug, Clone)]
pub struct MalformedLine {
    pub line: String,
}

impl std::fmt::Display for MalformedLine {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Malformed input line: {}", self.line)
    }
}

impl std::error::Error for MalformedLine {}

/// Resolves `rank` to its zero-based index in a `@@ranks` declaration line.
///
/// The declaration is `@@ranks<TAB><rank1>;<rank2>;...`; an absent rank is
/// fatal.
pub fn rank_index(line: &str, rank: &str) -> Result<usize, E> {
    let ranks = line.split('\t').nth(1)
        .ok_or_else(|| MalformedLine { line: line.to_string() })?;
    ranks.split(';').position(|declared| declared == rank)
        .ok_or_else(|| UnknownRank { rank: rank.to_string() }.into())
}

/// Extracts the label from a `<rank>: <label>` classification line.
///
/// Returns None when the line does not carry `rank`. The label is the field
/// between the first and second `": "` separators.
pub fn rank_label<'a>(line: &'a str, rank: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(rank)?;
    let rest = rest.strip_prefix(": ")?;
    rest.split(": ").next()
}

/// Returns the setting name if `line` opens a new setting block.
///
/// Any `@@`-prefixed line opens a block; the `@@_` prefix is stripped for the
/// name, other `@@` lines keep the full line as the name.
pub fn setting_name(line: &str) -> Option<&str> {
    if !line.starts_with(SETTING_SENTINEL) {
        return None
    }
    Some(line.strip_prefix(SETTING_NAME_PREFIX).unwrap_or(line))
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn rank_index_resolves_declared_rank() {
        use super::rank_index;

        let line = "@@ranks\tdomain;phylum;class;order;family;genus;species";

        assert_eq!(rank_index(line, "domain").unwrap(), 0);
        assert_eq!(rank_index(line, "genus").unwrap(), 5);
        assert_eq!(rank_index(line, "species").unwrap(), 6);
    }

    #[test]
    fn rank_index_rejects_undeclared_rank() {
        use super::rank_index;

        let line = "@@ranks\tdomain;phylum";
        let got = rank_index(line, "genus");

        assert!(got.is_err());
    }

    #[test]
    fn rank_label_extracts_label() {
        use super::rank_label;

        assert_eq!(rank_label("genus: Escherichia", "genus"), Some("Escherichia"));
        assert_eq!(rank_label("species: Escherichia coli", "genus"), None);
        assert_eq!(rank_label("No match at this rank", "genus"), None);
    }

    #[test]
    fn rank_label_keeps_first_field_only() {
        use super::rank_label;

        // Separator inside the label: only the field up to the next ": "
        // counts, matching the historical splitting behaviour.
        assert_eq!(rank_label("genus: Candidatus: uncultured", "genus"), Some("Candidatus"));
    }

    #[test]
    fn setting_name_strips_prefix() {
        use super::setting_name;

        assert_eq!(setting_name("@@_k31-e0.01"), Some("k31-e0.01"));
        assert_eq!(setting_name("@@bare"), Some("@@bare"));
        assert_eq!(setting_name(">read-1"), None);
    }
}
