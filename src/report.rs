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
use std::io::Write;

type E = Box<dyn std::error::Error>;

/// Sorts per-setting scores into report order: descending score, ties broken
/// by ascending setting name.
pub fn rank_scores(mut scores: Vec<(String, f64)>) -> Vec<(String, f64)> {
    scores.sort_by(|a, b| {
        b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    scores
}

/// Formats a score rounded to four decimals as its shortest decimal form.
///
/// Trailing zeros are trimmed but at least one decimal digit is kept, so
/// 1.0 prints as `1.0` and 0.9231 as `0.9231`.
pub fn format_score(score: f64) -> String {
    let mut repr = format!("{:.4}", score);
    while repr.ends_with('0') {
        repr.pop();
    }
    if repr.ends_with('.') {
        repr.push('0');
    }
    repr
}

/// Writes the ranked report as one `<setting><TAB><score>` line per setting.
pub fn write_report<W: Write>(
    scores: &[(String, f64)],
    conn_out: &mut W,
) -> Result<(), E> {
    for (setting, score) in scores {
        writeln!(conn_out, "{}\t{}", setting, format_score(*score))?;
    }
    conn_out.flush()?;
    Ok(())
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn rank_scores_descending_by_score() {
        use super::rank_scores;

        let scores = vec![
            ("low".to_string(), 0.1),
            ("high".to_string(), 0.9),
            ("mid".to_string(), 0.5),
        ];

        let got = rank_scores(scores);
        let names: Vec<&str> = got.iter().map(|(name, _)| name.as_str()).collect();

        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[test]
    fn rank_scores_ties_by_ascending_name() {
        use super::rank_scores;

        let scores = vec![
            ("zeta".to_string(), 0.5),
            ("alpha".to_string(), 0.5),
            ("mid".to_string(), 0.5),
            ("top".to_string(), 0.9),
        ];

        let got = rank_scores(scores);
        let names: Vec<&str> = got.iter().map(|(name, _)| name.as_str()).collect();

        assert_eq!(names, vec!["top", "alpha", "mid", "zeta"]);
    }

    #[test]
    fn format_score_trims_trailing_zeros() {
        use super::format_score;

        assert_eq!(format_score(1.0), "1.0");
        assert_eq!(format_score(0.9231), "0.9231");
        assert_eq!(format_score(-0.5), "-0.5");
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(-1.0), "-1.0");
        assert_eq!(format_score(0.25), "0.25");
    }

    #[test]
    fn write_report_tab_separated_lines() {
        use super::write_report;
        use std::io::Cursor;

        let scores = vec![
            ("strict".to_string(), 1.0),
            ("lenient".to_string(), 0.9231),
        ];

        let mut output: Cursor<Vec<u8>> = Cursor::new(Vec::new());
        write_report(&scores, &mut output).unwrap();

        let expected = b"strict\t1.0\nlenient\t0.9231\n".to_vec();
        assert_eq!(output.get_ref(), &expected);
    }
}
