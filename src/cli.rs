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
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version)]
pub struct Cli {
    // FastX file the classifiers were run on
    #[arg(short = 'q', long = "query", required = true)]
    pub query_file: PathBuf,

    // Expectation file with the ground-truth patterns or abundances
    #[arg(short = 'e', long = "exp", required = true)]
    pub expected_file: PathBuf,

    // Concatenated classifier outputs, one @@-delimited block per setting
    #[arg(short = 't', long = "train", required = true)]
    pub train_file: PathBuf,

    // Taxonomic rank to grade at
    #[arg(short = 'r', long = "rank", required = true)]
    pub rank: String,

    // Scoring metric, rk (per-read) or bc (abundance)
    #[arg(short = 'm', long = "metric", required = true)]
    pub metric: String,

    // Name of this grading run, used in log messages
    #[arg(short = 'n', long = "name", required = true)]
    pub name: String,

    // Verbosity
    #[arg(long = "verbose", default_value_t = false)]
    pub verbose: bool,
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn cli_requires_metric_and_name() {
        use super::Cli;
        use clap::Parser;

        let base = vec![
            "taxgrade",
            "--query", "reads.fasta",
            "--exp", "expected.txt",
            "--train", "train-results.txt",
            "--rank", "p",
        ];

        assert!(Cli::try_parse_from(base.clone()).is_err());

        let mut with_metric = base.clone();
        with_metric.extend(["--metric", "rk"]);
        assert!(Cli::try_parse_from(with_metric.clone()).is_err());

        with_metric.extend(["--name", "sweep-1"]);
        assert!(Cli::try_parse_from(with_metric).is_ok());
    }
}
