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
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use clap::Parser;
use log::info;

use taxgrade::Metric;
use taxgrade::report;

mod cli;

type E = Box<dyn std::error::Error>;

/// Initializes the logger with verbosity given in `log_max_level`.
fn init_log(log_max_level: usize) {
    stderrlog::new()
    .module(module_path!())
    .quiet(false)
    .verbosity(log_max_level)
    .timestamp(stderrlog::Timestamp::Off)
    .init()
    .unwrap();
}

/// Checks that the file at `path` exists and is not empty.
fn check_input(path: &Path) -> Result<(), E> {
    if std::fs::metadata(path).map(|meta| meta.len()).unwrap_or(0) == 0 {
        return Err(format!("The file {} is empty or does not exist.", path.display()).into());
    }
    Ok(())
}

fn run(cli: &cli::Cli) -> Result<(), E> {
    check_input(&cli.query_file)?;
    check_input(&cli.expected_file)?;
    check_input(&cli.train_file)?;

    let metric = Metric::from_str(&cli.metric)?;

    info!("Grading {} at rank {}", cli.name, cli.rank);

    let mut expected = File::open(&cli.expected_file)?;
    let mut training = File::open(&cli.train_file)?;

    let scores = match metric {
        Metric::Rk => {
            let query = File::open(&cli.query_file)?;
            taxgrade::evaluate_rk(query, &mut expected, &mut training, &cli.rank)?
        },
        Metric::BrayCurtis => {
            taxgrade::evaluate_bc(&mut expected, &mut training, &cli.rank)?
        },
    };

    let ranked = report::rank_scores(scores);
    report::write_report(&ranked, &mut std::io::stdout())?;

    Ok(())
}

fn main() {
    let cli = cli::Cli::parse();
    init_log(if cli.verbose { 2 } else { 1 });

    if let Err(err) = run(&cli) {
        println!("ERROR: {}", err);
        std::process::exit(1);
    }
}
