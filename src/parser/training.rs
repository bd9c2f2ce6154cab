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
use crate::ReadTable;

use crate::parser::NO_MATCH;
use crate::parser::rank_label;
use crate::parser::setting_name;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone)]
pub struct DuplicateClassification {
    pub read_id: String,
    pub setting: String,
}

impl std::fmt::Display for DuplicateClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "The read {} has been classified twice under setting {}", self.read_id, self.setting)
    }
}

impl std::error::Error for DuplicateClassification {}

#[derive(Debug, Clone)]
pub struct UnknownReadId {
    pub read_id: String,
}

impl std::fmt::Display for UnknownReadId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Unexpected read ID in classifier output: {}", self.read_id)
    }
}

impl std::error::Error for UnknownReadId {}

#[derive(Debug, Clone)]
pub struct NoSettings;

impl std::fmt::Display for NoSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "No settings found. Does the training file have @@_* lines?")
    }
}

impl std::error::Error for NoSettings {}

/// Parse training results in per-read (rk) mode.
///
/// Setting sentinels open a new block and register the setting name in
/// discovery order. Within a block, `>`-prefixed lines set the current read,
/// a `No match` line clears it (the read stays unclassified under this
/// setting), and a `<rank>: <label>` line assigns the label to the current
/// (read, setting) cell in `reads`.
///
/// ## Errors
///
/// [UnknownReadId] when a classified read is absent from the
/// expectation-derived table, [DuplicateClassification] when a (read,
/// setting) cell is assigned twice, [NoSettings] when the file contains no
/// sentinel lines.
pub fn read_training_rk<R: Read>(
    conn: &mut R,
    rank: &str,
    reads: &mut ReadTable,
) -> Result<Vec<String>, E> {
    let reader = BufReader::new(conn);

    let mut settings: Vec<String> = Vec::new();
    let mut setting = String::new();
    let mut read_id = String::new();

    for line in reader.lines() {
        let line = line?;
        if let Some(name) = setting_name(&line) {
            setting = name.to_string();
            settings.push(setting.clone());
            continue;
        }
        if setting.is_empty() {
            continue;
        }

        if let Some(id) = line.strip_prefix('>') {
            read_id = id.to_string();
        } else if line.starts_with(NO_MATCH) {
            read_id.clear();
        } else if !read_id.is_empty() {
            if let Some(label) = rank_label(&line, rank) {
                let record = reads.reads.get_mut(&read_id)
                    .ok_or_else(|| UnknownReadId { read_id: read_id.clone() })?;
                if record.observed.insert(setting.clone(), label.to_string()).is_some() {
                    return Err(DuplicateClassification {
                        read_id: read_id.clone(),
                        setting: setting.clone(),
                    }.into());
                }
            }
        }
    }

    if settings.is_empty() {
        return Err(NoSettings.into());
    }

    debug!("Found {} settings in training results", settings.len());
    Ok(settings)
}

/// Parse training results in abundance (bc) mode.
///
/// Each setting sentinel opens a block and seeds that setting's UNMATCHED
/// count with the total expected abundance; every `<rank>: <label>` line then
/// counts one observation of the label and decrements UNMATCHED. Labels
/// absent from the expectation still get a row (their expected count is
/// zero-filled at scoring time).
pub fn read_training_bc<R: Read>(
    conn: &mut R,
    rank: &str,
    abunds: &mut AbundanceTable,
) -> Result<Vec<String>, E> {
    let reader = BufReader::new(conn);

    let mut settings: Vec<String> = Vec::new();
    let mut setting = String::new();

    for line in reader.lines() {
        let line = line?;
        if let Some(name) = setting_name(&line) {
            setting = name.to_string();
            settings.push(setting.clone());
            abunds.open_setting(&setting);
            continue;
        }
        if setting.is_empty() {
            continue;
        }

        if let Some(label) = rank_label(&line, rank) {
            abunds.record(label, &setting);
        }
    }

    if settings.is_empty() {
        return Err(NoSettings.into());
    }

    debug!("Found {} settings in training results", settings.len());
    Ok(settings)
}
