//! Parser for `dbl.out` and the binary `data.NNNN.dbl` files.

use std::fs;
use std::path::Path;

use bytes::{Buf, Bytes};

use crate::error::{PlutoError, PlutoResult};
use crate::grid::PlutoGrid;

/// Byte order of a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    fn parse(token: &str) -> PlutoResult<Self> {
        match token {
            "little" => Ok(Endian::Little),
            "big" => Ok(Endian::Big),
            other => Err(PlutoError::invalid_format(format!("unknown byte order '{}'", other))),
        }
    }
}

/// One line of `dbl.out`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub index: u32,
    pub time: f64,
    pub dt: f64,
    pub step: u64,
    pub endian: Endian,
    /// Variable names in the order they are stored
    pub vars: Vec<String>,
}

impl OutputRecord {
    /// Parse `index time dt step single_file endian var...`.
    pub fn parse(line: &str) -> PlutoResult<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 7 {
            return Err(PlutoError::invalid_format(format!(
                "dbl.out line '{}' has too few columns",
                line
            )));
        }
        if tokens[4] != "single_file" {
            return Err(PlutoError::invalid_format(format!(
                "output mode '{}' not supported, expected single_file",
                tokens[4]
            )));
        }

        let bad = |what: &str, token: &str| {
            PlutoError::invalid_format(format!("bad {} '{}' in dbl.out", what, token))
        };

        Ok(Self {
            index: tokens[0].parse().map_err(|_| bad("index", tokens[0]))?,
            time: tokens[1].parse().map_err(|_| bad("time", tokens[1]))?,
            dt: tokens[2].parse().map_err(|_| bad("dt", tokens[2]))?,
            step: tokens[3].parse().map_err(|_| bad("step", tokens[3]))?,
            endian: Endian::parse(tokens[5])?,
            vars: tokens[6..].iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Data file name for this record.
    pub fn data_file_name(&self) -> String {
        format!("data.{:04}.dbl", self.index)
    }
}

/// Parse every record in `dbl.out` text.
pub fn parse_log(text: &str) -> PlutoResult<Vec<OutputRecord>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(OutputRecord::parse)
        .collect()
}

/// Read `dbl.out` and return the record for `cycle`.
pub fn find_record<P: AsRef<Path>>(path: P, cycle: u32) -> PlutoResult<OutputRecord> {
    let text = fs::read_to_string(path)?;
    parse_log(&text)?
        .into_iter()
        .find(|record| record.index == cycle)
        .ok_or(PlutoError::CycleNotFound(cycle))
}

/// Split a data file into one block per variable, keeping the k = 0 plane
/// (x1 fastest, then x2).
pub fn read_variables(
    data: Bytes,
    record: &OutputRecord,
    grid: &PlutoGrid,
) -> PlutoResult<Vec<(String, Vec<f64>)>> {
    let block = grid.cell_count();
    let plane = grid.x1.len() * grid.x2.len();
    let expected = block * record.vars.len() * 8;
    if data.len() < expected {
        return Err(PlutoError::invalid_format(format!(
            "{} holds {} bytes, need {} for {} variables of {} cells",
            record.data_file_name(),
            data.len(),
            expected,
            record.vars.len(),
            block
        )));
    }

    let mut buf = data;
    let mut out = Vec::with_capacity(record.vars.len());
    for name in &record.vars {
        let mut values = Vec::with_capacity(plane);
        for n in 0..block {
            let value = match record.endian {
                Endian::Little => buf.get_f64_le(),
                Endian::Big => buf.get_f64(),
            };
            if n < plane {
                values.push(value);
            }
        }
        out.push((name.clone(), values));
    }
    Ok(out)
}
