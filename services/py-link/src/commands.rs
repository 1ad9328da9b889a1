//! Subcommand implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use coupling::{
    write_pluto_ini, write_python_pf, CouplingConfig, GridExporter, RateRescaler, RunParameters,
};
use hydro_common::UnitSet;
use pluto_parser::PlutoDblSource;
use serde::Serialize;

/// What a subcommand did, printed on stdout.
#[derive(Debug, Serialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum Report {
    Units {
        density: f64,
        length: f64,
        velocity: f64,
    },
    Export {
        cycle: u32,
        output: PathBuf,
    },
    PreCalc {
        cycle: u32,
        rows: usize,
        discrepancies: usize,
        output: PathBuf,
    },
    ParameterFile {
        output: PathBuf,
    },
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Units {
                density,
                length,
                velocity,
            } => write!(f, "{:e} {:e} {:e}", density, length, velocity),
            Report::Export { output, .. } | Report::ParameterFile { output } => {
                write!(f, "{}", output.display())
            }
            Report::PreCalc { discrepancies, .. } => write!(f, "{}", discrepancies),
        }
    }
}

fn read_units(workdir: &Path, config: &CouplingConfig) -> Result<UnitSet> {
    let path = workdir.join(&config.definitions);
    UnitSet::from_file(&path).with_context(|| format!("reading units from {}", path.display()))
}

fn read_params(workdir: &Path, path: &Path) -> Result<RunParameters> {
    let path = workdir.join(path);
    RunParameters::from_yaml_file(&path)
        .with_context(|| format!("reading run parameters from {}", path.display()))
}

pub fn units(workdir: &Path, config: &CouplingConfig) -> Result<Report> {
    let units = read_units(workdir, config)?;
    Ok(Report::Units {
        density: units.density,
        length: units.length,
        velocity: units.velocity,
    })
}

pub fn export(workdir: &Path, cycle: u32, config: &CouplingConfig) -> Result<Report> {
    let units = read_units(workdir, config)?;
    let source = PlutoDblSource::new(workdir);
    let output = GridExporter::new(config.theta_max)
        .export(&source, cycle, &units, workdir)
        .with_context(|| format!("exporting cycle {}", cycle))?;
    Ok(Report::Export { cycle, output })
}

pub fn pre_calc(workdir: &Path, cycle: u32, config: &CouplingConfig) -> Result<Report> {
    let source = PlutoDblSource::new(workdir);
    let summary = RateRescaler::from_config(config)
        .run(&source, cycle, config, workdir)
        .with_context(|| format!("rescaling prefactors for cycle {}", cycle))?;
    Ok(Report::PreCalc {
        cycle: summary.cycle,
        rows: summary.rows,
        discrepancies: summary.discrepancies,
        output: summary.output,
    })
}

pub fn pluto_ini(workdir: &Path, params: &Path, tstop: f64) -> Result<Report> {
    let params = read_params(workdir, params)?;
    let output = write_pluto_ini(workdir, &params, tstop)?;
    Ok(Report::ParameterFile { output })
}

pub fn python_pf(workdir: &Path, params: &Path, name: &str, cycles: u32) -> Result<Report> {
    let params = read_params(workdir, params)?;
    let output = write_python_pf(workdir, name, &params, cycles)?;
    Ok(Report::ParameterFile { output })
}
