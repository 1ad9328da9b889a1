//! Coupling driver between the hydro solver and the radiative-transfer code.
//!
//! Each subcommand performs one file conversion in the working directory and
//! exits; the surrounding job script runs them in turn.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use commands::Report;
use config::Overrides;

#[derive(Parser, Debug)]
#[command(name = "py-link")]
#[command(about = "Exchange grids and rates between the hydro and radiative-transfer codes")]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", env = "PYLINK_LOG_LEVEL")]
    log_level: String,

    /// Emit JSON logs and a JSON report
    #[arg(long)]
    json: bool,

    /// Directory holding the run's input and output files
    #[arg(long, default_value = ".")]
    workdir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the unit scales from the definitions file
    Units {
        /// Definitions file (default: PYLINK_DEFINITIONS or definitions.h)
        #[arg(long)]
        definitions: Option<PathBuf>,
    },

    /// Write the radiative-transfer grid table for a hydro output
    Export {
        /// Hydro output index
        cycle: u32,
    },

    /// Rescale heating/cooling prefactors from the radiative-transfer rates
    PreCalc {
        /// Hydro output index
        cycle: u32,

        /// fail, keep-previous or clamp
        #[arg(long)]
        zero_denominator: Option<String>,

        /// Largest allowed change per cycle, in (0, 1]
        #[arg(long)]
        max_change: Option<f64>,

        /// ratio or scaled
        #[arg(long)]
        prefactor_update: Option<String>,
    },

    /// Write pluto.ini
    PlutoIni {
        /// Run parameters (YAML)
        #[arg(long)]
        params: PathBuf,

        /// Stop time (code units)
        #[arg(long)]
        tstop: f64,
    },

    /// Write <name>.pf
    PythonPf {
        /// Run parameters (YAML)
        #[arg(long)]
        params: PathBuf,

        /// Run name; also the grid file referenced by the parameter file
        #[arg(long)]
        name: String,

        /// Ionization cycles
        #[arg(long, default_value_t = coupling::python_pf::DEFAULT_CYCLES)]
        cycles: u32,
    },
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level, args.json)?;

    info!(workdir = %args.workdir.display(), "Starting py-link");

    let report = match args.command {
        Command::Units { definitions } => {
            let config = config::load(&Overrides {
                definitions,
                ..Overrides::default()
            })?;
            commands::units(&args.workdir, &config)?
        }
        Command::Export { cycle } => {
            let config = config::load(&Overrides::default())?;
            commands::export(&args.workdir, cycle, &config)?
        }
        Command::PreCalc {
            cycle,
            zero_denominator,
            max_change,
            prefactor_update,
        } => {
            let config = config::load(&Overrides {
                zero_denominator,
                max_change,
                prefactor_update,
                ..Overrides::default()
            })?;
            commands::pre_calc(&args.workdir, cycle, &config)?
        }
        Command::PlutoIni { params, tstop } => commands::pluto_ini(&args.workdir, &params, tstop)?,
        Command::PythonPf {
            params,
            name,
            cycles,
        } => commands::python_pf(&args.workdir, &params, &name, cycles)?,
    };

    print_report(&report, args.json)
}

fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
