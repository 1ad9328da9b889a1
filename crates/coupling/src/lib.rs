//! Coupling between the hydro grid solver and the radiative-transfer code.
//!
//! One coupling cycle:
//!
//! 1. the hydro code writes a snapshot,
//! 2. [`export::GridExporter`] flattens it into the radiative-transfer
//!    code's grid table (`NNNNNNNN.pluto`),
//! 3. the radiative-transfer code computes heating and cooling rates per cell
//!    (`py_heatcool.dat`),
//! 4. [`rescale::RateRescaler`] turns those rates into damped prefactors
//!    (`prefactors.dat`) for the next hydro run.
//!
//! [`pluto_ini`] and [`python_pf`] write the two codes' parameter files.

pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod params;
pub mod pluto_ini;
pub mod pyfmt;
pub mod python_pf;
pub mod rescale;
pub mod spectrum;
pub mod template;

pub use config::{CouplingConfig, PrefactorUpdate, ZeroDenominatorPolicy};
pub use error::{CouplingError, CouplingResult};
pub use export::{grid_file_name, GridExporter};
pub use params::RunParameters;
pub use pluto_ini::write_pluto_ini;
pub use python_pf::write_python_pf;
pub use rescale::{
    HeatCoolRow, HeatCoolTable, PrefactorRow, Process, RateRescaler, RescaleOutcome, RescaleSummary,
};
pub use template::{Line, Template, Value};
