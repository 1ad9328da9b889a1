//! Damped update of the per-cell heating/cooling prefactors.
//!
//! The radiative-transfer code reports, for every cell it saw, the rates it
//! actually computed. The hydro code approximates the same rates as
//! `prefactor * coefficient * ne * nh`. Each cycle the prefactors are nudged
//! towards agreement, but never by more than a factor `max_change` either way.

use std::fmt;
use std::path::{Path, PathBuf};

use ascii_table::{AsciiTable, Column, TableWriter};
use hydro_common::{Field, Snapshot, SnapshotSource, UnitSet};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{CouplingConfig, PrefactorUpdate, ZeroDenominatorPolicy};
use crate::error::{CouplingError, CouplingResult};

/// Heating and cooling processes carrying a prefactor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Process {
    CompHeat,
    CompCool,
    LineCool,
    BremCool,
    XrayHeat,
}

impl Process {
    pub const ALL: [Process; 5] = [
        Process::CompHeat,
        Process::CompCool,
        Process::LineCool,
        Process::BremCool,
        Process::XrayHeat,
    ];

    /// Column order of the prefactor table.
    pub const OUTPUT_ORDER: [Process; 5] = [
        Process::CompHeat,
        Process::CompCool,
        Process::XrayHeat,
        Process::BremCool,
        Process::LineCool,
    ];

    /// Position in [`Process::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Process::CompHeat => 0,
            Process::CompCool => 1,
            Process::LineCool => 2,
            Process::BremCool => 3,
            Process::XrayHeat => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Process::CompHeat => "comp_h",
            Process::CompCool => "comp_c",
            Process::LineCool => "line_c",
            Process::BremCool => "brem_c",
            Process::XrayHeat => "xray_h",
        }
    }

    /// Column of the heat/cool table holding the target rate.
    pub fn rate_column(&self) -> &'static str {
        match self {
            Process::CompHeat => "heat_comp",
            Process::CompCool => "cool_comp",
            Process::LineCool => "cool_lines",
            Process::BremCool => "cool_ff",
            Process::XrayHeat => "heat_xray",
        }
    }

    /// Column of the prefactor table.
    pub fn prefactor_column(&self) -> &'static str {
        match self {
            Process::CompHeat => "comp_h_pre",
            Process::CompCool => "comp_c_pre",
            Process::LineCool => "line_c_pre",
            Process::BremCool => "brem_c_pre",
            Process::XrayHeat => "xray_h_pre",
        }
    }

    pub fn coefficient_field(&self) -> Field {
        match self {
            Process::CompHeat => Field::CompHeat,
            Process::CompCool => Field::CompCool,
            Process::LineCool => Field::LineCool,
            Process::BremCool => Field::BremCool,
            Process::XrayHeat => Field::XrayHeat,
        }
    }

    pub fn prefactor_field(&self) -> Field {
        match self {
            Process::CompHeat => Field::CompHeatPre,
            Process::CompCool => Field::CompCoolPre,
            Process::LineCool => Field::LineCoolPre,
            Process::BremCool => Field::BremCoolPre,
            Process::XrayHeat => Field::XrayHeatPre,
        }
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the heat/cool table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatCoolRow {
    pub i: usize,
    pub j: usize,
    pub rcen: f64,
    pub thetacen: f64,
    /// Density seen by the radiative-transfer code [g/cm^3]
    pub rho: f64,
    /// Target rates indexed by [`Process::index`]
    pub rates: [f64; 5],
}

impl HeatCoolRow {
    pub fn rate(&self, process: Process) -> f64 {
        self.rates[process.index()]
    }
}

/// Heating and cooling rates reported by the radiative-transfer code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatCoolTable {
    pub rows: Vec<HeatCoolRow>,
}

impl HeatCoolTable {
    pub fn new(rows: Vec<HeatCoolRow>) -> Self {
        Self { rows }
    }

    pub fn read<P: AsRef<Path>>(path: P) -> CouplingResult<Self> {
        Self::from_table(&AsciiTable::read(path)?)
    }

    pub fn parse(text: &str) -> CouplingResult<Self> {
        Self::from_table(&AsciiTable::parse(text)?)
    }

    /// Pick the named columns out of a generic table. Column order in the
    /// file does not matter.
    pub fn from_table(table: &AsciiTable) -> CouplingResult<Self> {
        let i = table.column("i")?;
        let j = table.column("j")?;
        let rcen = table.column("rcen")?;
        let thetacen = table.column("thetacen")?;
        let rho = table.column("rho")?;
        let rates = Process::ALL
            .iter()
            .map(|p| table.column(p.rate_column()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut rows = Vec::with_capacity(table.len());
        for k in 0..table.len() {
            let mut row_rates = [0.0; 5];
            for (slot, column) in row_rates.iter_mut().zip(&rates) {
                *slot = column[k];
            }
            rows.push(HeatCoolRow {
                i: cell_index(k, "i", i[k])?,
                j: cell_index(k, "j", j[k])?,
                rcen: rcen[k],
                thetacen: thetacen[k],
                rho: rho[k],
                rates: row_rates,
            });
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn cell_index(row: usize, column: &'static str, value: f64) -> CouplingResult<usize> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= usize::MAX as f64 {
        Ok(value as usize)
    } else {
        Err(CouplingError::InvalidIndex { row, column, value })
    }
}

/// One row of the prefactor table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrefactorRow {
    pub i: usize,
    pub j: usize,
    pub rcen: f64,
    pub thetacen: f64,
    pub rho: f64,
    /// New prefactors indexed by [`Process::index`]
    pub prefactors: [f64; 5],
}

impl PrefactorRow {
    pub fn prefactor(&self, process: Process) -> f64 {
        self.prefactors[process.index()]
    }
}

/// Result of one rescaling pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RescaleOutcome {
    pub rows: Vec<PrefactorRow>,
    /// Rows whose density disagrees with the snapshot
    pub discrepancies: usize,
}

impl RescaleOutcome {
    /// Lay the rows out as the prefactor table.
    pub fn to_table(&self) -> CouplingResult<TableWriter> {
        let mut columns = vec![
            Column::index("ir"),
            Column::sci("rcent"),
            Column::index("itheta"),
            Column::sci("thetacent"),
            Column::sci("rho"),
        ];
        columns.extend(Process::OUTPUT_ORDER.iter().map(|p| Column::sci(p.prefactor_column())));

        let mut table = TableWriter::new(columns);
        for row in &self.rows {
            let mut values = vec![row.i as f64, row.rcen, row.j as f64, row.thetacen, row.rho];
            values.extend(Process::OUTPUT_ORDER.iter().map(|p| row.prefactor(*p)));
            table.push_row(values)?;
        }
        Ok(table)
    }

    /// Replace `path` with the prefactor table.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> CouplingResult<()> {
        self.to_table()?.write_atomic(path)?;
        Ok(())
    }
}

/// Summary of [`RateRescaler::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RescaleSummary {
    pub cycle: u32,
    pub rows: usize,
    pub discrepancies: usize,
    pub output: PathBuf,
}

/// Fields a snapshot needs for rescaling.
fn required_fields() -> Vec<Field> {
    let mut fields = vec![Field::Density, Field::ElectronDensity, Field::IonDensity];
    for p in Process::ALL {
        fields.push(p.coefficient_field());
        fields.push(p.prefactor_field());
    }
    fields
}

/// Computes new prefactors from a heat/cool table and a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRescaler {
    pub max_change: f64,
    pub density_tolerance: f64,
    pub zero_denominator: ZeroDenominatorPolicy,
    pub update: PrefactorUpdate,
}

impl Default for RateRescaler {
    fn default() -> Self {
        Self::from_config(&CouplingConfig::default())
    }
}

impl RateRescaler {
    pub fn from_config(config: &CouplingConfig) -> Self {
        Self {
            max_change: config.max_change,
            density_tolerance: config.density_tolerance,
            zero_denominator: config.zero_denominator,
            update: config.prefactor_update,
        }
    }

    /// New prefactor for one process in one cell.
    ///
    /// The result always lies in `[max_change * prev, prev / max_change]`,
    /// except under [`ZeroDenominatorPolicy::KeepPrevious`] where `prev` is
    /// returned unchanged. A NaN ratio (NaN rate, or 0/0) fails under
    /// [`ZeroDenominatorPolicy::Fail`] and keeps `prev` otherwise.
    #[allow(clippy::too_many_arguments)]
    pub fn update_prefactor(
        &self,
        process: Process,
        i: usize,
        j: usize,
        prev: f64,
        coefficient: f64,
        nenh: f64,
        target: f64,
    ) -> CouplingResult<f64> {
        let denominator = prev * coefficient * nenh;
        if denominator == 0.0 {
            match self.zero_denominator {
                ZeroDenominatorPolicy::Fail => {
                    return Err(CouplingError::ZeroDenominator {
                        process: process.name(),
                        i,
                        j,
                    })
                }
                ZeroDenominatorPolicy::KeepPrevious => return Ok(prev),
                ZeroDenominatorPolicy::Clamp => {}
            }
        }

        let ratio = target / denominator;
        if ratio.is_nan() {
            // NaN compares false against both bounds and would pass the clamp
            return match self.zero_denominator {
                ZeroDenominatorPolicy::Fail => Err(CouplingError::UndefinedRatio {
                    process: process.name(),
                    i,
                    j,
                }),
                ZeroDenominatorPolicy::KeepPrevious | ZeroDenominatorPolicy::Clamp => Ok(prev),
            };
        }

        let candidate = match self.update {
            PrefactorUpdate::Ratio => ratio,
            PrefactorUpdate::Scaled => prev * ratio,
        };

        let low = self.max_change * prev;
        let high = (1.0 / self.max_change) * prev;
        Ok(if candidate < low {
            low
        } else if candidate > high {
            high
        } else {
            candidate
        })
    }

    /// Rescale every row of `table` against `snapshot`.
    pub fn rescale(
        &self,
        table: &HeatCoolTable,
        snapshot: &Snapshot,
        units: &UnitSet,
    ) -> CouplingResult<RescaleOutcome> {
        snapshot.require(&required_fields())?;

        let mut rows = Vec::with_capacity(table.len());
        let mut discrepancies = 0;

        for row in &table.rows {
            let (i, j) = (row.i, row.j);

            let rho = snapshot.value(Field::Density, i, j)? * units.density;
            let mismatch = (row.rho / rho - 1.0).abs();
            if !(mismatch <= self.density_tolerance) {
                discrepancies += 1;
                debug!(i, j, table_rho = row.rho, snapshot_rho = rho, "Density mismatch");
            }

            let nenh = snapshot.value(Field::ElectronDensity, i, j)?
                * snapshot.value(Field::IonDensity, i, j)?;

            let mut prefactors = [0.0; 5];
            for process in Process::ALL {
                prefactors[process.index()] = self.update_prefactor(
                    process,
                    i,
                    j,
                    snapshot.value(process.prefactor_field(), i, j)?,
                    snapshot.value(process.coefficient_field(), i, j)?,
                    nenh,
                    row.rate(process),
                )?;
            }

            rows.push(PrefactorRow {
                i,
                j,
                rcen: row.rcen,
                thetacen: row.thetacen,
                rho: row.rho,
                prefactors,
            });
        }

        if discrepancies > 0 {
            warn!(
                cycle = snapshot.cycle,
                discrepancies,
                rows = rows.len(),
                "Heat/cool table densities disagree with snapshot"
            );
        }

        Ok(RescaleOutcome {
            rows,
            discrepancies,
        })
    }

    /// One full step: read units and the heat/cool table from `dir`, load
    /// `cycle`, and write the prefactor table back into `dir`.
    pub fn run<S: SnapshotSource>(
        &self,
        source: &S,
        cycle: u32,
        config: &CouplingConfig,
        dir: &Path,
    ) -> CouplingResult<RescaleSummary> {
        let units = UnitSet::from_file(dir.join(&config.definitions))?;
        let table = HeatCoolTable::read(dir.join(&config.heatcool_table))?;
        let snapshot = source.load(cycle)?;

        let outcome = self.rescale(&table, &snapshot, &units)?;
        let output = dir.join(&config.prefactor_table);
        outcome.write(&output)?;

        info!(
            cycle,
            rows = outcome.rows.len(),
            discrepancies = outcome.discrepancies,
            path = %output.display(),
            "Wrote prefactors"
        );

        Ok(RescaleSummary {
            cycle,
            rows: outcome.rows.len(),
            discrepancies: outcome.discrepancies,
            output,
        })
    }
}
