//! Hydro snapshot to radiative-transfer grid table.

use std::f64::consts::FRAC_PI_2;
use std::path::{Path, PathBuf};

use ascii_table::{Column, TableWriter};
use hydro_common::{reconstruct_edges, AxisBounds, Field, Snapshot, SnapshotSource, UnitSet};
use tracing::{debug, info};

use crate::error::CouplingResult;

/// Fields read by the exporter.
pub const EXPORT_FIELDS: [Field; 5] = [
    Field::Vx1,
    Field::Vx2,
    Field::Vx3,
    Field::Density,
    Field::Temperature,
];

const PREAMBLE: [&str; 6] = [
    "This is a file generated by hydro_to_python",
    "We can put any number of comments in behind # signs",
    "By default, the order of coordinates are",
    "    r, theta, phi for spherical polars",
    "    x, y, z for cartesian",
    "    or w, z, phi for cylindrical",
];

/// Name of the grid table for `cycle`, e.g. `00000042.pluto`.
pub fn grid_file_name(cycle: u32) -> String {
    format!("{:08}.pluto", cycle)
}

fn columns() -> Vec<Column> {
    vec![
        Column::index("ir"),
        Column::sci("r_cent"),
        Column::sci("r_edge"),
        Column::index("itheta"),
        Column::sci("theta_cent"),
        Column::sci("theta_edge"),
        Column::sci("v_r"),
        Column::sci("v_theta"),
        Column::sci("v_phi"),
        Column::sci("density"),
        Column::sci("temperature"),
    ]
}

/// Flattens a 2-D spherical-polar snapshot into one row per cell.
#[derive(Debug, Clone)]
pub struct GridExporter {
    /// Upper limit of the colatitude domain [rad]
    pub theta_max: f64,
}

impl Default for GridExporter {
    fn default() -> Self {
        Self {
            theta_max: FRAC_PI_2,
        }
    }
}

impl GridExporter {
    pub fn new(theta_max: f64) -> Self {
        Self { theta_max }
    }

    /// Build the grid table in memory.
    ///
    /// Rows run over the radial index fastest. Radii, velocities and density
    /// are converted to cgs; angles and temperature are written as stored.
    pub fn build_table(&self, snapshot: &Snapshot, units: &UnitSet) -> CouplingResult<TableWriter> {
        snapshot.require(&EXPORT_FIELDS)?;

        let radial = reconstruct_edges("x1", &snapshot.x1, AxisBounds::unbounded())?;
        let angular = reconstruct_edges("x2", &snapshot.x2, AxisBounds::colatitude(self.theta_max))?;
        debug!(
            cycle = snapshot.cycle,
            r_ratio = radial.ratio,
            theta_ratio = angular.ratio,
            "Reconstructed cell edges"
        );

        let mut table = PREAMBLE
            .iter()
            .fold(TableWriter::new(columns()), |t, line| t.comment(*line));

        for j in 0..angular.len() {
            for i in 0..radial.len() {
                let at = |field: Field| snapshot.value(field, i, j);
                table.push_row(vec![
                    i as f64,
                    radial.centers[i] * units.length,
                    radial.edges[i] * units.length,
                    j as f64,
                    angular.centers[j],
                    angular.edges[j],
                    at(Field::Vx1)? * units.velocity,
                    at(Field::Vx2)? * units.velocity,
                    at(Field::Vx3)? * units.velocity,
                    at(Field::Density)? * units.density,
                    at(Field::Temperature)?,
                ])?;
            }
        }

        Ok(table)
    }

    /// Write the grid table for `snapshot` into `out_dir`.
    pub fn write(&self, snapshot: &Snapshot, units: &UnitSet, out_dir: &Path) -> CouplingResult<PathBuf> {
        let table = self.build_table(snapshot, units)?;
        let path = out_dir.join(grid_file_name(snapshot.cycle));
        table.write_atomic(&path)?;

        info!(
            cycle = snapshot.cycle,
            rows = table.len(),
            path = %path.display(),
            "Exported grid"
        );
        Ok(path)
    }

    /// Load `cycle` from `source` and write its grid table.
    pub fn export<S: SnapshotSource>(
        &self,
        source: &S,
        cycle: u32,
        units: &UnitSet,
        out_dir: &Path,
    ) -> CouplingResult<PathBuf> {
        let snapshot = source.load(cycle)?;
        self.write(&snapshot, units, out_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascii_table::AsciiTable;
    use hydro_common::FieldGrid;

    fn small_snapshot(x1: Vec<f64>, x2: Vec<f64>) -> Snapshot {
        let (nx1, nx2) = (x1.len(), x2.len());
        let mut snap = Snapshot::new(7, 0.0, x1, x2);
        for field in EXPORT_FIELDS {
            let offset = match field {
                Field::Vx1 => 1.0,
                Field::Vx2 => 2.0,
                Field::Vx3 => 3.0,
                Field::Density => 4.0,
                _ => 5.0,
            };
            snap.insert_field(
                field,
                FieldGrid::from_fn(nx1, nx2, |i, j| offset + i as f64 + 10.0 * j as f64),
            )
            .unwrap();
        }
        snap
    }

    #[test]
    fn test_grid_file_name() {
        assert_eq!(grid_file_name(42), "00000042.pluto");
        assert_eq!(grid_file_name(0), "00000000.pluto");
    }

    #[test]
    fn test_one_by_two_grid() {
        let snap = small_snapshot(vec![1.0], vec![0.3, 0.9]);
        let text = GridExporter::default()
            .build_table(&snap, &UnitSet::identity())
            .unwrap()
            .to_text()
            .unwrap();
        let table = AsciiTable::parse(&text).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.column("itheta").unwrap(), &[0.0, 1.0]);
        assert_eq!(table.column("ir").unwrap(), &[0.0, 0.0]);
    }

    #[test]
    fn test_row_order_and_scaling() {
        let snap = small_snapshot(vec![1.0, 2.0, 3.0], vec![0.2, 0.4, 0.6]);
        let units = UnitSet::new(2.0, 10.0, 100.0);
        let table = GridExporter::default().build_table(&snap, &units).unwrap();
        let parsed = AsciiTable::parse(&table.to_text().unwrap()).unwrap();

        assert_eq!(parsed.len(), 9);
        assert_eq!(parsed.column("ir").unwrap(), &[0.0, 1.0, 2.0, 0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
        assert_eq!(parsed.column("itheta").unwrap(), &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0]);

        // row 4 is i = 1, j = 1
        assert_eq!(parsed.column("r_cent").unwrap()[4], 20.0);
        assert_eq!(parsed.column("r_edge").unwrap()[4], 15.0);
        assert_eq!(parsed.column("theta_cent").unwrap()[4], 0.4);
        assert_eq!(parsed.column("v_r").unwrap()[4], 1200.0);
        assert_eq!(parsed.column("density").unwrap()[4], 30.0);
        assert_eq!(parsed.column("temperature").unwrap()[4], 16.0);
    }

    #[test]
    fn test_text_layout() {
        let snap = small_snapshot(vec![1.0], vec![0.3, 0.9]);
        let text = GridExporter::default()
            .build_table(&snap, &UnitSet::identity())
            .unwrap()
            .to_text()
            .unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# This is a file generated by hydro_to_python");
        assert_eq!(
            lines[6],
            "ir r_cent r_edge itheta theta_cent theta_edge v_r v_theta v_phi density temperature"
        );
        assert!(lines[7].starts_with("000 01.000000e+00 "));
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn test_angular_coordinates_within_hemisphere() {
        let snap = small_snapshot(vec![1.0, 2.0, 3.0], vec![0.9, 1.2, 1.5]);
        let table = GridExporter::default()
            .build_table(&snap, &UnitSet::identity())
            .unwrap();
        let parsed = AsciiTable::parse(&table.to_text().unwrap()).unwrap();

        for &theta in parsed.column("theta_cent").unwrap() {
            assert!(theta <= FRAC_PI_2);
        }
        for &theta in parsed.column("theta_edge").unwrap() {
            assert!(theta <= FRAC_PI_2);
        }
        // caller data untouched
        assert_eq!(snap.x2, vec![0.9, 1.2, 1.5]);
    }

    #[test]
    fn test_missing_field() {
        let mut snap = Snapshot::new(1, 0.0, vec![1.0, 2.0], vec![0.1, 0.2]);
        snap.insert_field(Field::Density, FieldGrid::filled(2, 2, 1.0)).unwrap();
        let err = GridExporter::default()
            .build_table(&snap, &UnitSet::identity())
            .unwrap_err();
        assert!(err.to_string().contains("vx1"));
    }
}
