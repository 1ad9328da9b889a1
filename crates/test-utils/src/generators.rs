//! Generators for synthetic grids, snapshots and dbl output directories.
//!
//! Values follow simple closed-form patterns so tests can recompute the
//! expected number for any cell.

use std::fs;
use std::io;
use std::path::Path;

use hydro_common::{Field, FieldGrid, Snapshot};

/// Centers of `n` cells whose widths grow as `d0 * ratio^k` from `first_edge`.
///
/// # Example
///
/// ```
/// use test_utils::geometric_centers;
///
/// let centers = geometric_centers(0.0, 1.0, 2.0, 3);
/// assert_eq!(centers, vec![0.5, 2.0, 5.0]);
/// ```
pub fn geometric_centers(first_edge: f64, d0: f64, ratio: f64, n: usize) -> Vec<f64> {
    geometric_edges(first_edge, d0, ratio, n)
        .windows(2)
        .map(|w| 0.5 * (w[0] + w[1]))
        .collect()
}

/// The `n + 1` edges matching [`geometric_centers`].
pub fn geometric_edges(first_edge: f64, d0: f64, ratio: f64, n: usize) -> Vec<f64> {
    let mut edges = Vec::with_capacity(n + 1);
    let mut edge = first_edge;
    let mut width = d0;
    edges.push(edge);
    for _ in 0..n {
        edge += width;
        width *= ratio;
        edges.push(edge);
    }
    edges
}

/// Electron density used by [`synthetic_snapshot`].
pub fn synthetic_ne(i: usize, j: usize) -> f64 {
    1.0e8 * (1.0 + i as f64) / (1.0 + j as f64)
}

/// Ion density used by [`synthetic_snapshot`].
pub fn synthetic_nh(i: usize, j: usize) -> f64 {
    0.8e8 * (1.0 + i as f64) / (1.0 + j as f64)
}

/// Code-unit density used by [`synthetic_snapshot`].
pub fn synthetic_rho(i: usize, j: usize) -> f64 {
    1.0 / (1.0 + i as f64 + 0.5 * j as f64)
}

/// Prefactor used by [`synthetic_snapshot`] for every process.
pub fn synthetic_prefactor(i: usize, j: usize) -> f64 {
    1.0 + 0.01 * (i + 2 * j) as f64
}

/// Rate coefficient used by [`synthetic_snapshot`]; `process` is 0..5.
pub fn synthetic_coefficient(process: usize, i: usize, j: usize) -> f64 {
    1.0e-23 * (process as f64 + 1.0) * (1.0 + 0.1 * i as f64 + 0.2 * j as f64)
}

/// A complete snapshot on a geometric radial grid and a uniform colatitude
/// grid, with every [`Field`] populated.
pub fn synthetic_snapshot(nx1: usize, nx2: usize) -> Snapshot {
    let x1 = geometric_centers(1.0, 0.1, 1.05, nx1);
    let x2 = geometric_centers(0.0, 1.2 / nx2 as f64, 1.0, nx2);
    let mut snap = Snapshot::new(1, 0.0, x1, x2);

    let rate_fields = [
        (Field::CompHeat, Field::CompHeatPre),
        (Field::CompCool, Field::CompCoolPre),
        (Field::LineCool, Field::LineCoolPre),
        (Field::BremCool, Field::BremCoolPre),
        (Field::XrayHeat, Field::XrayHeatPre),
    ];

    let mut insert = |field: Field, grid: FieldGrid| {
        snap.insert_field(field, grid)
            .expect("synthetic field shape matches grid");
    };

    insert(Field::Vx1, FieldGrid::from_fn(nx1, nx2, |i, j| 1.0 + i as f64 - 0.1 * j as f64));
    insert(Field::Vx2, FieldGrid::from_fn(nx1, nx2, |i, j| 0.01 * (i * j) as f64));
    insert(Field::Vx3, FieldGrid::from_fn(nx1, nx2, |i, _| 0.5 / (1.0 + i as f64)));
    insert(Field::Density, FieldGrid::from_fn(nx1, nx2, synthetic_rho));
    insert(Field::Temperature, FieldGrid::from_fn(nx1, nx2, |i, j| 1.0e5 * (1.0 + i as f64 + j as f64)));
    insert(Field::ElectronDensity, FieldGrid::from_fn(nx1, nx2, synthetic_ne));
    insert(Field::IonDensity, FieldGrid::from_fn(nx1, nx2, synthetic_nh));
    for (process, (coeff, pre)) in rate_fields.into_iter().enumerate() {
        insert(coeff, FieldGrid::from_fn(nx1, nx2, |i, j| synthetic_coefficient(process, i, j)));
        insert(pre, FieldGrid::from_fn(nx1, nx2, synthetic_prefactor));
    }

    snap
}

/// One variable block of a dbl data file.
#[derive(Debug, Clone, PartialEq)]
pub struct DblVariable {
    pub name: String,
    /// `nx1 * nx2` values, x1 fastest
    pub values: Vec<f64>,
}

impl DblVariable {
    pub fn from_fn(name: &str, nx1: usize, nx2: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        let mut values = Vec::with_capacity(nx1 * nx2);
        for j in 0..nx2 {
            for i in 0..nx1 {
                values.push(f(i, j));
            }
        }
        Self {
            name: name.to_string(),
            values,
        }
    }
}

/// Write `grid.out`, `dbl.out` and `data.NNNN.dbl` (little endian) for a
/// 2-D grid with the given edges.
pub fn write_dbl_output(
    dir: &Path,
    cycle: u32,
    time: f64,
    x1_edges: &[f64],
    x2_edges: &[f64],
    variables: &[DblVariable],
) -> io::Result<()> {
    fs::create_dir_all(dir)?;

    let mut grid = String::from("# ******************************************************\n# Grid File\n# DIMENSIONS: 2\n# GEOMETRY:   SPHERICAL\n# ******************************************************\n");
    for edges in [x1_edges, x2_edges, &[0.0, 1.0][..]] {
        grid.push_str(&format!("{}\n", edges.len() - 1));
        for (k, w) in edges.windows(2).enumerate() {
            grid.push_str(&format!(" {}  {:.17e}  {:.17e}\n", k + 1, w[0], w[1]));
        }
    }
    fs::write(dir.join("grid.out"), grid)?;

    let names: Vec<&str> = variables.iter().map(|v| v.name.as_str()).collect();
    let log = format!(
        "{} {:e} 1.0e-04 {} single_file little {}\n",
        cycle,
        time,
        cycle * 10,
        names.join(" ")
    );
    fs::write(dir.join("dbl.out"), log)?;

    let mut raw = Vec::new();
    for var in variables {
        for value in &var.values {
            raw.extend_from_slice(&value.to_le_bytes());
        }
    }
    fs::write(dir.join(format!("data.{:04}.dbl", cycle)), raw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometric_edges() {
        assert_eq!(geometric_edges(1.0, 1.0, 2.0, 3), vec![1.0, 2.0, 4.0, 8.0]);
    }

    #[test]
    fn test_synthetic_snapshot_complete() {
        let snap = synthetic_snapshot(4, 3);
        snap.require(&Field::ALL).unwrap();
        assert_eq!(snap.nx1(), 4);
        assert_eq!(snap.nx2(), 3);
    }

    #[test]
    fn test_write_dbl_output_files() {
        let dir = tempfile::tempdir().unwrap();
        let vars = [DblVariable::from_fn("rho", 2, 2, |i, j| (i + j) as f64)];
        write_dbl_output(dir.path(), 7, 1.0, &[1.0, 2.0, 3.0], &[0.0, 0.5, 1.0], &vars).unwrap();
        assert_eq!(fs::metadata(dir.path().join("data.0007.dbl")).unwrap().len(), 32);
        assert!(fs::read_to_string(dir.path().join("dbl.out")).unwrap().starts_with("7 "));
    }
}
