//! Snapshot of the hydro grid at one output cycle.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HydroError, HydroResult};

/// Per-cell quantities the coupling reads from the hydro output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Radial velocity
    Vx1,
    /// Polar velocity
    Vx2,
    /// Azimuthal velocity
    Vx3,
    Density,
    Temperature,
    /// Electron number density
    ElectronDensity,
    /// Hydrogen (ion) number density
    IonDensity,
    /// Current rate coefficients
    CompHeat,
    CompCool,
    LineCool,
    BremCool,
    XrayHeat,
    /// Prefactors used for the current cycle
    CompHeatPre,
    CompCoolPre,
    LineCoolPre,
    BremCoolPre,
    XrayHeatPre,
}

impl Field {
    pub const ALL: [Field; 17] = [
        Field::Vx1,
        Field::Vx2,
        Field::Vx3,
        Field::Density,
        Field::Temperature,
        Field::ElectronDensity,
        Field::IonDensity,
        Field::CompHeat,
        Field::CompCool,
        Field::LineCool,
        Field::BremCool,
        Field::XrayHeat,
        Field::CompHeatPre,
        Field::CompCoolPre,
        Field::LineCoolPre,
        Field::BremCoolPre,
        Field::XrayHeatPre,
    ];

    /// Variable name used in the hydro code's output.
    pub fn var_name(&self) -> &'static str {
        match self {
            Field::Vx1 => "vx1",
            Field::Vx2 => "vx2",
            Field::Vx3 => "vx3",
            Field::Density => "rho",
            Field::Temperature => "T",
            Field::ElectronDensity => "ne",
            Field::IonDensity => "nh",
            Field::CompHeat => "comp_h",
            Field::CompCool => "comp_c",
            Field::LineCool => "line_c",
            Field::BremCool => "brem_c",
            Field::XrayHeat => "xray_h",
            Field::CompHeatPre => "comp_h_pre",
            Field::CompCoolPre => "comp_c_pre",
            Field::LineCoolPre => "line_c_pre",
            Field::BremCoolPre => "brem_c_pre",
            Field::XrayHeatPre => "xray_h_pre",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.var_name())
    }
}

impl FromStr for Field {
    type Err = HydroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.var_name() == s)
            .ok_or_else(|| HydroError::FieldNotFound(s.to_string()))
    }
}

/// A 2-D field stored with the first (radial) index varying fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGrid {
    nx1: usize,
    nx2: usize,
    data: Vec<f64>,
}

impl FieldGrid {
    /// Wrap flat data of length `nx1 * nx2`, x1 fastest.
    pub fn new(nx1: usize, nx2: usize, data: Vec<f64>) -> HydroResult<Self> {
        if data.len() != nx1 * nx2 {
            return Err(HydroError::ShapeMismatch(format!(
                "expected {} x {} = {} values, got {}",
                nx1,
                nx2,
                nx1 * nx2,
                data.len()
            )));
        }
        Ok(Self { nx1, nx2, data })
    }

    /// Field of constant value.
    pub fn filled(nx1: usize, nx2: usize, value: f64) -> Self {
        Self {
            nx1,
            nx2,
            data: vec![value; nx1 * nx2],
        }
    }

    /// Build a field from a function of the cell indices.
    pub fn from_fn(nx1: usize, nx2: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(nx1 * nx2);
        for j in 0..nx2 {
            for i in 0..nx1 {
                data.push(f(i, j));
            }
        }
        Self { nx1, nx2, data }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nx1, self.nx2)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.nx1 || j >= self.nx2 {
            return None;
        }
        Some(self.data[j * self.nx1 + i])
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) -> bool {
        if i >= self.nx1 || j >= self.nx2 {
            return false;
        }
        self.data[j * self.nx1 + i] = value;
        true
    }

    /// Raw values, x1 fastest.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Grid state of one output cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Output index the snapshot was loaded from
    pub cycle: u32,
    /// Simulation time in code units
    pub time: f64,
    /// Radial cell centers (code units)
    pub x1: Vec<f64>,
    /// Colatitude cell centers (radians)
    pub x2: Vec<f64>,
    fields: HashMap<Field, FieldGrid>,
}

impl Snapshot {
    pub fn new(cycle: u32, time: f64, x1: Vec<f64>, x2: Vec<f64>) -> Self {
        Self {
            cycle,
            time,
            x1,
            x2,
            fields: HashMap::new(),
        }
    }

    pub fn nx1(&self) -> usize {
        self.x1.len()
    }

    pub fn nx2(&self) -> usize {
        self.x2.len()
    }

    /// Attach a field, checking that its shape matches the coordinates.
    pub fn insert_field(&mut self, field: Field, grid: FieldGrid) -> HydroResult<()> {
        if grid.shape() != (self.nx1(), self.nx2()) {
            return Err(HydroError::ShapeMismatch(format!(
                "field '{}' has shape {:?}, snapshot is ({}, {})",
                field,
                grid.shape(),
                self.nx1(),
                self.nx2()
            )));
        }
        self.fields.insert(field, grid);
        Ok(())
    }

    /// Builder-style variant of [`Snapshot::insert_field`].
    pub fn with_field(mut self, field: Field, grid: FieldGrid) -> HydroResult<Self> {
        self.insert_field(field, grid)?;
        Ok(self)
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn field(&self, field: Field) -> HydroResult<&FieldGrid> {
        self.fields
            .get(&field)
            .ok_or_else(|| HydroError::FieldNotFound(field.to_string()))
    }

    pub fn field_mut(&mut self, field: Field) -> HydroResult<&mut FieldGrid> {
        self.fields
            .get_mut(&field)
            .ok_or_else(|| HydroError::FieldNotFound(field.to_string()))
    }

    /// Value of `field` at cell (i, j).
    pub fn value(&self, field: Field, i: usize, j: usize) -> HydroResult<f64> {
        let grid = self.field(field)?;
        grid.get(i, j).ok_or_else(|| {
            let (nx1, nx2) = grid.shape();
            HydroError::IndexOutOfBounds {
                field: field.to_string(),
                i,
                j,
                nx1,
                nx2,
            }
        })
    }

    /// Fail early if any of `fields` is missing.
    pub fn require(&self, fields: &[Field]) -> HydroResult<()> {
        for field in fields {
            self.field(*field)?;
        }
        Ok(())
    }
}

/// Anything that can produce snapshots by output index.
pub trait SnapshotSource {
    fn load(&self, cycle: u32) -> HydroResult<Snapshot>;
}

impl<S: SnapshotSource + ?Sized> SnapshotSource for &S {
    fn load(&self, cycle: u32) -> HydroResult<Snapshot> {
        (**self).load(cycle)
    }
}

/// Snapshots held in memory, keyed by cycle.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    snapshots: HashMap<u32, Snapshot>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, snapshot: Snapshot) {
        self.snapshots.insert(snapshot.cycle, snapshot);
    }
}

impl SnapshotSource for InMemorySource {
    fn load(&self, cycle: u32) -> HydroResult<Snapshot> {
        self.snapshots
            .get(&cycle)
            .cloned()
            .ok_or_else(|| HydroError::source_error(format!("no snapshot for cycle {}", cycle)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_snapshot() -> Snapshot {
        Snapshot::new(3, 0.0, vec![1.0, 2.0], vec![0.1, 0.2, 0.3])
    }

    #[test]
    fn test_field_name_roundtrip() {
        for field in Field::ALL {
            assert_eq!(field.var_name().parse::<Field>().unwrap(), field);
        }
        assert!("pressure".parse::<Field>().is_err());
    }

    #[test]
    fn test_field_grid_layout() {
        let grid = FieldGrid::from_fn(2, 3, |i, j| (i * 10 + j) as f64);
        assert_eq!(grid.as_slice(), &[0.0, 10.0, 1.0, 11.0, 2.0, 12.0]);
        assert_eq!(grid.get(1, 2), Some(12.0));
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn test_field_grid_shape_check() {
        assert!(FieldGrid::new(2, 2, vec![0.0; 3]).is_err());
    }

    #[test]
    fn test_insert_wrong_shape() {
        let mut snap = small_snapshot();
        let err = snap
            .insert_field(Field::Density, FieldGrid::filled(3, 2, 1.0))
            .unwrap_err();
        assert!(matches!(err, HydroError::ShapeMismatch(_)));
    }

    #[test]
    fn test_value_out_of_bounds() {
        let snap = small_snapshot()
            .with_field(Field::Density, FieldGrid::filled(2, 3, 1.0))
            .unwrap();
        assert_eq!(snap.value(Field::Density, 1, 2).unwrap(), 1.0);
        assert!(matches!(
            snap.value(Field::Density, 2, 0),
            Err(HydroError::IndexOutOfBounds { i: 2, j: 0, .. })
        ));
        assert!(matches!(
            snap.value(Field::Temperature, 0, 0),
            Err(HydroError::FieldNotFound(_))
        ));
    }

    #[test]
    fn test_in_memory_source() {
        let mut source = InMemorySource::new();
        source.insert(small_snapshot());
        assert_eq!(source.load(3).unwrap().nx2(), 3);
        assert!(source.load(4).is_err());
    }
}
