//! Common types shared by the hydro/radiative-transfer coupling crates.

pub mod error;
pub mod grid;
pub mod snapshot;
pub mod units;

pub use error::{HydroError, HydroResult};
pub use grid::{reconstruct_edges, AxisBounds, ReconstructedAxis};
pub use snapshot::{Field, FieldGrid, InMemorySource, Snapshot, SnapshotSource};
pub use units::UnitSet;
