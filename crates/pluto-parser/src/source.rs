//! [`SnapshotSource`] over a directory of dbl output.

use std::fs;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use hydro_common::{Field, FieldGrid, HydroResult, Snapshot, SnapshotSource};
use tracing::{debug, info};

use crate::dbl::{find_record, read_variables};
use crate::error::PlutoResult;
use crate::grid::PlutoGrid;

pub const GRID_FILE: &str = "grid.out";
pub const LOG_FILE: &str = "dbl.out";

/// Loads snapshots from `grid.out`, `dbl.out` and `data.NNNN.dbl` in one
/// directory.
#[derive(Debug, Clone)]
pub struct PlutoDblSource {
    dir: PathBuf,
}

impl PlutoDblSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load_snapshot(&self, cycle: u32) -> PlutoResult<Snapshot> {
        let grid = PlutoGrid::read(self.dir.join(GRID_FILE))?;
        let record = find_record(self.dir.join(LOG_FILE), cycle)?;
        let data_path = self.dir.join(record.data_file_name());
        let data = Bytes::from(fs::read(&data_path)?);

        let (nx1, nx2) = (grid.x1.len(), grid.x2.len());
        let mut snapshot = Snapshot::new(cycle, record.time, grid.x1.centers(), grid.x2.centers());

        for (name, values) in read_variables(data, &record, &grid)? {
            match name.parse::<Field>() {
                Ok(field) => {
                    snapshot.insert_field(field, FieldGrid::new(nx1, nx2, values)?)?;
                }
                Err(_) => debug!(var = %name, "Skipping variable not used by the coupling"),
            }
        }

        info!(
            path = %data_path.display(),
            cycle,
            time = record.time,
            nx1,
            nx2,
            "Loaded snapshot"
        );
        Ok(snapshot)
    }
}

impl SnapshotSource for PlutoDblSource {
    fn load(&self, cycle: u32) -> HydroResult<Snapshot> {
        Ok(self.load_snapshot(cycle)?)
    }
}
