//! Reader for the hydro code's `dbl` output in `single_file` mode.
//!
//! An output directory holds three kinds of files:
//!
//! - `grid.out`: cell boundaries of every dimension
//! - `dbl.out`: one line per output cycle listing time, byte order and the
//!   variables stored in the data file
//! - `data.NNNN.dbl`: raw f64 values, one block of `nx1 * nx2 * nx3` per
//!   variable, x1 varying fastest
//!
//! [`PlutoDblSource`] turns these into [`hydro_common::Snapshot`]s.

pub mod dbl;
pub mod error;
pub mod grid;
pub mod source;

pub use dbl::{Endian, OutputRecord};
pub use error::{PlutoError, PlutoResult};
pub use grid::{AxisCells, PlutoGrid};
pub use source::PlutoDblSource;
