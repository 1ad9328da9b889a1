//! Whitespace-separated text tables.
//!
//! Both codes in the coupling exchange plain text tables: an optional block
//! of `#` comment lines, one header line naming the columns, then one row per
//! line. Columns are written with printf-style formats so the files match
//! what the radiative-transfer code's reader expects byte for byte.

pub mod error;
pub mod format;
pub mod reader;
pub mod writer;

pub use error::{TableError, TableResult};
pub use format::{Column, ColumnFormat};
pub use reader::AsciiTable;
pub use writer::{atomic_write, TableWriter};
