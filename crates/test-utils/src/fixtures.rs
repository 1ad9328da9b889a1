//! Common fixtures for coupling tests.

use std::io;
use std::path::{Path, PathBuf};

/// Definitions header with the unit lines embedded among unrelated defines.
pub const DEFINITIONS_H: &str = "\
#define  PHYSICS                        HD
#define  DIMENSIONS                     2
#define  GEOMETRY                       SPHERICAL
#define  NTRACER                        0
#define  USER_DEF_PARAMETERS            10

/* -- user-defined symbolic constants -- */

#define  UNIT_DENSITY                   1.0e-12
#define  UNIT_LENGTH                    1.0e10
#define  UNIT_VELOCITY                  1.0e8

/* [End of user-defined constants] */
";

/// Column names of the heat/cool table produced by the radiative-transfer code.
pub const HEATCOOL_COLUMNS: [&str; 10] = [
    "i",
    "j",
    "rcen",
    "thetacen",
    "rho",
    "heat_comp",
    "cool_comp",
    "cool_lines",
    "cool_ff",
    "heat_xray",
];

/// Write a definitions file with the given unit scales into `dir`.
pub fn write_definitions(dir: &Path, density: f64, length: f64, velocity: f64) -> io::Result<PathBuf> {
    let path = dir.join("definitions.h");
    let text = format!(
        "#define  PHYSICS  HD\n#define  UNIT_DENSITY  {:e}\n#define  UNIT_LENGTH  {:e}\n#define  UNIT_VELOCITY  {:e}\n",
        density, length, velocity
    );
    std::fs::write(&path, text)?;
    Ok(path)
}

/// One row of a heat/cool table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatCoolFixtureRow {
    pub i: usize,
    pub j: usize,
    pub rcen: f64,
    pub thetacen: f64,
    pub rho: f64,
    pub heat_comp: f64,
    pub cool_comp: f64,
    pub cool_lines: f64,
    pub cool_ff: f64,
    pub heat_xray: f64,
}

/// Render rows in the radiative-transfer code's table layout.
pub fn heatcool_table_text(rows: &[HeatCoolFixtureRow]) -> String {
    let mut text = String::from("# heating and cooling rates per cell\n");
    text.push_str(&HEATCOOL_COLUMNS.join(" "));
    text.push('\n');
    for r in rows {
        text.push_str(&format!(
            "{} {} {:e} {:e} {:e} {:e} {:e} {:e} {:e} {:e}\n",
            r.i, r.j, r.rcen, r.thetacen, r.rho, r.heat_comp, r.cool_comp, r.cool_lines, r.cool_ff, r.heat_xray
        ));
    }
    text
}

/// Write a heat/cool table into `dir` as `py_heatcool.dat`.
pub fn write_heatcool_table(dir: &Path, rows: &[HeatCoolFixtureRow]) -> io::Result<PathBuf> {
    let path = dir.join("py_heatcool.dat");
    std::fs::write(&path, heatcool_table_text(rows))?;
    Ok(path)
}
