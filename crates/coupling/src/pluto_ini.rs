//! `pluto.ini` for the hydro solver.

use std::path::{Path, PathBuf};

use crate::error::CouplingResult;
use crate::params::RunParameters;
use crate::pyfmt::py_float;
use crate::template::{Line, Template};

pub const PLUTO_INI: &str = "pluto.ini";

/// Values substituted into `pluto.ini`.
pub struct PlutoIniContext<'a> {
    pub params: &'a RunParameters,
    /// Simulation stop time (code units)
    pub tstop: f64,
}

fn radial_grid(c: &PlutoIniContext) -> String {
    format!(
        "1 {} {} r {} 1.02",
        py_float(c.params.r_min),
        c.params.n_r,
        py_float(c.params.r_max)
    )
}

fn angular_grid(c: &PlutoIniContext) -> String {
    format!(
        "1 {} {} r {} 0.95",
        py_float(c.params.t_min),
        c.params.n_t,
        py_float(c.params.t_max)
    )
}

fn tstop(c: &PlutoIniContext) -> String {
    py_float(c.tstop)
}

fn rho_0(c: &PlutoIniContext) -> String {
    py_float(c.params.rho_0)
}

fn rho_alpha(c: &PlutoIniContext) -> String {
    py_float(c.params.rho_alpha)
}

fn r_0(c: &PlutoIniContext) -> String {
    py_float(c.params.r_0)
}

fn cent_mass(c: &PlutoIniContext) -> String {
    py_float(c.params.cent_mass)
}

fn disk_mdot(c: &PlutoIniContext) -> String {
    py_float(c.params.disk_mdot)
}

fn l_x(c: &PlutoIniContext) -> String {
    py_float(c.params.l_x)
}

fn t_x(c: &PlutoIniContext) -> String {
    py_float(c.params.t_x)
}

fn disk_trunc_rad(c: &PlutoIniContext) -> String {
    py_float(c.params.disk_trunc_rad)
}

fn mu(c: &PlutoIniContext) -> String {
    py_float(c.params.mu)
}

/// The `pluto.ini` layout. `[Static Grid Output]` declares the user
/// variables read back by the rate rescaler.
#[rustfmt::skip]
pub fn template<'a>() -> Template<PlutoIniContext<'a>> {
    Template::new(vec![
        Line::Section("Grid"),
        Line::Blank,
        Line::computed("X1-grid", " ", radial_grid),
        Line::computed("X2-grid", " ", angular_grid),
        Line::literal("X3-grid", " ", "1    0.0    1      u    1.0"),
        Line::Blank,
        Line::Section("Chombo Refinement"),
        Line::Blank,
        Line::literal("Levels", "           ", "4"),
        Line::literal("Ref_ratio", "        ", "2 2 2 2 2"),
        Line::literal("Regrid_interval", "  ", "2 2 2 2 "),
        Line::literal("Refine_thresh", "    ", "0.3"),
        Line::literal("Tag_buffer_size", "  ", "3"),
        Line::literal("Block_factor", "     ", "8"),
        Line::literal("Max_grid_size", "    ", "64"),
        Line::literal("Fill_ratio", "       ", "0.75"),
        Line::Blank,
        Line::Section("Time"),
        Line::Blank,
        Line::literal("CFL", "              ", "0.4"),
        Line::literal("CFL_max_var", "      ", "1.1"),
        Line::computed("tstop", "            ", tstop),
        Line::literal("first_dt", "         ", "1e-4"),
        Line::Blank,
        Line::Section("Solver"),
        Line::Blank,
        Line::literal("Solver", "         ", "tvdlf"),
        Line::Blank,
        Line::Section("Boundary"),
        Line::Blank,
        Line::literal("X1-beg", "        ", "outflow"),
        Line::literal("X1-end", "        ", "outflow"),
        Line::literal("X2-beg", "        ", "axisymmetric"),
        Line::literal("X2-end", "        ", "reflective"),
        Line::literal("X3-beg", "        ", "outflow"),
        Line::literal("X3-end", "        ", "outflow"),
        Line::Blank,
        Line::Section("Static Grid Output"),
        Line::Blank,
        Line::literal("uservar", "    ", "14    XI T comp_h comp_c line_c brem_c xray_h comp_h_pre comp_c_pre line_c_pre brem_c_pre xray_h_pre ne nh"),
        Line::literal("dbl", "        ", "1000000000000   -1   single_file"),
        Line::literal("flt", "       ", "-1.0  -1   single_file"),
        Line::literal("vtk", "       ", "-1.0  -1   single_file"),
        Line::literal("dbl.h5", "    ", "-1.0  -1"),
        Line::literal("flt.h5", "    ", "-1.0  -1"),
        Line::literal("tab", "       ", "-1.0  -1   "),
        Line::literal("ppm", "       ", "-1.0  -1   "),
        Line::literal("png", "       ", "-1.0  -1"),
        Line::literal("log", "        ", "1000"),
        Line::literal("analysis", "  ", "-1.0  -1"),
        Line::Blank,
        Line::Section("Chombo HDF5 output"),
        Line::Blank,
        Line::literal("Checkpoint_interval", "  ", "-1.0  0"),
        Line::literal("Plot_interval", "         ", "1.0  0 "),
        Line::Blank,
        Line::Section("Parameters"),
        Line::Blank,
        Line::computed("RHO_0", "                       ", rho_0),
        Line::computed("RHO_ALPHA", "                   ", rho_alpha),
        Line::computed("R_0", "                         ", r_0),
        Line::computed("CENT_MASS", "                   ", cent_mass),
        Line::computed("DISK_MDOT", "                   ", disk_mdot),
        Line::literal("CISO", "                        ", "1e10  "),
        Line::computed("L_x", "                         ", l_x),
        Line::computed("T_x", "                         ", t_x),
        Line::computed("DISK_TRUNC_RAD", "              ", disk_trunc_rad),
        Line::computed("MU", "                          ", mu),
    ])
}

/// Render `pluto.ini` text.
pub fn render_pluto_ini(params: &RunParameters, tstop: f64) -> String {
    template().render(&PlutoIniContext { params, tstop })
}

/// Write `pluto.ini` into `dir`.
pub fn write_pluto_ini<P: AsRef<Path>>(
    dir: P,
    params: &RunParameters,
    tstop: f64,
) -> CouplingResult<PathBuf> {
    let path = dir.as_ref().join(PLUTO_INI);
    template().write(&path, &PlutoIniContext { params, tstop })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::tests::sample;

    #[test]
    fn test_sections_in_order() {
        let text = render_pluto_ini(&sample(), 10.0);
        let sections: Vec<&str> = text.lines().filter(|l| l.starts_with('[')).collect();
        assert_eq!(
            sections,
            vec![
                "[Grid]",
                "[Chombo Refinement]",
                "[Time]",
                "[Solver]",
                "[Boundary]",
                "[Static Grid Output]",
                "[Chombo HDF5 output]",
                "[Parameters]",
            ]
        );
    }

    #[test]
    fn test_substituted_lines() {
        let text = render_pluto_ini(&sample(), 1000.0);
        assert!(text.starts_with("[Grid]\n\nX1-grid 1 1.0 128 r 100.0 1.02\n"));
        assert!(text.contains("X2-grid 1 0.0 96 r 1.57079632679 0.95\n"));
        assert!(text.contains("tstop            1000.0\n"));
        assert!(text.contains("\nMU                          0.6\n"));
        assert!(text.contains("\nDISK_MDOT                   1e+18\n"));
        assert!(text.contains("\nCISO                        1e10  \n"));
    }

    #[test]
    fn test_matches_reference_file() {
        let expected = include_str!("../tests/golden/pluto.ini");
        let text = render_pluto_ini(&sample(), 1000.0);
        for (k, (got, want)) in text.lines().zip(expected.lines()).enumerate() {
            assert_eq!(got, want, "line {}", k + 1);
        }
        assert_eq!(text, expected);
    }

    #[test]
    fn test_template_lookup() {
        let params = sample();
        let ctx = PlutoIniContext {
            params: &params,
            tstop: 5.0,
        };
        let t = template();
        assert_eq!(t.value("Solver", &ctx).as_deref(), Some("tvdlf"));
        assert_eq!(t.value("L_x", &ctx).as_deref(), Some("1e+37"));
        assert_eq!(t.value("X2-end", &ctx).as_deref(), Some("reflective"));
    }

    #[test]
    fn test_write_pluto_ini() {
        let dir = tempfile::tempdir().unwrap();
        let params = sample();
        let path = write_pluto_ini(dir.path(), &params, 2.5).unwrap();
        assert_eq!(path.file_name().unwrap(), PLUTO_INI);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, render_pluto_ini(&params, 2.5));
    }
}
