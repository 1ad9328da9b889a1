//! `<name>.pf` parameter file for the radiative-transfer code.

use std::path::{Path, PathBuf};

use crate::error::CouplingResult;
use crate::params::RunParameters;
use crate::pyfmt::py_float;
use crate::template::{Line, Template};

/// Ionization cycles per radiative-transfer run unless overridden.
pub const DEFAULT_CYCLES: u32 = 2;

/// Values substituted into the `.pf` file.
pub struct PfContext<'a> {
    pub params: &'a RunParameters,
    pub cycles: u32,
    /// Grid table read by the radiative-transfer code
    pub hydro_file: String,
}

fn photons(c: &PfContext) -> String {
    c.params.nphot.to_string()
}

fn cycles(c: &PfContext) -> String {
    c.cycles.to_string()
}

fn mstar(c: &PfContext) -> String {
    py_float(c.params.cent_mass_msol())
}

fn lum_agn(c: &PfContext) -> String {
    py_float(c.params.l_2_10())
}

fn brem_temp(c: &PfContext) -> String {
    py_float(c.params.t_x)
}

fn brem_alpha(c: &PfContext) -> String {
    py_float(c.params.brem_alpha)
}

fn disk_mdot(c: &PfContext) -> String {
    py_float(c.params.disk_mdot_msol_per_year())
}

fn hydro_file(c: &PfContext) -> String {
    c.hydro_file.clone()
}

#[rustfmt::skip]
pub fn template<'a>() -> Template<PfContext<'a>> {
    Template::new(vec![
        Line::literal("System_type(0=star,1=binary,2=agn)", "                    ", "2"),
        Line::literal("Wind_type", "                 ", "3"),
        Line::literal("Coord.system(0=spherical,1=cylindrical,2=spherical_polar,3=cyl_var)", "                    ", "1"),
        Line::literal("Wind.dim.in.x_or_r.direction", "                     ", "30"),
        Line::literal("Wind.dim.in.z_or_theta.direction", "                   ", "30"),
        Line::literal("Number.of.wind.components", " ", "1"),
        Line::literal("disk.type(0=no.disk,1=standard.flat.disk,2=vertically.extended.disk)", " ", "0"),
        Line::literal("Atomic_data", "                         ", "data/standard80"),
        Line::literal("write_atomicdata(0=no,1=yes)", "               ", "0"),
        Line::computed("photons_per_cycle", "                            ", photons),
        Line::computed("Ionization_cycles", "                                ", cycles),
        Line::literal("spectrum_cycles", "                                   ", "0"),
        Line::literal("adjust_grid(0=no,1=yes)", "\t\t\t\t\t\t\t\t", "0"),
        Line::literal("Wind_ionization", " ", "9"),
        Line::literal("Line_transfer", " ", "3"),
        Line::literal("Thermal_balance_options(0=everything.on,1=no.adiabatic)", "                    ", "1"),
        Line::literal("Disk_radiation(y=1)", "                               ", "0"),
        Line::literal("Wind_radiation(y=1)", "                               ", "1"),
        Line::literal("QSO_BH_radiation", "                               ", "1"),
        Line::literal("Rad_type_for_disk(0=bb,1=models)_to_make_wind", "     ", "0"),
        Line::literal("Rad_type_for_agn(0=bb,1=models,3=power_law,4=cloudy_table)_to_make_wind)", "  ", "5"),
        Line::computed("mstar(msol)", "        ", mstar),
        Line::literal("rstar(cm)", "                                     ", "7e+08"),
        Line::literal("tstar", "                                         ", "40000"),
        Line::computed("lum_agn(ergs/s)", " ", lum_agn),
        Line::computed("agn_bremsstrahlung_temp(K)", " ", brem_temp),
        Line::computed("agn_bremsstrahlung_alpha", " ", brem_alpha),
        Line::literal("geometry_for_pl_source", " ", "0"),
        Line::literal("agn_power_law_index", " \t\t\t\t\t\t\t", "0.0"),
        Line::literal("agn_power_law_cutoff (0)", "\t\t\t\t\t\t", "0"),
        Line::literal("Torus(0=no,1=yes)", "\t\t\t\t\t\t\t\t", "0"),
        Line::computed("disk.mdot(msol/yr)", "   ", disk_mdot),
        Line::literal("Disk.illumination.treatment", " ", "0"),
        Line::literal("Disk.temperature.profile(0=standard;1=readin)", "                    ", "0"),
        Line::literal("disk.radmax(cm)", "                             ", "2.4e+10"),
        Line::literal("wind.radmax(cm)", "                               ", "1e+11"),
        Line::literal("wind.t.init", "                                   ", "40000"),
        Line::computed("hydro_file", " ", hydro_file),
        Line::literal("Hydro_thetamax(degrees)", "                        ", "-1"),
        Line::literal("filling_factor(1=smooth,<1=clumped)", "                    ", "1"),
        Line::literal("Rad_type_for_agn(3=power_law,4=cloudy_table)_in_final_spectrum", " ", "3"),
        Line::literal("Rad_type_for_disk(0=bb,1=models,2=uniform)_in_final_spectrum", "                    ", "0"),
        Line::literal("spectrum_wavemin", "                               ", "1450"),
        Line::literal("spectrum_wavemax", "                               ", "1650"),
        Line::literal("no_observers", "                                      ", "4"),
        Line::literal("angle(0=pole)", "                                    ", "10"),
        Line::literal("angle(0=pole)", "                                    ", "30"),
        Line::literal("angle(0=pole)", "                                    ", "60"),
        Line::literal("angle(0=pole)", "                                    ", "80"),
        Line::literal("live.or.die(0).or.extract(anything_else)", "                    ", "1"),
        Line::literal("spec.type(flambda(1),fnu(2),basic(other)", "                    ", "1"),
        Line::literal("Use.standard.care.factors(1=yes)", "\t\t\t\t\t\t", "1"),
        Line::literal("reverb.type", " ", "0"),
        Line::literal("Photon.sampling.approach", "           ", "8"),
        Line::literal("Num.of.frequency.bands(5)", " ", "10"),
        Line::literal("Lowest_energy_to_be_considered(eV)", " ", "1.03333"),
        Line::literal("Highest_energy_to_be_considered(eV)", " ", "50000 "),
        Line::literal("Extra.diagnostics(0=no,1=yes)", "   ", "1"),
        Line::literal("keep_ioncycle_windsaves()", "   ", "1"),
    ])
}

/// File name of the parameter file for run `name`.
pub fn pf_file_name(name: &str) -> String {
    format!("{}.pf", name)
}

/// Render the `.pf` text. `name` doubles as the `hydro_file` entry.
pub fn render_python_pf(name: &str, params: &RunParameters, cycles: u32) -> String {
    template().render(&PfContext {
        params,
        cycles,
        hydro_file: name.to_string(),
    })
}

/// Write `<name>.pf` into `dir`.
pub fn write_python_pf<P: AsRef<Path>>(
    dir: P,
    name: &str,
    params: &RunParameters,
    cycles: u32,
) -> CouplingResult<PathBuf> {
    let path = dir.as_ref().join(pf_file_name(name));
    let ctx = PfContext {
        params,
        cycles,
        hydro_file: name.to_string(),
    };
    template().write(&path, &ctx)?;
    Ok(path)
}
