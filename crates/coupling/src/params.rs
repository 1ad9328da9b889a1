//! Physical and numerical run parameters shared by both parameter files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::SOLAR_MASS;
use crate::error::{CouplingError, CouplingResult};
use crate::spectrum::luminosity_2_10;

/// Run parameters, in cgs unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    /// Inner radius (code units)
    pub r_min: f64,
    /// Outer radius (code units)
    pub r_max: f64,
    /// Radial cell count
    pub n_r: usize,
    /// Minimum colatitude [rad]
    pub t_min: f64,
    /// Maximum colatitude [rad]
    pub t_max: f64,
    /// Colatitude cell count
    pub n_t: usize,

    /// Density at `r_0` (code units)
    pub rho_0: f64,
    /// Power-law index of the initial density profile
    pub rho_alpha: f64,
    /// Reference radius of the density profile
    pub r_0: f64,

    /// Central mass [g]
    pub cent_mass: f64,
    /// Disk accretion rate [g/s]
    pub disk_mdot: f64,
    /// Bolometric X-ray luminosity [erg/s]
    pub l_x: f64,
    /// X-ray (bremsstrahlung) temperature [K]
    pub t_x: f64,
    /// Spectral index of the bremsstrahlung source
    #[serde(default)]
    pub brem_alpha: f64,
    /// 2-10 keV luminosity [erg/s]; derived from `l_x` when absent
    #[serde(default)]
    pub l_2_10: Option<f64>,
    /// Disk truncation radius
    pub disk_trunc_rad: f64,
    /// Mean molecular weight
    pub mu: f64,

    /// Photons per radiative-transfer cycle
    pub nphot: u64,
}

impl RunParameters {
    /// Load parameters from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> CouplingResult<Self> {
        let text = fs::read_to_string(path)?;
        let params: Self = serde_yaml::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }

    /// Validate ranges and counts.
    pub fn validate(&self) -> CouplingResult<()> {
        if self.n_r == 0 || self.n_t == 0 {
            return Err(CouplingError::config("n_r and n_t must be > 0"));
        }
        if !(self.r_min < self.r_max) {
            return Err(CouplingError::config(format!(
                "r_min ({}) must be less than r_max ({})",
                self.r_min, self.r_max
            )));
        }
        if !(self.t_min < self.t_max) {
            return Err(CouplingError::config(format!(
                "t_min ({}) must be less than t_max ({})",
                self.t_min, self.t_max
            )));
        }
        for (name, value) in [
            ("cent_mass", self.cent_mass),
            ("l_x", self.l_x),
            ("t_x", self.t_x),
            ("mu", self.mu),
        ] {
            if !(value > 0.0) {
                return Err(CouplingError::config(format!("{} must be > 0, got {}", name, value)));
            }
        }
        if self.nphot == 0 {
            return Err(CouplingError::config("nphot must be > 0"));
        }
        Ok(())
    }

    /// Central mass in solar masses.
    pub fn cent_mass_msol(&self) -> f64 {
        self.cent_mass / SOLAR_MASS
    }

    /// Accretion rate in solar masses per year.
    ///
    /// Multiplied out one factor at a time so the last digit printed into
    /// the `.pf` file does not depend on how the year is folded.
    pub fn disk_mdot_msol_per_year(&self) -> f64 {
        self.disk_mdot / SOLAR_MASS * 60.0 * 60.0 * 24.0 * 365.25
    }

    /// 2-10 keV luminosity, given or derived from the bremsstrahlung spectrum.
    pub fn l_2_10(&self) -> f64 {
        self.l_2_10
            .unwrap_or_else(|| luminosity_2_10(self.l_x, self.t_x, self.brem_alpha))
    }
}
