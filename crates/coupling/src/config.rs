//! Configuration for a coupling run.

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CouplingError;

/// File names and numerical policy for one coupling step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CouplingConfig {
    /// Hydro code definitions header holding the unit scales.
    pub definitions: PathBuf,

    /// Heating/cooling table written by the radiative-transfer code.
    pub heatcool_table: PathBuf,

    /// Output table of rescaled prefactors.
    pub prefactor_table: PathBuf,

    /// Largest allowed change of a prefactor per cycle: the new value stays
    /// within [max_change * prev, prev / max_change].
    pub max_change: f64,

    /// Relative density mismatch above which a row counts as a discrepancy.
    pub density_tolerance: f64,

    /// What to do when `prev_prefactor * rate_coeff * nenh` is zero.
    pub zero_denominator: ZeroDenominatorPolicy,

    /// Which quantity is clamped when updating a prefactor.
    pub prefactor_update: PrefactorUpdate,

    /// Upper colatitude bound of the exported grid [rad].
    pub theta_max: f64,
}

impl Default for CouplingConfig {
    fn default() -> Self {
        Self {
            definitions: PathBuf::from("definitions.h"),
            heatcool_table: PathBuf::from("py_heatcool.dat"),
            prefactor_table: PathBuf::from("prefactors.dat"),
            max_change: 0.9,
            density_tolerance: 1e-6,
            zero_denominator: ZeroDenominatorPolicy::Fail,
            prefactor_update: PrefactorUpdate::Ratio,
            theta_max: FRAC_PI_2,
        }
    }
}

impl CouplingConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("PYLINK_DEFINITIONS") {
            config.definitions = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("PYLINK_HEATCOOL_TABLE") {
            config.heatcool_table = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("PYLINK_PREFACTOR_TABLE") {
            config.prefactor_table = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("PYLINK_MAX_CHANGE") {
            if let Ok(v) = val.parse() {
                config.max_change = v;
            }
        }

        if let Ok(val) = std::env::var("PYLINK_DENSITY_TOLERANCE") {
            if let Ok(v) = val.parse() {
                config.density_tolerance = v;
            }
        }

        if let Ok(val) = std::env::var("PYLINK_ZERO_DENOMINATOR") {
            if let Ok(policy) = val.parse() {
                config.zero_denominator = policy;
            }
        }

        if let Ok(val) = std::env::var("PYLINK_PREFACTOR_UPDATE") {
            if let Ok(update) = val.parse() {
                config.prefactor_update = update;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.max_change > 0.0 && self.max_change <= 1.0) {
            return Err(format!("max_change must be in (0, 1], got {}", self.max_change));
        }

        if !(self.density_tolerance >= 0.0) {
            return Err("density_tolerance must be >= 0".to_string());
        }

        if !(self.theta_max > 0.0) {
            return Err("theta_max must be > 0".to_string());
        }

        Ok(())
    }
}

/// Handling of a vanishing `prev_prefactor * rate_coeff * nenh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroDenominatorPolicy {
    /// Abort the run.
    #[default]
    Fail,
    /// Carry the previous prefactor over unchanged.
    KeepPrevious,
    /// Divide anyway: +inf saturates at the upper bound, -inf at the lower,
    /// 0/0 keeps the previous prefactor.
    Clamp,
}

impl ZeroDenominatorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::KeepPrevious => "keep-previous",
            Self::Clamp => "clamp",
        }
    }
}

impl FromStr for ZeroDenominatorPolicy {
    type Err = CouplingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "keep-previous" | "keep_previous" | "keep" => Ok(Self::KeepPrevious),
            "clamp" => Ok(Self::Clamp),
            other => Err(CouplingError::config(format!(
                "unknown zero-denominator policy '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ZeroDenominatorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quantity bounded to [max_change * prev, prev / max_change].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrefactorUpdate {
    /// The correction ratio `target / (prev * coeff * nenh)` itself.
    #[default]
    Ratio,
    /// The corrected prefactor `prev * ratio`, which stays fixed once the
    /// target matches `prev * coeff * nenh`.
    Scaled,
}

impl PrefactorUpdate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ratio => "ratio",
            Self::Scaled => "scaled",
        }
    }
}

impl FromStr for PrefactorUpdate {
    type Err = CouplingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ratio" => Ok(Self::Ratio),
            "scaled" => Ok(Self::Scaled),
            other => Err(CouplingError::config(format!(
                "unknown prefactor update '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for PrefactorUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CouplingConfig::default();
        config.validate().unwrap();
        assert_eq!(config.max_change, 0.9);
        assert_eq!(config.zero_denominator, ZeroDenominatorPolicy::Fail);
        assert_eq!(config.prefactor_table, PathBuf::from("prefactors.dat"));
    }

    #[test]
    fn test_validate_max_change() {
        let mut config = CouplingConfig::default();
        config.max_change = 0.0;
        assert!(config.validate().is_err());
        config.max_change = 1.5;
        assert!(config.validate().is_err());
        config.max_change = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("clamp".parse::<ZeroDenominatorPolicy>().unwrap(), ZeroDenominatorPolicy::Clamp);
        assert_eq!(
            "Keep-Previous".parse::<ZeroDenominatorPolicy>().unwrap(),
            ZeroDenominatorPolicy::KeepPrevious
        );
        assert!("skip".parse::<ZeroDenominatorPolicy>().is_err());
        assert_eq!("scaled".parse::<PrefactorUpdate>().unwrap(), PrefactorUpdate::Scaled);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: CouplingConfig =
            serde_yaml::from_str("max_change: 0.8\nzero_denominator: keep-previous\n").unwrap();
        assert_eq!(config.max_change, 0.8);
        assert_eq!(config.zero_denominator, ZeroDenominatorPolicy::KeepPrevious);
        assert_eq!(config.density_tolerance, 1e-6);
    }
}
