//! Coupling configuration: environment first, then command-line flags.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use coupling::{CouplingConfig, PrefactorUpdate, ZeroDenominatorPolicy};
use tracing::debug;

/// Command-line values that take precedence over `PYLINK_*` variables.
#[derive(Debug, Default)]
pub struct Overrides {
    pub definitions: Option<PathBuf>,
    pub zero_denominator: Option<String>,
    pub max_change: Option<f64>,
    pub prefactor_update: Option<String>,
}

impl Overrides {
    pub fn apply(&self, mut config: CouplingConfig) -> Result<CouplingConfig> {
        if let Some(path) = &self.definitions {
            config.definitions = path.clone();
        }
        if let Some(policy) = &self.zero_denominator {
            config.zero_denominator = policy.parse::<ZeroDenominatorPolicy>()?;
        }
        if let Some(max_change) = self.max_change {
            config.max_change = max_change;
        }
        if let Some(update) = &self.prefactor_update {
            config.prefactor_update = update.parse::<PrefactorUpdate>()?;
        }
        config.validate().map_err(|e| anyhow!("invalid configuration: {}", e))?;
        Ok(config)
    }
}

/// Build the run configuration.
pub fn load(overrides: &Overrides) -> Result<CouplingConfig> {
    let config = overrides.apply(CouplingConfig::from_env())?;
    debug!(
        max_change = config.max_change,
        zero_denominator = %config.zero_denominator,
        prefactor_update = %config.prefactor_update,
        "Loaded configuration"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = Overrides {
            zero_denominator: Some("clamp".to_string()),
            max_change: Some(0.5),
            ..Overrides::default()
        };
        let config = overrides.apply(CouplingConfig::default()).unwrap();
        assert_eq!(config.zero_denominator, ZeroDenominatorPolicy::Clamp);
        assert_eq!(config.max_change, 0.5);
        assert_eq!(config.prefactor_update, PrefactorUpdate::Ratio);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let overrides = Overrides {
            max_change: Some(1.5),
            ..Overrides::default()
        };
        assert!(overrides.apply(CouplingConfig::default()).is_err());

        let overrides = Overrides {
            zero_denominator: Some("skip".to_string()),
            ..Overrides::default()
        };
        assert!(overrides.apply(CouplingConfig::default()).is_err());
    }
}
