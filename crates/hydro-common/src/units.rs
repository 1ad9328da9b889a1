//! Code-unit scale factors read from the hydro code's definitions file.
//!
//! The definitions file is a C header with lines such as
//! `#define  UNIT_DENSITY  1.0e-12`. Only the second and third
//! whitespace-separated tokens of a line are inspected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HydroError, HydroResult};

pub const UNIT_DENSITY: &str = "UNIT_DENSITY";
pub const UNIT_LENGTH: &str = "UNIT_LENGTH";
pub const UNIT_VELOCITY: &str = "UNIT_VELOCITY";

/// Conversion factors from code units to cgs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitSet {
    /// g/cm^3 per code density unit
    pub density: f64,
    /// cm per code length unit
    pub length: f64,
    /// cm/s per code velocity unit
    pub velocity: f64,
}

impl UnitSet {
    pub fn new(density: f64, length: f64, velocity: f64) -> Self {
        Self {
            density,
            length,
            velocity,
        }
    }

    /// Identity scaling, useful when data is already in cgs.
    pub fn identity() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Read the three unit scales from a definitions file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> HydroResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let units = Self::parse(&text)?;
        debug!(
            path = %path.display(),
            density = units.density,
            length = units.length,
            velocity = units.velocity,
            "Resolved code units"
        );
        Ok(units)
    }

    /// Parse definitions text. Every recognised key must appear at least once;
    /// a later occurrence overrides an earlier one.
    pub fn parse(text: &str) -> HydroResult<Self> {
        let mut density = None;
        let mut length = None;
        let mut velocity = None;

        for line in text.lines() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < 2 {
                continue;
            }

            let slot = match tokens[1] {
                UNIT_DENSITY => &mut density,
                UNIT_LENGTH => &mut length,
                UNIT_VELOCITY => &mut velocity,
                _ => continue,
            };

            let raw = tokens
                .get(2)
                .ok_or_else(|| HydroError::invalid_value(tokens[1], "missing value"))?;
            let value: f64 = raw
                .parse()
                .map_err(|_| HydroError::invalid_value(tokens[1], format!("'{}' is not a number", raw)))?;
            *slot = Some(value);
        }

        Ok(Self {
            density: density.ok_or_else(|| HydroError::MissingUnit(UNIT_DENSITY.to_string()))?,
            length: length.ok_or_else(|| HydroError::MissingUnit(UNIT_LENGTH.to_string()))?,
            velocity: velocity.ok_or_else(|| HydroError::MissingUnit(UNIT_VELOCITY.to_string()))?,
        })
    }
}
