//! Physical constants in cgs units.

/// Planck constant [erg s]
pub const PLANCK: f64 = 6.62607015e-27;

/// Boltzmann constant [erg/K]
pub const BOLTZMANN: f64 = 1.380649e-16;

/// Nominal solar mass [g]
pub const SOLAR_MASS: f64 = 1.988409870698051e33;

/// One kilo-electronvolt [erg]
pub const KEV: f64 = 1.602176634e-9;
