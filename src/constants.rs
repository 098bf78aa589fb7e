//! Physical constants
//!
//! Process-wide reference values. These are not configurable: every run
//! uses the same numbers so results stay reproducible.

/// Earth's gravitational parameter (GM) in m³/s²
pub const MU_EARTH: f64 = 3.986004418e14;

/// Earth's equatorial radius in meters (spherical Earth model)
pub const R_EARTH: f64 = 6_378_137.0;

/// Earth's rotation rate in rad/s
pub const OMEGA_EARTH: f64 = 7.2921159e-5;

/// Second zonal harmonic (oblateness)
pub const J2: f64 = 1.08262668e-3;

/// Speed of light in m/s
pub const C_LIGHT: f64 = 299_792_458.0;

/// Boltzmann constant in J/K
pub const K_BOLTZMANN: f64 = 1.380649e-23;

pub const SECONDS_PER_DAY: f64 = 86_400.0;
