//! Walker-pattern constellation generation
//!
//! Simplified Walker pattern: planes evenly spaced in RAAN over a full
//! circle, satellites evenly phased in true anomaly within each plane, no
//! inter-plane phasing offset. All satellites share radius, inclination,
//! zero eccentricity and zero argument of perigee.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::elements::ClassicalOrbitalElements;
use crate::constants::R_EARTH;
use crate::error::{Error, Result};

/// Generate the orbital elements of a Walker constellation
///
/// `radius` is the orbit radius in meters (Earth radius plus altitude).
/// Ordering is plane-major, satellite-minor. A constellation with zero
/// planes or zero satellites per plane is rejected rather than silently
/// returned empty.
pub fn generate_constellation(
    radius: f64,
    inclination: f64,
    n_planes: usize,
    sats_per_plane: usize,
    raan0: f64,
) -> Result<Vec<ClassicalOrbitalElements>> {
    if n_planes == 0 || sats_per_plane == 0 {
        return Err(Error::DegenerateConstellation {
            n_planes,
            sats_per_plane,
        });
    }

    let delta_raan = 2.0 * PI / n_planes as f64;
    let delta_phase = 2.0 * PI / sats_per_plane as f64;

    let mut sats = Vec::with_capacity(n_planes * sats_per_plane);
    for p in 0..n_planes {
        let raan = raan0 + p as f64 * delta_raan;
        for s in 0..sats_per_plane {
            let nu = s as f64 * delta_phase;
            sats.push(ClassicalOrbitalElements::new(radius, 0.0, inclination, raan, 0.0, nu));
        }
    }

    Ok(sats)
}

/// Walker constellation geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkerConstellation {
    /// Altitude above the spherical Earth (m)
    pub altitude: f64,
    /// Inclination (rad)
    pub inclination: f64,
    pub n_planes: usize,
    pub sats_per_plane: usize,
    /// RAAN of the first plane (rad)
    #[serde(default)]
    pub raan0: f64,
}

impl WalkerConstellation {
    pub fn new(altitude: f64, inclination: f64, n_planes: usize, sats_per_plane: usize) -> Self {
        Self {
            altitude,
            inclination,
            n_planes,
            sats_per_plane,
            raan0: 0.0,
        }
    }

    pub fn with_raan0(mut self, raan0: f64) -> Self {
        self.raan0 = raan0;
        self
    }

    pub fn total_sats(&self) -> usize {
        self.n_planes * self.sats_per_plane
    }

    /// Orbit radius in meters
    pub fn orbit_radius(&self) -> f64 {
        R_EARTH + self.altitude
    }

    /// Orbital elements of every satellite, plane-major
    pub fn elements(&self) -> Result<Vec<ClassicalOrbitalElements>> {
        generate_constellation(
            self.orbit_radius(),
            self.inclination,
            self.n_planes,
            self.sats_per_plane,
            self.raan0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_satellite_is_base_element() {
        let radius = R_EARTH + 550e3;
        let inc = 98f64.to_radians();
        let sats = generate_constellation(radius, inc, 1, 1, 0.0).unwrap();

        assert_eq!(sats.len(), 1);
        assert_eq!(sats[0], ClassicalOrbitalElements::new(radius, 0.0, inc, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_count_and_ordering() {
        let sats = generate_constellation(7.0e6, 1.0, 3, 4, 0.1).unwrap();
        assert_eq!(sats.len(), 12);

        // Plane-major: the first four share the first plane
        for s in &sats[0..4] {
            assert_eq!(s.raan, 0.1);
        }
        assert!((sats[4].raan - (0.1 + 2.0 * PI / 3.0)).abs() < 1e-12);
        assert!((sats[1].nu - PI / 2.0).abs() < 1e-12);
        assert_eq!(sats[4].nu, 0.0);

        for s in &sats {
            assert_eq!(s.e, 0.0);
            assert_eq!(s.argp, 0.0);
            assert_eq!(s.a, 7.0e6);
            assert_eq!(s.i, 1.0);
        }
    }

    #[test]
    fn test_deterministic() {
        let a = generate_constellation(7.0e6, 1.0, 5, 2, 0.0).unwrap();
        let b = generate_constellation(7.0e6, 1.0, 5, 2, 0.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_rejected() {
        assert!(matches!(
            generate_constellation(7.0e6, 1.0, 0, 3, 0.0),
            Err(Error::DegenerateConstellation { n_planes: 0, .. })
        ));
        assert!(generate_constellation(7.0e6, 1.0, 3, 0, 0.0).is_err());
    }

    #[test]
    fn test_walker_descriptor() {
        let walker = WalkerConstellation::new(550e3, 1.7, 2, 3).with_raan0(0.5);
        assert_eq!(walker.total_sats(), 6);
        let elements = walker.elements().unwrap();
        assert_eq!(elements.len(), walker.total_sats());
        assert_eq!(elements[0].a, R_EARTH + 550e3);
        assert_eq!(elements[0].raan, 0.5);
    }
}
