//! Station-centred geometry

use nalgebra::Vector3;

use crate::error::{Error, Result};
use crate::ground::GroundStation;

/// Satellite as seen from a ground station
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Topocentric {
    /// Station to satellite vector, Earth-fixed (m)
    pub slant: Vector3<f64>,
    /// Length of `slant` (m)
    pub range: f64,
    /// Sine of the elevation, clamped to [-1, 1]
    pub sin_elevation: f64,
}

impl Topocentric {
    /// Elevation above the local horizon (rad)
    pub fn elevation(&self) -> f64 {
        self.sin_elevation.asin()
    }

    pub fn is_above_horizon(&self) -> bool {
        self.sin_elevation > 0.0
    }
}

/// Look geometry from `station` to a satellite at `sat_ecef`
///
/// A satellite coincident with the station has no defined direction and is
/// reported as an error instead of producing NaN.
pub fn topocentric(sat_ecef: &Vector3<f64>, station: &GroundStation) -> Result<Topocentric> {
    let slant = sat_ecef - station.position_ecef();
    let range = slant.norm();
    if range == 0.0 {
        return Err(Error::ZeroLengthVector { what: "slant" });
    }

    // Round-off can push the dot product just outside [-1, 1]
    let sin_elevation = (slant.dot(station.zenith()) / range).clamp(-1.0, 1.0);

    Ok(Topocentric {
        slant,
        range,
        sin_elevation,
    })
}

/// Elevation of a satellite above the station's horizon (rad)
pub fn elevation(sat_ecef: &Vector3<f64>, station: &GroundStation) -> Result<f64> {
    Ok(topocentric(sat_ecef, station)?.elevation())
}
