//! Ground stations on a spherical Earth

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::R_EARTH;
use crate::frames::Geodetic;

/// Fixed observer on the Earth's surface
///
/// The Earth-fixed position and the local zenith are derived once at
/// construction; the station is immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundStation {
    location: Geodetic,
    position_ecef: Vector3<f64>,
    zenith: Vector3<f64>,
}

impl GroundStation {
    /// Station at latitude/longitude in radians
    pub fn new(lat: f64, lon: f64) -> Self {
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();

        let zenith = Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);

        Self {
            location: Geodetic::new(lat, lon),
            position_ecef: zenith * R_EARTH,
            zenith,
        }
    }

    /// Station at latitude/longitude in degrees
    pub fn from_degrees(lat_deg: f64, lon_deg: f64) -> Self {
        Self::new(lat_deg.to_radians(), lon_deg.to_radians())
    }

    pub fn location(&self) -> Geodetic {
        self.location
    }

    pub fn lat(&self) -> f64 {
        self.location.lat
    }

    pub fn lon(&self) -> f64 {
        self.location.lon
    }

    /// Earth-fixed position (m)
    pub fn position_ecef(&self) -> &Vector3<f64> {
        &self.position_ecef
    }

    /// Local vertical unit vector
    pub fn zenith(&self) -> &Vector3<f64> {
        &self.zenith
    }
}

/// Serializable station location in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationLocation {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl Default for StationLocation {
    /// Svalbard
    fn default() -> Self {
        Self {
            lat_deg: 79.0,
            lon_deg: 17.5,
        }
    }
}

impl StationLocation {
    pub fn station(&self) -> GroundStation {
        GroundStation::from_degrees(self.lat_deg, self.lon_deg)
    }
}
