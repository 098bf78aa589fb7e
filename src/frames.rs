//! Reference frame transforms
//!
//! Inertial to Earth-fixed is a single rotation about the polar axis by the
//! Earth rotation angle accumulated since the time grid origin. Earth-fixed
//! to geodetic assumes a spherical Earth. No angle wrapping is applied:
//! longitude follows `atan2` and latitude follows `asin`.

use nalgebra::{Matrix3, Vector3};

use crate::constants::OMEGA_EARTH;
use crate::error::{Error, Result};

/// Latitude/longitude pair on the spherical Earth (radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    pub lat: f64,
    pub lon: f64,
}

impl Geodetic {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn from_degrees(lat_deg: f64, lon_deg: f64) -> Self {
        Self {
            lat: lat_deg.to_radians(),
            lon: lon_deg.to_radians(),
        }
    }

    pub fn lat_deg(&self) -> f64 {
        self.lat.to_degrees()
    }

    pub fn lon_deg(&self) -> f64 {
        self.lon.to_degrees()
    }
}

/// Passive rotation about Z by `theta`
pub fn rotation_z(theta: f64) -> Matrix3<f64> {
    let (s, c) = theta.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

/// Passive rotation about X by `theta`
pub fn rotation_x(theta: f64) -> Matrix3<f64> {
    let (s, c) = theta.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

/// Earth rotation angle `t` seconds after the grid origin
pub fn earth_rotation_angle(t: f64) -> f64 {
    OMEGA_EARTH * t
}

/// ECI position to ECEF at `t` seconds since the grid origin
pub fn eci_to_ecef(r_eci: &Vector3<f64>, t: f64) -> Vector3<f64> {
    rotation_z(earth_rotation_angle(t)) * r_eci
}

/// ECEF position to ECI at `t` seconds since the grid origin
pub fn ecef_to_eci(r_ecef: &Vector3<f64>, t: f64) -> Vector3<f64> {
    rotation_z(earth_rotation_angle(t)).transpose() * r_ecef
}

/// ECEF position to spherical latitude/longitude
pub fn ecef_to_geodetic(r_ecef: &Vector3<f64>) -> Result<Geodetic> {
    let r = r_ecef.norm();
    if r == 0.0 {
        return Err(Error::ZeroLengthVector { what: "position" });
    }

    let lat = (r_ecef.z / r).clamp(-1.0, 1.0).asin();
    let lon = r_ecef.y.atan2(r_ecef.x);

    Ok(Geodetic { lat, lon })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::R_EARTH;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_inertial_point_over_time() {
        // Inertial point above the equator seen from the rotating Earth
        let r_eci = Vector3::new(R_EARTH, 0.0, 0.0);

        for hours in [0.0, 1.0, 2.0] {
            let t = hours * 3600.0;
            let geo = ecef_to_geodetic(&eci_to_ecef(&r_eci, t)).unwrap();
            assert_relative_eq!(geo.lat, 0.0, epsilon = 1e-12);
            assert_relative_eq!(geo.lon, -OMEGA_EARTH * t, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_eci_ecef_round_trip() {
        let r = Vector3::new(-4.2e6, 3.1e6, 5.5e6);
        for t in [0.0, 17.0, 5000.0, 86_400.0 * 3.3] {
            let back = ecef_to_eci(&eci_to_ecef(&r, t), t);
            assert_relative_eq!(back, r, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_rotation_preserves_norm_and_z() {
        let r = Vector3::new(1.0e6, -2.0e6, 3.0e6);
        let rotated = eci_to_ecef(&r, 12_345.0);
        assert_relative_eq!(rotated.norm(), r.norm(), epsilon = 1e-6);
        assert_eq!(rotated.z, r.z);
    }

    #[test]
    fn test_geodetic_ranges() {
        let north_pole = ecef_to_geodetic(&Vector3::new(0.0, 0.0, 7.0e6)).unwrap();
        assert_relative_eq!(north_pole.lat, std::f64::consts::FRAC_PI_2);

        let antimeridian = ecef_to_geodetic(&Vector3::new(-7.0e6, 0.0, 0.0)).unwrap();
        assert_relative_eq!(antimeridian.lon, std::f64::consts::PI);
    }

    #[test]
    fn test_zero_vector_is_an_error() {
        assert!(matches!(
            ecef_to_geodetic(&Vector3::zeros()),
            Err(Error::ZeroLengthVector { .. })
        ));
    }
}
