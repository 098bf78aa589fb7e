//! Classical orbital elements
//!
//! Conversion between the six-element description of an orbit and the
//! Cartesian state used for integration.

use std::f64::consts::PI;

use nalgebra::Vector3;

use super::state::CartesianState;
use crate::constants::{J2, MU_EARTH, R_EARTH};
use crate::error::{Error, Result};
use crate::frames::{rotation_x, rotation_z};

/// Eccentricity below which an orbit is treated as circular
const CIRCULAR_TOLERANCE: f64 = 1e-10;

/// Inclination (rad) below which an orbit is treated as equatorial
const EQUATORIAL_TOLERANCE: f64 = 1e-10;

/// Six-parameter orbit description (SI meters, radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassicalOrbitalElements {
    /// Semi-major axis (m)
    pub a: f64,
    /// Eccentricity, in [0, 1)
    pub e: f64,
    /// Inclination
    pub i: f64,
    /// Right ascension of the ascending node
    pub raan: f64,
    /// Argument of perigee
    pub argp: f64,
    /// True anomaly
    pub nu: f64,
}

impl ClassicalOrbitalElements {
    pub fn new(a: f64, e: f64, i: f64, raan: f64, argp: f64, nu: f64) -> Self {
        Self {
            a,
            e,
            i,
            raan,
            argp,
            nu,
        }
    }

    /// Circular orbit at `altitude` meters above the spherical Earth
    pub fn circular(altitude: f64, i: f64, raan: f64, nu: f64) -> Self {
        Self::new(R_EARTH + altitude, 0.0, i, raan, 0.0, nu)
    }

    /// Semi-latus rectum `a (1 - e²)`
    pub fn semi_latus_rectum(&self) -> f64 {
        self.a * (1.0 - self.e * self.e)
    }

    pub fn mean_motion(&self) -> f64 {
        mean_motion(self.a)
    }

    pub fn period(&self) -> f64 {
        2.0 * PI / self.mean_motion()
    }

    /// Cartesian ECI state at `epoch`
    ///
    /// Builds position and velocity in the perifocal frame, then rotates
    /// them with `Q = R3(-Ω) · R1(-i) · R3(-ω)`.
    pub fn to_cartesian(&self, epoch: f64) -> CartesianState {
        let p = self.semi_latus_rectum();
        let (sin_nu, cos_nu) = self.nu.sin_cos();
        let r_mag = p / (1.0 + self.e * cos_nu);
        let v_scale = (MU_EARTH / p).sqrt();

        let r_pf = Vector3::new(r_mag * cos_nu, r_mag * sin_nu, 0.0);
        let v_pf = Vector3::new(-v_scale * sin_nu, v_scale * (self.e + cos_nu), 0.0);

        let q = rotation_z(-self.raan) * rotation_x(-self.i) * rotation_z(-self.argp);

        CartesianState::new(q * r_pf, q * v_pf, epoch)
    }

    /// Osculating elements of a Cartesian state
    ///
    /// Circular orbits report `argp = 0` with `nu` measured from the
    /// ascending node; equatorial orbits report `raan = 0` with angles
    /// measured from the X axis.
    pub fn from_cartesian(state: &CartesianState) -> Result<Self> {
        let r_vec = state.position;
        let v_vec = state.velocity;
        let r = r_vec.norm();
        if r == 0.0 {
            return Err(Error::ZeroLengthVector { what: "position" });
        }

        let h_vec = r_vec.cross(&v_vec);
        let h = h_vec.norm();
        if h == 0.0 {
            return Err(Error::ZeroLengthVector {
                what: "angular momentum",
            });
        }

        let node = Vector3::z().cross(&h_vec);
        let n = node.norm();

        let e_vec = ((v_vec.norm_squared() - MU_EARTH / r) * r_vec - r_vec.dot(&v_vec) * v_vec)
            / MU_EARTH;
        let e = e_vec.norm();

        let a = -MU_EARTH / (2.0 * state.specific_energy());
        let i = (h_vec.z / h).clamp(-1.0, 1.0).acos();

        let equatorial = i < EQUATORIAL_TOLERANCE || (PI - i) < EQUATORIAL_TOLERANCE;
        let circular = e < CIRCULAR_TOLERANCE;

        // Reference direction in the orbit plane for angle measurement
        let reference = if equatorial {
            Vector3::x()
        } else {
            node / n
        };

        let raan = if equatorial {
            0.0
        } else {
            wrap_two_pi(node.y.atan2(node.x))
        };

        let (argp, nu) = if circular {
            (0.0, signed_angle(&reference, &r_vec, &h_vec))
        } else {
            let argp = signed_angle(&reference, &e_vec, &h_vec);
            let nu = signed_angle(&e_vec, &r_vec, &h_vec);
            (argp, nu)
        };

        Ok(Self {
            a,
            e,
            i,
            raan,
            argp,
            nu,
        })
    }
}

/// Mean motion (rad/s) of an orbit with semi-major axis `a`
pub fn mean_motion(a: f64) -> f64 {
    (MU_EARTH / a.powi(3)).sqrt()
}

/// Circular orbit speed at radius `r`
pub fn circular_speed(r: f64) -> f64 {
    (MU_EARTH / r).sqrt()
}

/// Secular J2 drift of the ascending node (rad/s)
pub fn j2_raan_rate(a: f64, e: f64, i: f64) -> f64 {
    let p = a * (1.0 - e * e);
    -1.5 * mean_motion(a) * J2 * (R_EARTH / p).powi(2) * i.cos()
}

/// Right ascension of the ascending node of a state's osculating orbit
pub fn raan_of(state: &CartesianState) -> f64 {
    let node = Vector3::z().cross(&state.angular_momentum());
    node.y.atan2(node.x)
}

/// Angle from `from` to `to` in [0, 2π), positive about `axis`
fn signed_angle(from: &Vector3<f64>, to: &Vector3<f64>, axis: &Vector3<f64>) -> f64 {
    let angle = from.cross(to).dot(axis).atan2(from.dot(to) * axis.norm());
    wrap_two_pi(angle)
}

fn wrap_two_pi(angle: f64) -> f64 {
    angle.rem_euclid(2.0 * PI)
}
