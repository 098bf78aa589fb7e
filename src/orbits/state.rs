//! Cartesian state and trajectory representations
//!
//! Provides the state vectors used for numerical integration and the
//! time-aligned sequences produced by the propagator.

use nalgebra::Vector3;

use crate::constants::{MU_EARTH, R_EARTH};
use crate::error::{Error, Result};
use crate::frames::{self, Geodetic};

/// Position/velocity state vector
///
/// Position and velocity are in an Earth-centered inertial frame. The epoch
/// is seconds since the origin of the time grid the state belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianState {
    /// Position in ECI frame (meters)
    pub position: Vector3<f64>,

    /// Velocity in ECI frame (m/s)
    pub velocity: Vector3<f64>,

    /// Seconds since time grid origin
    pub epoch: f64,
}

impl CartesianState {
    /// Create a new state
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>, epoch: f64) -> Self {
        Self {
            position,
            velocity,
            epoch,
        }
    }

    /// Same position and velocity, different epoch
    pub fn at_epoch(self, epoch: f64) -> Self {
        Self { epoch, ..self }
    }

    /// Distance from Earth center in meters
    pub fn radius(&self) -> f64 {
        self.position.norm()
    }

    /// Altitude above the spherical Earth in meters
    pub fn altitude(&self) -> f64 {
        self.radius() - R_EARTH
    }

    /// Orbital speed in m/s
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Specific orbital energy (vis-viva) in J/kg
    pub fn specific_energy(&self) -> f64 {
        let v2 = self.velocity.norm_squared();
        let r = self.position.norm();
        0.5 * v2 - MU_EARTH / r
    }

    /// Specific angular momentum vector `r × v` in m²/s
    pub fn angular_momentum(&self) -> Vector3<f64> {
        self.position.cross(&self.velocity)
    }

    /// Unit normal of the orbit plane
    pub fn orbit_normal(&self) -> Result<Vector3<f64>> {
        let h = self.angular_momentum();
        let norm = h.norm();
        if norm == 0.0 {
            return Err(Error::ZeroLengthVector {
                what: "angular momentum",
            });
        }
        Ok(h / norm)
    }

    /// Semi-major axis in meters (negative for hyperbolic)
    pub fn semi_major_axis(&self) -> f64 {
        -MU_EARTH / (2.0 * self.specific_energy())
    }

    /// Orbital period in seconds (only valid for elliptical orbits)
    pub fn period(&self) -> Option<f64> {
        let a = self.semi_major_axis();
        if a > 0.0 {
            Some(2.0 * std::f64::consts::PI * (a.powi(3) / MU_EARTH).sqrt())
        } else {
            None
        }
    }

    /// Whether the state can be integrated further
    pub(crate) fn is_well_formed(&self) -> bool {
        let r = self.radius();
        r > 0.0 && r.is_finite() && self.speed().is_finite()
    }
}

/// Time-ordered propagated states, one per time grid sample
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    states: Vec<CartesianState>,
}

impl Trajectory {
    pub(crate) fn from_states(states: Vec<CartesianState>) -> Self {
        Self { states }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[CartesianState] {
        &self.states
    }

    pub fn get(&self, k: usize) -> Option<&CartesianState> {
        self.states.get(k)
    }

    pub fn first(&self) -> Option<&CartesianState> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&CartesianState> {
        self.states.last()
    }

    pub fn positions(&self) -> impl Iterator<Item = &Vector3<f64>> + '_ {
        self.states.iter().map(|s| &s.position)
    }

    /// Earth-fixed position of every sample
    pub fn earth_fixed(&self) -> EarthFixedTrack {
        EarthFixedTrack {
            positions: self
                .states
                .iter()
                .map(|s| frames::eci_to_ecef(&s.position, s.epoch))
                .collect(),
        }
    }

    /// Sub-satellite point of every sample
    pub fn ground_track(&self) -> Result<Vec<Geodetic>> {
        self.states
            .iter()
            .map(|s| frames::ecef_to_geodetic(&frames::eci_to_ecef(&s.position, s.epoch)))
            .collect()
    }
}

/// Earth-fixed positions of one satellite, index-aligned with its time grid
///
/// Computed once per trajectory and reused by every visibility test, so the
/// frame rotation is not repeated per ground cell.
#[derive(Debug, Clone, Default)]
pub struct EarthFixedTrack {
    positions: Vec<Vector3<f64>>,
}

impl EarthFixedTrack {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    pub fn get(&self, k: usize) -> Option<&Vector3<f64>> {
        self.positions.get(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_state_550km() {
        let r = R_EARTH + 550_000.0;
        let v = (MU_EARTH / r).sqrt();
        let state = CartesianState::new(Vector3::new(r, 0.0, 0.0), Vector3::new(0.0, v, 0.0), 0.0);

        assert!((state.altitude() - 550_000.0).abs() < 1e-6);
        assert!((state.semi_major_axis() - r).abs() / r < 1e-12);

        let period = state.period().unwrap();
        assert!((period / 60.0 - 95.6).abs() < 0.5); // ~95.6 minutes

        let normal = state.orbit_normal().unwrap();
        assert!((normal - Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn test_radial_state_has_no_normal() {
        let state = CartesianState::new(
            Vector3::new(R_EARTH, 0.0, 0.0),
            Vector3::new(1000.0, 0.0, 0.0),
            0.0,
        );
        assert!(matches!(
            state.orbit_normal(),
            Err(Error::ZeroLengthVector { .. })
        ));
    }

    #[test]
    fn test_earth_fixed_track_rotates_with_epoch() {
        let p = Vector3::new(R_EARTH, 0.0, 0.0);
        let quarter_day = std::f64::consts::FRAC_PI_2 / crate::constants::OMEGA_EARTH;
        let traj = Trajectory::from_states(vec![
            CartesianState::new(p, Vector3::zeros(), 0.0),
            CartesianState::new(p, Vector3::zeros(), quarter_day),
        ]);

        let track = traj.earth_fixed();
        assert_eq!(track.len(), 2);
        assert!((track.positions()[0] - p).norm() < 1e-6);
        // A fixed inertial point drifts westward in the Earth-fixed frame
        let rotated = track.positions()[1];
        assert!(rotated.x.abs() < 1e-3);
        assert!((rotated.y + R_EARTH).abs() < 1e-3);

        let ground = traj.ground_track().unwrap();
        assert!((ground[1].lon_deg() + 90.0).abs() < 1e-6);
    }
}
