//! Fixed-step orbit propagator
//!
//! Orchestrates the numerical integrator with a force model to produce
//! trajectories aligned with a time grid.

use rayon::prelude::*;

use super::elements::ClassicalOrbitalElements;
use super::forces::{EarthGravity, ForceModel, GravityModel};
use super::integrator::{Integrator, Rk4};
use super::state::{CartesianState, Trajectory};
use crate::error::{Error, Result};
use crate::time::TimeGrid;

/// Orbit propagator
///
/// Combines a numerical integrator with a force model. The propagator is
/// immutable once built and can be shared across threads.
pub struct Propagator {
    /// Numerical integrator
    integrator: Box<dyn Integrator>,

    /// Force model
    forces: Box<dyn ForceModel>,
}

impl std::fmt::Debug for Propagator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Propagator")
            .field("integrator", &self.integrator.name())
            .field("forces", &self.forces.name())
            .finish()
    }
}

impl Default for Propagator {
    fn default() -> Self {
        Self::with_j2()
    }
}

impl Propagator {
    /// Create a propagator with the given integrator and force model
    pub fn new(integrator: impl Integrator + 'static, forces: impl ForceModel + 'static) -> Self {
        Self {
            integrator: Box::new(integrator),
            forces: Box::new(forces),
        }
    }

    /// RK4 with two-body gravity only
    pub fn two_body() -> Self {
        Self::new(Rk4, EarthGravity::point_mass())
    }

    /// RK4 with two-body gravity and the J2 correction
    pub fn with_j2() -> Self {
        Self::new(Rk4, EarthGravity::with_j2())
    }

    /// RK4 with the selected gravity model
    pub fn from_model(model: GravityModel) -> Self {
        Self::new(Rk4, EarthGravity::new(model))
    }

    pub fn integrator_name(&self) -> &'static str {
        self.integrator.name()
    }

    pub fn force_model_name(&self) -> &'static str {
        self.forces.name()
    }

    /// Propagate `initial` across every sample of `grid`
    ///
    /// The returned trajectory has exactly `grid.len()` states. The first
    /// one is `initial` itself, stamped with the first grid instant; each
    /// following state is one integration step of `grid.step()` later.
    pub fn propagate(&self, initial: CartesianState, grid: &TimeGrid) -> Result<Trajectory> {
        if initial.position.norm() == 0.0 {
            return Err(Error::ZeroLengthVector { what: "position" });
        }

        let dt = grid.step();
        let forces = &self.forces;
        let derivatives = |s: &CartesianState| (s.velocity, forces.acceleration(&s.position));

        let mut states = Vec::with_capacity(grid.len());
        let mut state = initial.at_epoch(grid.start());
        states.push(state);

        for k in 1..grid.len() {
            let next = self.integrator.step(&state, dt, &derivatives);
            if !next.is_well_formed() {
                return Err(Error::DegenerateState { epoch: next.epoch });
            }
            // Stamp the exact grid instant so epochs never accumulate rounding
            state = next.at_epoch(grid.time_at(k));
            states.push(state);
        }

        log::trace!(
            "Propagated {} samples with {} / {}",
            states.len(),
            self.integrator.name(),
            self.forces.name()
        );

        Ok(Trajectory::from_states(states))
    }

    /// Convert elements to a state at the grid origin and propagate
    pub fn propagate_elements(
        &self,
        elements: &ClassicalOrbitalElements,
        grid: &TimeGrid,
    ) -> Result<Trajectory> {
        self.propagate(elements.to_cartesian(grid.start()), grid)
    }

    /// Propagate every satellite of a constellation once
    ///
    /// Satellites are independent; they are integrated in parallel and
    /// returned in input order.
    pub fn propagate_constellation(
        &self,
        constellation: &[ClassicalOrbitalElements],
        grid: &TimeGrid,
    ) -> Result<Vec<Trajectory>> {
        log::debug!(
            "Propagating {} satellites over {} samples",
            constellation.len(),
            grid.len()
        );

        constellation
            .par_iter()
            .map(|elements| self.propagate_elements(elements, grid))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MU_EARTH, R_EARTH};
    use nalgebra::Vector3;

    fn circular_state(altitude: f64) -> CartesianState {
        let r = R_EARTH + altitude;
        let v = (MU_EARTH / r).sqrt();
        CartesianState::new(Vector3::new(r, 0.0, 0.0), Vector3::new(0.0, v, 0.0), 0.0)
    }

    #[test]
    fn test_trajectory_is_grid_aligned() {
        let grid = TimeGrid::new(0.0, 3600.0, 60.0).unwrap();
        let initial = circular_state(550e3);

        let traj = Propagator::two_body().propagate(initial, &grid).unwrap();

        assert_eq!(traj.len(), grid.len());
        // First sample is the initial state, untouched
        assert_eq!(traj.states()[0], initial);
        for (k, state) in traj.states().iter().enumerate() {
            assert_eq!(state.epoch, grid.time_at(k));
        }
    }

    #[test]
    fn test_first_sample_takes_grid_start() {
        let grid = TimeGrid::new(120.0, 600.0, 60.0).unwrap();
        let initial = circular_state(550e3);
        let traj = Propagator::with_j2().propagate(initial, &grid).unwrap();

        let first = traj.first().unwrap();
        assert_eq!(first.position, initial.position);
        assert_eq!(first.velocity, initial.velocity);
        assert_eq!(first.epoch, 120.0);
    }

    #[test]
    fn test_propagate_one_orbit() {
        let initial = circular_state(400e3);
        let period = initial.period().unwrap();
        let step = period / 600.0;
        let grid = TimeGrid::new(0.0, period - step / 2.0, step).unwrap();
        assert_eq!(grid.len(), 601);

        let traj = Propagator::two_body().propagate(initial, &grid).unwrap();

        // After one orbit, should return to approximately the same position
        let final_pos = traj.last().unwrap().position;
        let pos_error = (final_pos - initial.position).norm() / initial.position.norm();
        assert!(pos_error < 1e-4, "Position error too large: {}", pos_error);
    }

    #[test]
    fn test_energy_error_shrinks_with_step() {
        let initial = ClassicalOrbitalElements::new(8.0e6, 0.1, 0.6, 0.2, 0.3, 0.0).to_cartesian(0.0);
        let e0 = initial.specific_energy();

        let drift = |step: f64| {
            let grid = TimeGrid::new(0.0, 6.0 * 3600.0, step).unwrap();
            let traj = Propagator::two_body().propagate(initial, &grid).unwrap();
            traj.states()
                .iter()
                .map(|s| ((s.specific_energy() - e0) / e0).abs())
                .fold(0.0, f64::max)
        };

        let coarse = drift(120.0);
        let fine = drift(30.0);
        assert!(fine < coarse, "fine {fine} coarse {coarse}");
        assert!(fine < 1e-6);
    }

    #[test]
    fn test_zero_position_rejected() {
        let grid = TimeGrid::new(0.0, 60.0, 30.0).unwrap();
        let state = CartesianState::new(Vector3::zeros(), Vector3::new(0.0, 7000.0, 0.0), 0.0);
        assert!(matches!(
            Propagator::two_body().propagate(state, &grid),
            Err(Error::ZeroLengthVector { .. })
        ));
    }

    #[test]
    fn test_constellation_keeps_order() {
        let grid = TimeGrid::new(0.0, 600.0, 60.0).unwrap();
        let elements: Vec<_> = (0..4)
            .map(|k| ClassicalOrbitalElements::circular(550e3, 1.0, 0.0, k as f64 * 0.5))
            .collect();

        let trajectories = Propagator::with_j2()
            .propagate_constellation(&elements, &grid)
            .unwrap();

        assert_eq!(trajectories.len(), 4);
        for (traj, coe) in trajectories.iter().zip(&elements) {
            assert_eq!(traj.first().unwrap().position, coe.to_cartesian(0.0).position);
        }
    }

    #[test]
    fn test_debug_names_models() {
        let text = format!("{:?}", Propagator::with_j2());
        assert!(text.contains("RK4"));
        assert!(text.contains("J2"));
    }
}
