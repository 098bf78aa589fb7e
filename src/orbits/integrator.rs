//! Numerical integrators for orbit propagation
//!
//! A trait-based abstraction over single fixed-length integration steps,
//! so the propagation loop does not depend on the method.
//!
//! # Available Integrators
//!
//! - **Rk4**: classic fourth-order Runge-Kutta

use nalgebra::Vector3;

use super::state::CartesianState;

/// Right-hand side of the equations of motion: `(dr/dt, dv/dt)`
pub type Derivatives<'a> = dyn Fn(&CartesianState) -> (Vector3<f64>, Vector3<f64>) + 'a;

/// Trait for numerical integrators
///
/// Implementations must be `Send + Sync` to allow parallel propagation
/// of multiple satellites with one shared propagator.
pub trait Integrator: Send + Sync {
    /// Advance `state` by `dt` seconds
    fn step(&self, state: &CartesianState, dt: f64, derivatives: &Derivatives<'_>) -> CartesianState;

    /// Integrator name
    fn name(&self) -> &'static str;
}

/// Fixed-step fourth-order Runge-Kutta
///
/// Evaluates the derivatives at the current state and three trial states
/// and combines the four slopes with weights (1, 2, 2, 1) / 6.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rk4;

impl Rk4 {
    pub fn new() -> Self {
        Self
    }
}

impl Integrator for Rk4 {
    fn step(&self, state: &CartesianState, dt: f64, derivatives: &Derivatives<'_>) -> CartesianState {
        let half = dt / 2.0;

        let (v1, a1) = derivatives(state);

        let s2 = CartesianState::new(
            state.position + v1 * half,
            state.velocity + a1 * half,
            state.epoch + half,
        );
        let (v2, a2) = derivatives(&s2);

        let s3 = CartesianState::new(
            state.position + v2 * half,
            state.velocity + a2 * half,
            state.epoch + half,
        );
        let (v3, a3) = derivatives(&s3);

        let s4 = CartesianState::new(
            state.position + v3 * dt,
            state.velocity + a3 * dt,
            state.epoch + dt,
        );
        let (v4, a4) = derivatives(&s4);

        let new_pos = state.position + (v1 + 2.0 * v2 + 2.0 * v3 + v4) * (dt / 6.0);
        let new_vel = state.velocity + (a1 + 2.0 * a2 + 2.0 * a3 + a4) * (dt / 6.0);

        CartesianState::new(new_pos, new_vel, state.epoch + dt)
    }

    fn name(&self) -> &'static str {
        "RK4 (fixed step)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MU_EARTH, R_EARTH};

    #[test]
    fn test_rk_circular_orbit() {
        let integrator = Rk4::new();

        // Circular orbit at 400 km
        let r = R_EARTH + 400_000.0;
        let v = (MU_EARTH / r).sqrt();
        let state = CartesianState::new(Vector3::new(r, 0.0, 0.0), Vector3::new(0.0, v, 0.0), 0.0);

        // Simple derivatives: point mass gravity
        let derivatives = |s: &CartesianState| {
            let r = s.position.norm();
            let accel = -MU_EARTH / (r * r * r) * s.position;
            (s.velocity, accel)
        };

        let new_state = integrator.step(&state, 60.0, &derivatives);

        assert_eq!(new_state.epoch, 60.0);

        // Radius should be approximately preserved (circular orbit)
        let new_r = new_state.position.norm();
        assert!((new_r - r).abs() / r < 1e-6);

        // Speed should be approximately preserved
        let new_v = new_state.velocity.norm();
        assert!((new_v - v).abs() / v < 1e-6);
    }

    #[test]
    fn test_exact_for_constant_acceleration() {
        // RK4 integrates polynomial motion of degree <= 4 exactly
        let g = Vector3::new(0.0, 0.0, -9.81);
        let derivatives = |s: &CartesianState| (s.velocity, g);
        let state = CartesianState::new(Vector3::zeros(), Vector3::new(1.0, 0.0, 20.0), 0.0);

        let next = Rk4.step(&state, 2.0, &derivatives);

        let expected_z = 20.0 * 2.0 - 0.5 * 9.81 * 4.0;
        assert!((next.position.z - expected_z).abs() < 1e-12);
        assert!((next.position.x - 2.0).abs() < 1e-12);
        assert!((next.velocity.z - (20.0 - 9.81 * 2.0)).abs() < 1e-12);
    }
}
