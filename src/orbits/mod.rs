//! Orbit modelling and propagation
//!
//! - `elements` / `state`: classical elements and Cartesian states
//! - `forces`: acceleration laws (two-body, J2)
//! - `integrator` / `propagator`: fixed-step RK4 over a time grid
//! - `constellation`: Walker-pattern element sets
//!
//! # Example
//!
//! ```no_run
//! use satsweep::orbits::{Propagator, WalkerConstellation};
//! use satsweep::TimeGrid;
//!
//! let grid = TimeGrid::new(0.0, 86_400.0, 30.0)?;
//! let walker = WalkerConstellation::new(550e3, 98f64.to_radians(), 2, 3);
//! let trajectories = Propagator::with_j2().propagate_constellation(&walker.elements()?, &grid)?;
//! let ground_track = trajectories[0].ground_track()?;
//! # Ok::<(), satsweep::Error>(())
//! ```

pub mod constellation;
pub mod elements;
pub mod forces;
pub mod integrator;
pub mod propagator;
pub mod state;

pub use constellation::{generate_constellation, WalkerConstellation};
pub use elements::{circular_speed, j2_raan_rate, mean_motion, raan_of, ClassicalOrbitalElements};
pub use forces::{EarthGravity, ForceModel, GravityModel};
pub use integrator::{Integrator, Rk4};
pub use propagator::Propagator;
pub use state::{CartesianState, EarthFixedTrack, Trajectory};
