//! satsweep - constellation access and coverage analysis
//!
//! Batch engine for sizing LEO constellations against ground access
//! requirements:
//!
//! - **orbits**: Walker constellations, two-body + J2 dynamics, RK4 propagation
//! - **frames**: inertial / Earth-fixed / geodetic conversions
//! - **access**: elevation-mask and RF link-closure visibility, access
//!   intervals, gaps and revisit statistics
//! - **coverage**: the same analysis repeated over a latitude/longitude grid
//! - **analysis**: sweeps over (planes, satellites per plane) ranked by worst gap
//!
//! Inputs are SI units and radians unless a name says otherwise. Time is
//! seconds since the start of the simulation window.
//!
//! ```no_run
//! use satsweep::config::ScenarioConfig;
//!
//! let config = ScenarioConfig::load("scenario.json")?;
//! let outcome = config.geometric_sweep()?.run()?;
//! for d in &outcome.ranked {
//!     println!("{}x{}: worst gap {:.1} min", d.n_planes, d.sats_per_plane, d.worst_gap_min());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod access;
pub mod analysis;
pub mod config;
pub mod constants;
pub mod coverage;
pub mod error;
pub mod frames;
pub mod ground;
pub mod orbits;
pub mod rf;
pub mod time;

pub use error::{Error, Result};
pub use ground::GroundStation;
pub use time::TimeGrid;
