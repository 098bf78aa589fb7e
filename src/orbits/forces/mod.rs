//! Force models for orbital mechanics
//!
//! Each force model implements the `ForceModel` trait, which computes the
//! acceleration contribution at a given ECI position.
//!
//! # Available Models
//!
//! - **EarthGravity**: Central body gravity with optional J2 oblateness

mod gravity;

pub use gravity::{EarthGravity, GravityModel};

use nalgebra::Vector3;

/// Trait for force model contributions
///
/// Models must be thread-safe so a single propagator can be shared across
/// parallel propagation tasks.
pub trait ForceModel: Send + Sync {
    /// Acceleration at `position` (ECI, meters), in m/s²
    fn acceleration(&self, position: &Vector3<f64>) -> Vector3<f64>;

    /// Force model name for debugging and logging
    fn name(&self) -> &'static str;
}
