//! Earth gravity force model
//!
//! Two fidelity levels:
//! - Point mass (μ/r²)
//! - Point mass + J2 (oblateness)

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::ForceModel;
use crate::constants::{J2, MU_EARTH, R_EARTH};

/// Gravity model fidelity selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GravityModel {
    /// Simple point mass: a = -μ/r³ × r
    PointMass,

    /// Point mass + J2 oblateness perturbation
    J2,
}

impl GravityModel {
    pub fn from_use_j2(use_j2: bool) -> Self {
        if use_j2 {
            Self::J2
        } else {
            Self::PointMass
        }
    }
}

/// Earth gravity force model
#[derive(Debug, Clone, Copy)]
pub struct EarthGravity {
    model: GravityModel,
}

impl EarthGravity {
    pub fn new(model: GravityModel) -> Self {
        Self { model }
    }

    /// Two-body gravity only
    pub fn point_mass() -> Self {
        Self::new(GravityModel::PointMass)
    }

    /// Two-body gravity with the J2 correction
    pub fn with_j2() -> Self {
        Self::new(GravityModel::J2)
    }

    pub fn model(&self) -> GravityModel {
        self.model
    }
}

/// Point mass acceleration: a = -μ/r³ × r
pub fn point_mass_acceleration(position: &Vector3<f64>) -> Vector3<f64> {
    let r = position.norm();
    -MU_EARTH / (r * r * r) * position
}

/// J2 perturbation acceleration in Cartesian ECI coordinates
pub fn j2_acceleration(position: &Vector3<f64>) -> Vector3<f64> {
    let x = position.x;
    let y = position.y;
    let z = position.z;

    let r2 = position.norm_squared();
    let r = r2.sqrt();
    let r5 = r2 * r2 * r;

    // Common factor: (3/2) × J2 × μ × Re² / r⁵
    let factor = 1.5 * J2 * MU_EARTH * R_EARTH * R_EARTH / r5;
    let z2_r2 = 5.0 * z * z / r2;

    Vector3::new(
        factor * x * (z2_r2 - 1.0),
        factor * y * (z2_r2 - 1.0),
        factor * z * (z2_r2 - 3.0),
    )
}

impl ForceModel for EarthGravity {
    fn acceleration(&self, position: &Vector3<f64>) -> Vector3<f64> {
        match self.model {
            GravityModel::PointMass => point_mass_acceleration(position),
            GravityModel::J2 => point_mass_acceleration(position) + j2_acceleration(position),
        }
    }

    fn name(&self) -> &'static str {
        match self.model {
            GravityModel::PointMass => "Earth Gravity (Point Mass)",
            GravityModel::J2 => "Earth Gravity (J2)",
        }
    }
}
