//! Visibility predicates
//!
//! A visibility predicate decides, for one satellite position at one
//! instant, whether a ground station has access. Two implementations:
//!
//! - **ElevationMask**: purely geometric, elevation above a threshold
//! - **LinkClosure**: RF link budget closes with non-negative margin
//!
//! The grid engine and the architecture sweep are written against the
//! trait, so either criterion plugs in without duplicated loops.

use nalgebra::Vector3;

use super::geometry::topocentric;
use crate::error::Result;
use crate::ground::GroundStation;
use crate::rf::{compute_uplink, LinkBudget, LinkParams};

/// Per-sample satellite-to-ground access test
///
/// Implementations are pure and must be shareable across threads.
pub trait VisibilityPredicate: Send + Sync {
    /// Whether `station` has access to a satellite at `sat_ecef`
    fn is_visible(&self, sat_ecef: &Vector3<f64>, station: &GroundStation) -> Result<bool>;

    /// Predicate name for logging
    fn name(&self) -> &'static str;
}

/// Geometric access: elevation at or above a mask angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationMask {
    /// Minimum elevation (rad), may be zero
    pub min_elevation: f64,
}

impl ElevationMask {
    pub fn new(min_elevation: f64) -> Self {
        Self { min_elevation }
    }

    pub fn from_degrees(min_elevation_deg: f64) -> Self {
        Self::new(min_elevation_deg.to_radians())
    }

    /// Plain horizon mask
    pub fn horizon() -> Self {
        Self::new(0.0)
    }
}

impl VisibilityPredicate for ElevationMask {
    fn is_visible(&self, sat_ecef: &Vector3<f64>, station: &GroundStation) -> Result<bool> {
        Ok(topocentric(sat_ecef, station)?.elevation() >= self.min_elevation)
    }

    fn name(&self) -> &'static str {
        "elevation mask"
    }
}

/// RF access: uplink budget closes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkClosure {
    pub params: LinkParams,
}

impl LinkClosure {
    pub fn new(params: LinkParams) -> Self {
        Self { params }
    }

    /// Full budget for diagnostics
    ///
    /// At or below the horizon the link is not closed and no budget is
    /// computed.
    pub fn evaluate(&self, sat_ecef: &Vector3<f64>, station: &GroundStation) -> Result<LinkBudget> {
        let topo = topocentric(sat_ecef, station)?;
        if !topo.is_above_horizon() {
            return Ok(LinkBudget::below_horizon(topo.range));
        }
        Ok(compute_uplink(topo.range, &self.params))
    }
}

impl VisibilityPredicate for LinkClosure {
    fn is_visible(&self, sat_ecef: &Vector3<f64>, station: &GroundStation) -> Result<bool> {
        Ok(self.evaluate(sat_ecef, station)?.is_closed())
    }

    fn name(&self) -> &'static str {
        "link closure"
    }
}
